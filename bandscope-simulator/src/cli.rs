//! Command-line options of the simulator.

use bandscope_dsp::{
    config::{BAND_COUNT, BAND_EDGES, BIN_COUNT, FIRST_USABLE_BIN},
    BandMap, BinSummary, ConfigError, LevelConfig,
};
use bandscope_viz::{
    color_strategy::{BlockWheelColor, ShiftingSpectrumColor},
    ColorMode, DisplayProfile,
};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bandscope-simulator")]
#[command(about = "Spectrum bars of a synthetic sweep in a desktop window", long_about = None)]
pub struct Args {
    /// Display layout to emulate
    #[arg(value_enum, default_value_t = Display::St7735)]
    pub display: Display,

    /// Bar coloring; defaults to the display's own
    #[arg(long, value_enum, value_name = "MODE")]
    pub colors: Option<Colors>,

    /// How the bins of one band are reduced to a level
    #[arg(long, value_enum, default_value_t = Summary::Max)]
    pub summary: Summary,

    /// Spread bands geometrically instead of using the fixed edge table
    #[arg(long)]
    pub log_bands: bool,

    /// Growth factor of log-spaced band widths
    #[arg(long, value_name = "FACTOR", default_value_t = 7.0)]
    pub spread: f32,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Ssd1306,
    St7735,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Colors {
    Mono,
    Wheel,
    BandHue,
    Shifting,
    Level,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Summary {
    Max,
    Average,
    Rms,
}

impl Args {
    /// Display geometry, with the requested coloring applied.
    pub fn profile(&self) -> DisplayProfile {
        let profile = match self.display {
            Display::Ssd1306 => DisplayProfile::SSD1306_128X64,
            Display::St7735 => DisplayProfile::ST7735_160X80,
        };
        match self.colors {
            Some(colors) => profile.with_color_mode(colors.mode()),
            None => profile,
        }
    }

    pub fn levels(&self) -> LevelConfig {
        match self.display {
            Display::Ssd1306 => LevelConfig::SSD1306,
            Display::St7735 => LevelConfig::ST7735,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self.display {
            Display::Ssd1306 => "SSD1306 128x64",
            Display::St7735 => "ST7735 160x80",
        }
    }

    pub fn band_map(&self) -> Result<BandMap<BAND_COUNT>, ConfigError> {
        if self.log_bands {
            BandMap::log_spaced(FIRST_USABLE_BIN as u16, BIN_COUNT as u16, self.spread, BIN_COUNT)
        } else {
            BandMap::from_edges(&BAND_EDGES, BIN_COUNT)
        }
    }

    pub fn bin_summary(&self) -> BinSummary {
        match self.summary {
            Summary::Max => BinSummary::Max,
            Summary::Average => BinSummary::Average,
            Summary::Rms => BinSummary::Rms,
        }
    }
}

impl Colors {
    fn mode(self) -> ColorMode {
        match self {
            Colors::Mono => ColorMode::Monochrome,
            Colors::Wheel => ColorMode::BlockWheel(BlockWheelColor::new(55)),
            Colors::BandHue => ColorMode::BandHue,
            Colors::Shifting => ColorMode::ShiftingSpectrum(ShiftingSpectrumColor::new()),
            Colors::Level => ColorMode::LevelHeat,
        }
    }
}
