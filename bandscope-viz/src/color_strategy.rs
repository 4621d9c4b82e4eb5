use embedded_graphics::{pixelcolor::Rgb888, prelude::*};

/// Where the block being colored sits.
pub struct ColorContext {
    pub band_index: usize,
    pub num_bands: usize,
    /// Block number counted from the bottom of the bar.
    pub block_index: usize,
    pub block_height: u32,
    /// Smoothed level of the band, 0..100.
    pub level: f32,
}

pub trait ColorStrategy {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888;

    /// Called once after every rendered frame.
    fn next_frame(&mut self) {}
}

/// Three-segment hue wheel: green to red, red to blue, blue to green.
fn hue_wheel(pos: u8) -> Rgb888 {
    let pos = pos % 255;
    let step = (pos % 85) * 3;
    match pos / 85 {
        0 => Rgb888::new(step, 255 - step, 0),
        1 => Rgb888::new(255 - step, 0, step),
        _ => Rgb888::new(0, step, 255 - step),
    }
}

/// Reversed wheel used for stacked blocks: low positions are red, the
/// middle is blue-green, and it comes back round through green.
fn block_wheel(pos: u8) -> Rgb888 {
    let pos = 255 - pos;
    if pos < 85 {
        Rgb888::new(255 - pos * 3, pos * 3, 0)
    } else if pos < 170 {
        let pos = pos - 85;
        Rgb888::new(0, pos * 3, 255 - pos * 3)
    } else {
        let pos = pos - 170;
        Rgb888::new(pos * 3, 255 - pos * 3, 0)
    }
}

pub struct Monochrome;
impl ColorStrategy for Monochrome {
    fn get_color(&mut self, _context: &ColorContext) -> Rgb888 {
        Rgb888::WHITE
    }
}

/// Color by height within the bar, so every bar shares one gradient.
#[derive(Clone, Copy)]
pub struct BlockWheelColor {
    offset: u8,
}
impl BlockWheelColor {
    pub const fn new(offset: u8) -> Self {
        Self { offset }
    }
}
impl ColorStrategy for BlockWheelColor {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888 {
        let pos = context.block_index as u32 * context.block_height * 2 + self.offset as u32;
        block_wheel(pos as u8)
    }
}

/// One fixed hue per band, spread once around the wheel.
pub struct BandHueColor;
impl ColorStrategy for BandHueColor {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888 {
        let bands = context.num_bands.max(1);
        hue_wheel((context.band_index.min(bands - 1) * 255 / bands) as u8)
    }
}

/// Band hue that rotates one wheel step per frame.
#[derive(Clone, Copy)]
pub struct ShiftingSpectrumColor {
    wheel_val: u8,
}
impl ShiftingSpectrumColor {
    pub const fn new() -> Self {
        Self { wheel_val: 0 }
    }
}
impl Default for ShiftingSpectrumColor {
    fn default() -> Self {
        Self::new()
    }
}
impl ColorStrategy for ShiftingSpectrumColor {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888 {
        let multiplier = (255 / context.num_bands.clamp(1, 255)) as u8;
        hue_wheel(
            (context.band_index as u8)
                .wrapping_mul(multiplier)
                .wrapping_add(self.wheel_val),
        )
    }

    fn next_frame(&mut self) {
        self.wheel_val = self.wheel_val.wrapping_add(1);
    }
}

/// Whole bar tinted by how loud its band is: blue when quiet, red at full
/// scale.
pub struct LevelHeatColor;
impl ColorStrategy for LevelHeatColor {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888 {
        let heat = (context.level / 100.0 * 255.0).clamp(0.0, 255.0) as u8;
        Rgb888::new(heat, 0, 255 - heat)
    }
}

/// Strategy chosen by a display profile.
#[derive(Clone, Copy)]
pub enum ColorMode {
    Monochrome,
    BlockWheel(BlockWheelColor),
    BandHue,
    ShiftingSpectrum(ShiftingSpectrumColor),
    LevelHeat,
}

impl ColorStrategy for ColorMode {
    fn get_color(&mut self, context: &ColorContext) -> Rgb888 {
        match self {
            ColorMode::Monochrome => Monochrome.get_color(context),
            ColorMode::BlockWheel(c) => c.get_color(context),
            ColorMode::BandHue => BandHueColor.get_color(context),
            ColorMode::ShiftingSpectrum(c) => c.get_color(context),
            ColorMode::LevelHeat => LevelHeatColor.get_color(context),
        }
    }

    fn next_frame(&mut self) {
        if let ColorMode::ShiftingSpectrum(c) = self {
            c.next_frame();
        }
    }
}
