use core::fmt::Write;

use bandscope_dsp::{GlobalPeakStat, Snapshot};
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use heapless::String;

#[cfg(feature = "logging")]
use defmt::info;

use crate::color_strategy::{ColorContext, ColorMode, ColorStrategy};
use crate::layout::{BarLayout, Rect};
use crate::profile::{ClearStrategy, DisplayProfile};
use crate::sink::RenderSink;

const PEAK_COLOR: Rgb888 = Rgb888::WHITE;
const BACKGROUND: Rgb888 = Rgb888::BLACK;

pub type HeaderText = String<24>;

/// `"90.8 dB"`, or `"90.8dB"` without the gap.
pub fn format_level(level_db: f32, unit_gap: bool) -> HeaderText {
    let mut text = HeaderText::new();
    let sep = if unit_gap { " " } else { "" };
    // Overflow only truncates the label.
    let _ = write!(text, "{:4.1}{}dB", level_db, sep);
    text
}

/// Whole hertz, right-aligned in four columns.
pub fn format_frequency(frequency_hz: f32, unit_gap: bool) -> HeaderText {
    let mut text = HeaderText::new();
    let sep = if unit_gap { " " } else { "" };
    let _ = write!(text, "{:4}{}Hz", frequency_hz as i32, sep);
    text
}

/// Draws band bars, peak markers and the header readout for `B` bands.
pub struct SpectrumRenderer<const B: usize, C = ColorMode> {
    profile: DisplayProfile,
    layout: BarLayout,
    colors: C,
    frames: u32,
}

impl<const B: usize> SpectrumRenderer<B, ColorMode> {
    /// Uses the profile's own color mode.
    pub fn new(profile: DisplayProfile) -> Self {
        Self::with_colors(profile, profile.color_mode)
    }
}

impl<const B: usize, C: ColorStrategy> SpectrumRenderer<B, C> {
    pub fn with_colors(profile: DisplayProfile, colors: C) -> Self {
        let layout = BarLayout::new(&profile, B);

        #[cfg(feature = "logging")]
        info!(
            "SpectrumRenderer: {}x{}, header {}, {} bars of {} px, clear {}",
            profile.width,
            profile.height,
            profile.header_height,
            B,
            layout.bar_width(),
            profile.clear
        );

        Self {
            profile,
            layout,
            colors,
            frames: 0,
        }
    }

    pub fn render<S: RenderSink>(
        &mut self,
        sink: &mut S,
        snapshot: &Snapshot<'_, B>,
    ) -> Result<(), S::Error> {
        match self.profile.clear {
            ClearStrategy::Full => sink.clear()?,
            ClearStrategy::PerColumn => fill(sink, self.layout.header_rect(), BACKGROUND)?,
        }

        self.draw_header(sink, &snapshot.peak)?;

        for (band, state) in snapshot.bands.iter().enumerate() {
            if self.profile.clear == ClearStrategy::PerColumn {
                fill(sink, self.layout.column_rect(band), BACKGROUND)?;
            }

            for block in 0..self.layout.block_count(state.current_level) {
                let color = self.colors.get_color(&ColorContext {
                    band_index: band,
                    num_bands: B,
                    block_index: block,
                    block_height: self.profile.block_height,
                    level: state.current_level,
                });
                fill(sink, self.layout.block_rect(band, block), color)?;
            }

            sink.draw_line(
                self.layout.bar_x(band),
                self.layout.peak_y(state.peak_level),
                self.layout.peak_width(),
                PEAK_COLOR,
            )?;
        }

        self.colors.next_frame();
        self.frames = self.frames.wrapping_add(1);
        #[cfg(feature = "logging")]
        if self.frames % 200 == 0 {
            info!("rendered {} frames", self.frames);
        }

        sink.present()
    }

    fn draw_header<S: RenderSink>(
        &self,
        sink: &mut S,
        peak: &GlobalPeakStat,
    ) -> Result<(), S::Error> {
        let (x, y) = self.profile.level_text;
        sink.draw_text(x, y, &format_level(peak.level_db, self.profile.unit_gap))?;
        let (x, y) = self.profile.freq_text;
        sink.draw_text(x, y, &format_frequency(peak.frequency_hz, self.profile.unit_gap))
    }

    pub fn profile(&self) -> &DisplayProfile {
        &self.profile
    }

    pub fn layout(&self) -> &BarLayout {
        &self.layout
    }

    /// Frames rendered so far, wrapping.
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

fn fill<S: RenderSink>(sink: &mut S, rect: Rect, color: Rgb888) -> Result<(), S::Error> {
    sink.fill_rect(rect.x, rect.y, rect.w, rect.h, color)
}
