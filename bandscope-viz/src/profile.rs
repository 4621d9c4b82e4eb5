use crate::color_strategy::{BlockWheelColor, ColorMode};

/// How much of the screen is wiped before a frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum ClearStrategy {
    /// Clear everything, for buffered displays where clearing is free.
    Full,
    /// Clear the header strip and each bar column just before it is redrawn.
    /// Keeps pixel traffic down on displays written over a slow bus.
    PerColumn,
}

/// Geometry and look of one physical display.
#[derive(Clone, Copy)]
pub struct DisplayProfile {
    pub width: u32,
    pub height: u32,
    /// Text strip at the top; bars never enter it.
    pub header_height: u32,
    pub block_height: u32,
    /// Pixels kept free between the tallest bar and the header.
    pub bar_headroom: u32,
    pub level_text: (i32, i32),
    pub freq_text: (i32, i32),
    /// Space between the number and its unit ("90.8 dB" vs "90.8dB").
    pub unit_gap: bool,
    pub clear: ClearStrategy,
    pub color_mode: ColorMode,
}

impl DisplayProfile {
    /// 128x64 monochrome OLED.
    pub const SSD1306_128X64: Self = Self {
        width: 128,
        height: 64,
        header_height: 10,
        block_height: 5,
        bar_headroom: 2,
        level_text: (0, 0),
        freq_text: (42, 0),
        unit_gap: false,
        clear: ClearStrategy::Full,
        color_mode: ColorMode::Monochrome,
    };

    /// 160x80 color TFT, green at the bottom of a bar and red at the top.
    pub const ST7735_160X80: Self = Self {
        width: 160,
        height: 80,
        header_height: 12,
        block_height: 7,
        bar_headroom: 4,
        level_text: (5, 2),
        freq_text: (90, 2),
        unit_gap: true,
        clear: ClearStrategy::PerColumn,
        color_mode: ColorMode::BlockWheel(BlockWheelColor::new(55)),
    };

    pub fn usable_height(&self) -> u32 {
        self.height.saturating_sub(self.header_height)
    }

    pub fn with_color_mode(mut self, color_mode: ColorMode) -> Self {
        self.color_mode = color_mode;
        self
    }
}
