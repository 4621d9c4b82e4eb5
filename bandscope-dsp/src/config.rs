use crate::error::ConfigError;

// --- Sampling ---
pub const SAMPLE_COUNT: usize = 128; // FFT length, power of two
pub const SAMPLE_RATE_HZ: u32 = 4_000;
pub const ADC_MIDPOINT: u16 = 2048; // 12-bit reading centered on zero
pub const ADC_MAX: u16 = 4095;

// --- Spectrum ---
pub const BIN_COUNT: usize = SAMPLE_COUNT / 2;
pub const FIRST_USABLE_BIN: usize = 4; // bins below this are DC and mains hum

// --- Bands ---
pub const BAND_COUNT: usize = 16;
pub const BAND_EDGES: [u16; BAND_COUNT + 1] = [
    4, 5, 6, 7, 8, 9, 11, 13, 16, 19, 23, 28, 34, 41, 49, 58, 64,
];

// --- Levels ---
pub const AMP_SCALE: f32 = 2048.0;

// --- Readout ---
pub const PEAK_TIME_INTERVAL_MS: u32 = 500;

/// Tunables of the band level filter.
///
/// `noise_floor` is subtracted from each band's raw magnitude before the
/// affine gain `db_mult / amp_scale` is applied; the result is clamped to
/// `[0, 1]` and scaled to a 0..100 level. `smooth_up` and `smooth_down` are
/// the attack and release weights of the exponential filter, and
/// `peak_fall` is the per-cycle linear decay of the peak marker.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct LevelConfig {
    pub noise_floor: f32,
    pub amp_scale: f32,
    pub db_mult: f32,
    pub peak_fall: f32,
    pub smooth_up: f32,
    pub smooth_down: f32,
}

impl LevelConfig {
    /// Tuning used with the 128x64 monochrome OLED.
    pub const SSD1306: Self = Self {
        noise_floor: 60.0,
        amp_scale: AMP_SCALE,
        db_mult: 6.0,
        peak_fall: 2.0,
        smooth_up: 0.9,
        smooth_down: 0.3,
    };

    /// Tuning used with the 160x80 color TFT.
    pub const ST7735: Self = Self {
        noise_floor: 30.0,
        amp_scale: AMP_SCALE,
        db_mult: 8.0,
        peak_fall: 2.0,
        smooth_up: 0.9,
        smooth_down: 0.3,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.amp_scale > 0.0) {
            return Err(ConfigError::InvalidAmpScale);
        }
        let in_unit = |k: f32| k > 0.0 && k <= 1.0;
        if !in_unit(self.smooth_up) || !in_unit(self.smooth_down) {
            return Err(ConfigError::InvalidSmoothing);
        }
        if !(self.noise_floor >= 0.0) {
            return Err(ConfigError::NegativeNoiseFloor);
        }
        if !(self.peak_fall >= 0.0) {
            return Err(ConfigError::NegativePeakFall);
        }
        Ok(())
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::SSD1306
    }
}
