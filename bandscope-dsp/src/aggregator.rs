#[cfg(feature = "logging")]
use defmt::trace;

use crate::bands::{BandMap, BinSummary};
use crate::config::LevelConfig;
use crate::error::ConfigError;
use crate::spectrum::Spectrum;

/// Display level of one band, carried from cycle to cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct BandState {
    /// Smoothed level, 0..100.
    pub current_level: f32,
    /// Peak-hold marker. Decays linearly and is stored unclamped, so it can
    /// drop below zero during silence.
    pub peak_level: f32,
}

/// Noise-gated affine gain: 0 at or below the floor, 100 at saturation.
///
/// This is not a logarithmic dB value even though the gain is called
/// `db_mult`; the bar response depends on it staying linear.
pub fn target_level(max_amp: f32, config: &LevelConfig) -> f32 {
    let norm = (max_amp - config.noise_floor) / config.amp_scale * config.db_mult;
    norm.clamp(0.0, 1.0) * 100.0
}

/// Asymmetric exponential filter: fast attack, slow release.
pub fn smooth(current: f32, target: f32, config: &LevelConfig) -> f32 {
    if target > current {
        target * config.smooth_up + current * (1.0 - config.smooth_up)
    } else {
        target * config.smooth_down + current * (1.0 - config.smooth_down)
    }
}

/// Peak hold with linear fall, one step per call.
pub fn hold_peak(peak: f32, current: f32, peak_fall: f32) -> f32 {
    if current > peak {
        current
    } else {
        peak - peak_fall
    }
}

/// Reduces a magnitude spectrum to `B` smoothed band levels with peak hold.
pub struct BandAggregator<const B: usize> {
    map: BandMap<B>,
    config: LevelConfig,
    summary: BinSummary,
    bands: [BandState; B],
}

impl<const B: usize> BandAggregator<B> {
    pub fn new(map: BandMap<B>, config: LevelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            map,
            config,
            summary: BinSummary::Max,
            bands: [BandState::default(); B],
        })
    }

    pub fn with_summary(mut self, summary: BinSummary) -> Self {
        self.summary = summary;
        self
    }

    /// Run one cycle over `spectrum`. Bands that reach past the end of the
    /// spectrum only see the bins that exist.
    pub fn update(&mut self, spectrum: &Spectrum<'_>) -> &[BandState; B] {
        let magnitudes = spectrum.magnitudes();
        for (i, band) in self.bands.iter_mut().enumerate() {
            let range = self.map.range(i);
            let end = range.end.min(magnitudes.len());
            let start = range.start.min(end);
            let max_amp = self.summary.calculate(&magnitudes[start..end]);

            let target = target_level(max_amp, &self.config);
            band.current_level = smooth(band.current_level, target, &self.config);
            band.peak_level = hold_peak(band.peak_level, band.current_level, self.config.peak_fall);
        }

        #[cfg(feature = "logging")]
        trace!("band levels: {:?}", defmt::Debug2Format(&self.bands));

        &self.bands
    }

    pub fn bands(&self) -> &[BandState; B] {
        &self.bands
    }

    pub fn band_map(&self) -> &BandMap<B> {
        &self.map
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn summary(&self) -> BinSummary {
        self.summary
    }

    /// Return every band to rest.
    pub fn reset(&mut self) {
        self.bands = [BandState::default(); B];
    }
}
