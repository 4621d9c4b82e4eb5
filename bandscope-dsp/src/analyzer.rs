#[cfg(feature = "logging")]
use defmt::info;

use crate::aggregator::{BandAggregator, BandState};
use crate::bands::{BandMap, BinSummary};
use crate::config::LevelConfig;
use crate::error::ConfigError;
use crate::frame::Frame;
use crate::peak::{GlobalPeakStat, PeakBin, PeakTracker};
use crate::sampler::{AnalogInput, MonotonicClock, Sampler};
use crate::spectrum::SpectralTransform;

#[cfg(feature = "logging")]
const LOG_EVERY_CYCLES: u32 = 200;

/// What the display needs from one cycle.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a, const B: usize> {
    pub bands: &'a [BandState; B],
    pub peak: GlobalPeakStat,
    /// Loudest bin of this cycle, unthrottled.
    pub instant: PeakBin,
}

/// Owns every buffer and filter state of the visualizer core; one call to
/// [`Analyzer::run_cycle`] is one turn of the polling loop.
pub struct Analyzer<const N: usize, const B: usize> {
    frame: Frame<N>,
    sampler: Sampler,
    transform: SpectralTransform<N>,
    aggregator: BandAggregator<B>,
    peak: PeakTracker,
    cycles: u32,
}

impl<const N: usize, const B: usize> Analyzer<N, B> {
    pub fn new(
        sample_rate_hz: u32,
        edges: &[u16],
        levels: LevelConfig,
        peak_interval_ms: u32,
    ) -> Result<Self, ConfigError> {
        let map = BandMap::from_edges(edges, N / 2)?;
        Self::with_band_map(sample_rate_hz, map, levels, peak_interval_ms)
    }

    pub fn with_band_map(
        sample_rate_hz: u32,
        map: BandMap<B>,
        levels: LevelConfig,
        peak_interval_ms: u32,
    ) -> Result<Self, ConfigError> {
        let sampler = Sampler::new(sample_rate_hz)?;
        let transform = SpectralTransform::new(sample_rate_hz)?;
        let aggregator = BandAggregator::new(map, levels)?;

        #[cfg(feature = "logging")]
        info!(
            "Analyzer: {} samples at {} Hz ({} us), {} bands",
            N,
            sample_rate_hz,
            sampler.interval_us(),
            B
        );

        Ok(Self {
            frame: Frame::new(),
            sampler,
            transform,
            aggregator,
            peak: PeakTracker::new(peak_interval_ms),
            cycles: 0,
        })
    }

    /// Reduce each band's bins with `summary` instead of the loudest bin.
    pub fn with_summary(mut self, summary: BinSummary) -> Self {
        self.aggregator = self.aggregator.with_summary(summary);
        self
    }

    /// Sample, transform, aggregate. Blocks for the whole sampling window.
    pub fn run_cycle<A, C>(&mut self, adc: &mut A, clock: &C) -> Snapshot<'_, B>
    where
        A: AnalogInput,
        C: MonotonicClock,
    {
        self.sampler.acquire(adc, clock, &mut self.frame);
        self.analyze(clock.now_millis())
    }

    /// Everything after sampling, for a frame filled through [`Self::frame_mut`].
    pub fn analyze(&mut self, now_ms: u32) -> Snapshot<'_, B> {
        let spectrum = self.transform.process(&mut self.frame);
        self.aggregator.update(&spectrum);
        self.peak.observe(&spectrum, now_ms);

        self.cycles = self.cycles.wrapping_add(1);
        #[cfg(feature = "logging")]
        if self.cycles % LOG_EVERY_CYCLES == 0 {
            info!("cycle {}: readout {}", self.cycles, self.peak.stat());
        }

        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot<'_, B> {
        Snapshot {
            bands: self.aggregator.bands(),
            peak: *self.peak.stat(),
            instant: *self.peak.instant(),
        }
    }

    pub fn frame(&self) -> &Frame<N> {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame<N> {
        &mut self.frame
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn aggregator(&self) -> &BandAggregator<B> {
        &self.aggregator
    }

    pub fn peak_tracker(&self) -> &PeakTracker {
        &self.peak
    }

    /// Completed cycles, wrapping.
    pub fn cycles(&self) -> u32 {
        self.cycles
    }
}
