#![no_std]
//! Signal path of a small-screen audio spectrum visualizer.
//!
//! Per cycle: [`Sampler`] fills a [`Frame`] from an ADC, [`SpectralTransform`]
//! turns it into bin magnitudes, [`BandAggregator`] reduces the bins to
//! smoothed band levels with peak hold, and [`PeakTracker`] keeps a slowly
//! refreshed loudest-bin readout. [`Analyzer`] strings them together.
//!
//! Everything is fixed-size and allocation-free.

#[cfg(feature = "logging")]
use defmt_rtt as _;

pub mod aggregator;
pub mod analyzer;
pub mod bands;
pub mod config;
pub mod error;
pub mod frame;
pub mod peak;
pub mod sampler;
pub mod spectrum;

pub use aggregator::{hold_peak, smooth, target_level, BandAggregator, BandState};
pub use analyzer::{Analyzer, Snapshot};
pub use bands::{BandMap, BinSummary};
pub use config::LevelConfig;
pub use error::ConfigError;
pub use frame::Frame;
pub use peak::{level_db, GlobalPeakStat, PeakBin, PeakTracker};
pub use sampler::{AnalogInput, Deadline, MonotonicClock, Sampler};
pub use spectrum::{bin_frequency_hz, SpectralTransform, Spectrum};
