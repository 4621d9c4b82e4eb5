use core::fmt;

/// Rejected configuration, reported once at construction time.
///
/// The per-cycle path has no failure modes; everything that could go wrong
/// is a bad constant, and it is caught here before the loop starts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum ConfigError {
    /// The edge table does not hold exactly `bands + 1` entries.
    EdgeCount { expected: usize, found: usize },
    /// `edges[index] >= edges[index + 1]`.
    EdgesNotIncreasing { index: usize },
    /// The first band starts inside the DC/hum region.
    BelowUsableBin { first: usize, min: usize },
    /// The last band ends past the meaningful half of the spectrum.
    BeyondSpectrum { end: usize, limit: usize },
    /// A log-spaced map was asked for more bands than the bin range holds.
    RangeTooNarrow { bins: usize, bands: usize },
    InvalidSpreadFactor,
    InvalidAmpScale,
    InvalidSmoothing,
    NegativeNoiseFloor,
    NegativePeakFall,
    /// Zero, or too fast for a whole-microsecond sample interval.
    InvalidSampleRate { hz: u32 },
    /// The transform only supports power-of-two frames of 8 to 4096 samples.
    InvalidSampleCount { samples: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigError::EdgeCount { expected, found } => {
                write!(f, "expected {} band edges, found {}", expected, found)
            }
            ConfigError::EdgesNotIncreasing { index } => {
                write!(f, "band edge {} is not below edge {}", index, index + 1)
            }
            ConfigError::BelowUsableBin { first, min } => {
                write!(f, "first band edge {} is below usable bin {}", first, min)
            }
            ConfigError::BeyondSpectrum { end, limit } => {
                write!(f, "last band edge {} exceeds spectrum length {}", end, limit)
            }
            ConfigError::RangeTooNarrow { bins, bands } => {
                write!(f, "{} bins cannot hold {} non-empty bands", bins, bands)
            }
            ConfigError::InvalidSpreadFactor => f.write_str("spread factor must be greater than 1"),
            ConfigError::InvalidAmpScale => f.write_str("amplitude scale must be positive"),
            ConfigError::InvalidSmoothing => {
                f.write_str("smoothing coefficients must lie in (0, 1]")
            }
            ConfigError::NegativeNoiseFloor => f.write_str("noise floor must not be negative"),
            ConfigError::NegativePeakFall => f.write_str("peak fall rate must not be negative"),
            ConfigError::InvalidSampleRate { hz } => write!(f, "unsupported sample rate {} Hz", hz),
            ConfigError::InvalidSampleCount { samples } => {
                write!(f, "unsupported frame length {}", samples)
            }
        }
    }
}
