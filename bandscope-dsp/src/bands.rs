#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::FIRST_USABLE_BIN;
use crate::error::ConfigError;

/// How a band's bins are reduced to a single magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum BinSummary {
    /// Loudest bin in the band.
    #[default]
    Max,
    Average,
    /// Root mean square of the band's bins.
    Rms,
}

impl BinSummary {
    pub fn calculate(&self, bin_slice: &[f32]) -> f32 {
        if bin_slice.is_empty() {
            return 0.0;
        }
        let num_elements = bin_slice.len() as f32;

        match *self {
            BinSummary::Max => bin_slice.iter().copied().fold(0.0, f32::max),
            BinSummary::Average => bin_slice.iter().sum::<f32>() / num_elements,
            BinSummary::Rms => {
                let sum_of_squares: f32 = bin_slice.iter().map(|&x| x * x).sum();
                if sum_of_squares > 0.0 {
                    (sum_of_squares / num_elements).sqrt()
                } else {
                    0.0
                }
            }
        }
    }
}

/// Fixed assignment of `B` bands to half-open bin ranges.
///
/// Ranges are contiguous and non-empty, the first starts at or above
/// [`FIRST_USABLE_BIN`] and the last ends at or below the spectrum length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandMap<const B: usize> {
    ranges: [(u16, u16); B],
}

impl<const B: usize> BandMap<B> {
    /// Build from `B + 1` edges over a spectrum of `bin_count` bins.
    pub fn from_edges(edges: &[u16], bin_count: usize) -> Result<Self, ConfigError> {
        if edges.len() != B + 1 {
            return Err(ConfigError::EdgeCount {
                expected: B + 1,
                found: edges.len(),
            });
        }
        let ranges: [(u16, u16); B] = core::array::from_fn(|i| (edges[i], edges[i + 1]));
        Self::from_ranges(ranges, bin_count)
    }

    /// Spread `B` bands over `[first, end)` so band widths grow
    /// geometrically with `exp_factor`, the way bass bands stay narrow on a
    /// log frequency axis. Edges that would collapse are pushed up by one
    /// bin; if that runs out of room the range is too narrow.
    pub fn log_spaced(
        first: u16,
        end: u16,
        exp_factor: f32,
        bin_count: usize,
    ) -> Result<Self, ConfigError> {
        if !(exp_factor > 1.0) {
            return Err(ConfigError::InvalidSpreadFactor);
        }
        let span = end.saturating_sub(first) as usize;
        if B == 0 || span < B {
            return Err(ConfigError::RangeTooNarrow { bins: span, bands: B });
        }

        let mut ranges = [(0, 0); B];
        let mut start = first;
        for (i, range) in ranges.iter_mut().enumerate() {
            let fraction = (i + 1) as f32 / B as f32;
            let curve = (exp_factor.powf(fraction) - 1.0) / (exp_factor - 1.0);
            let remaining = (B - 1 - i) as u16;
            let stop = if i == B - 1 {
                end
            } else {
                // Leave at least one bin for each band still to come.
                (first + (curve * span as f32) as u16)
                    .max(start + 1)
                    .min(end - remaining)
            };
            *range = (start, stop);
            start = stop;
        }
        Self::from_ranges(ranges, bin_count)
    }

    fn from_ranges(ranges: [(u16, u16); B], bin_count: usize) -> Result<Self, ConfigError> {
        if let Some(index) = ranges.iter().position(|&(lo, hi)| lo >= hi) {
            return Err(ConfigError::EdgesNotIncreasing { index });
        }
        if let Some(&(first, _)) = ranges.first() {
            if (first as usize) < FIRST_USABLE_BIN {
                return Err(ConfigError::BelowUsableBin {
                    first: first as usize,
                    min: FIRST_USABLE_BIN,
                });
            }
        }
        if let Some(&(_, end)) = ranges.last() {
            if end as usize > bin_count {
                return Err(ConfigError::BeyondSpectrum {
                    end: end as usize,
                    limit: bin_count,
                });
            }
        }
        Ok(Self { ranges })
    }

    pub fn band_ranges(&self) -> &[(u16, u16); B] {
        &self.ranges
    }

    pub fn range(&self, band: usize) -> core::ops::Range<usize> {
        let (start, end) = self.ranges[band];
        start as usize..end as usize
    }

    pub const fn len(&self) -> usize {
        B
    }

    pub const fn is_empty(&self) -> bool {
        B == 0
    }
}
