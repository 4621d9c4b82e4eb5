#[cfg(feature = "logging")]
use defmt::debug;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::spectrum::Spectrum;

/// `20 * log10(amplitude + 1)`; the offset keeps silence at 0 dB instead of
/// negative infinity.
pub fn level_db(amplitude: f32) -> f32 {
    20.0 * (amplitude + 1.0).log10()
}

/// Loudest usable bin of a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct PeakBin {
    pub bin: usize,
    pub magnitude: f32,
}

impl PeakBin {
    /// Scan the usable bins. Ties keep the lowest bin; a silent frame
    /// reports bin 0 with zero magnitude.
    pub fn find(spectrum: &Spectrum<'_>) -> Self {
        spectrum
            .usable_bins()
            .fold(PeakBin::default(), |best, (bin, magnitude)| {
                if magnitude > best.magnitude {
                    PeakBin { bin, magnitude }
                } else {
                    best
                }
            })
    }

    pub fn level_db(&self) -> f32 {
        level_db(self.magnitude)
    }
}

/// The slow on-screen readout: loudest level and where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct GlobalPeakStat {
    pub level_db: f32,
    pub frequency_hz: f32,
    /// Millisecond tick of the last refresh, `None` before the first one.
    pub last_update_ms: Option<u32>,
}

/// Rate-limited loudest-bin statistic.
///
/// The loudest bin is found every cycle, but the readout only moves when
/// `interval_ms` has passed since it last moved, so the number stays
/// readable.
pub struct PeakTracker {
    interval_ms: u32,
    instant: PeakBin,
    stat: GlobalPeakStat,
}

impl PeakTracker {
    pub const fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            instant: PeakBin { bin: 0, magnitude: 0.0 },
            stat: GlobalPeakStat {
                level_db: 0.0,
                frequency_hz: 0.0,
                last_update_ms: None,
            },
        }
    }

    /// Feed one cycle. Returns `true` when the readout was refreshed.
    pub fn observe(&mut self, spectrum: &Spectrum<'_>, now_ms: u32) -> bool {
        self.instant = PeakBin::find(spectrum);

        let due = match self.stat.last_update_ms {
            None => true,
            Some(last) => now_ms.wrapping_sub(last) >= self.interval_ms,
        };
        if !due {
            return false;
        }

        self.stat = GlobalPeakStat {
            level_db: self.instant.level_db(),
            frequency_hz: spectrum.bin_frequency_hz(self.instant.bin),
            last_update_ms: Some(now_ms),
        };

        #[cfg(feature = "logging")]
        debug!(
            "peak readout: {} dB at {} Hz",
            self.stat.level_db, self.stat.frequency_hz
        );

        true
    }

    pub fn stat(&self) -> &GlobalPeakStat {
        &self.stat
    }

    /// This cycle's loudest bin, not rate limited.
    pub fn instant(&self) -> &PeakBin {
        &self.instant
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn spectrum_with(bin: usize, magnitude: f32, mags: &mut [f32; 64]) -> Spectrum<'_> {
        mags.fill(0.0);
        mags[bin] = magnitude;
        Spectrum::new(mags, 4_000)
    }

    #[test]
    fn test_level_db() {
        assert_abs_diff_eq!(level_db(0.0), 0.0, epsilon = 0.25);
        assert_abs_diff_eq!(level_db(9.0), 20.0, epsilon = 0.3);
        assert_abs_diff_eq!(level_db(999.0), 60.0, epsilon = 0.5);
    }

    #[test]
    fn test_find_ignores_dc_region() {
        let mut mags = [0.0f32; 64];
        mags[1] = 10_000.0;
        mags[3] = 9_000.0;
        mags[30] = 50.0;
        mags[31] = 50.0;
        let peak = PeakBin::find(&Spectrum::new(&mags, 4_000));
        assert_eq!(peak, PeakBin { bin: 30, magnitude: 50.0 });

        let silent = [0.0f32; 64];
        assert_eq!(PeakBin::find(&Spectrum::new(&silent, 4_000)), PeakBin::default());
    }

    #[test]
    fn test_first_observation_refreshes() {
        let mut tracker = PeakTracker::new(500);
        let mut mags = [0.0f32; 64];
        assert!(tracker.observe(&spectrum_with(20, 999.0, &mut mags), 10));
        let stat = *tracker.stat();
        assert_eq!(stat.frequency_hz, 625.0);
        assert_abs_diff_eq!(stat.level_db, 60.0, epsilon = 0.5);
        assert_eq!(stat.last_update_ms, Some(10));
    }

    #[test]
    fn test_refresh_is_rate_limited() {
        let mut tracker = PeakTracker::new(500);
        let mut mags = [0.0f32; 64];
        tracker.observe(&spectrum_with(20, 999.0, &mut mags), 1_000);
        let held = *tracker.stat();

        assert!(!tracker.observe(&spectrum_with(40, 9.0, &mut mags), 1_200));
        assert!(!tracker.observe(&spectrum_with(40, 9.0, &mut mags), 1_499));
        assert_eq!(*tracker.stat(), held);
        // The instantaneous peak still follows every frame.
        assert_eq!(tracker.instant().bin, 40);

        assert!(tracker.observe(&spectrum_with(40, 9.0, &mut mags), 1_500));
        assert_eq!(tracker.stat().frequency_hz, 1_250.0);
        assert_abs_diff_eq!(tracker.stat().level_db, 20.0, epsilon = 0.3);
        assert_eq!(tracker.stat().last_update_ms, Some(1_500));
    }

    #[test]
    fn test_refresh_across_millis_wrap() {
        let mut tracker = PeakTracker::new(500);
        let mut mags = [0.0f32; 64];
        tracker.observe(&spectrum_with(10, 99.0, &mut mags), u32::MAX - 100);
        assert!(!tracker.observe(&spectrum_with(12, 99.0, &mut mags), 200));
        assert!(tracker.observe(&spectrum_with(12, 99.0, &mut mags), 400));
        assert_eq!(tracker.stat().frequency_hz, 375.0);
    }
}
