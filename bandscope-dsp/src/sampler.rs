use crate::config::ADC_MIDPOINT;
use crate::error::ConfigError;
use crate::frame::Frame;

/// Single-ended analog channel. Reads never fail; an overdriven input just
/// reads as the ADC's full-scale code.
pub trait AnalogInput {
    fn read(&mut self) -> u16;
}

/// Free-running tick source, in the style of `micros()`/`millis()`.
/// Both counters wrap; every comparison against them uses wrapping
/// arithmetic.
pub trait MonotonicClock {
    fn now_micros(&self) -> u32;
    fn now_millis(&self) -> u32;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn read(&mut self) -> u16 {
        (**self).read()
    }
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_micros(&self) -> u32 {
        (**self).now_micros()
    }

    fn now_millis(&self) -> u32 {
        (**self).now_millis()
    }
}

/// A fixed-period busy-wait schedule.
///
/// Each `wait` spins until one period has passed since the previous
/// deadline, then moves the deadline forward by exactly one period. The
/// clock is never re-read to set the next deadline, so a late wake-up does
/// not push every later sample back.
pub struct Deadline {
    last: u32,
    period_us: u32,
}

impl Deadline {
    pub fn start<C: MonotonicClock>(clock: &C, period_us: u32) -> Self {
        Self {
            last: clock.now_micros(),
            period_us,
        }
    }

    pub fn wait<C: MonotonicClock>(&mut self, clock: &C) {
        while clock.now_micros().wrapping_sub(self.last) < self.period_us {
            core::hint::spin_loop();
        }
        self.last = self.last.wrapping_add(self.period_us);
    }

    pub fn last(&self) -> u32 {
        self.last
    }
}

/// Evenly spaced frame acquisition from an [`AnalogInput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampler {
    interval_us: u32,
    midpoint: f32,
}

impl Sampler {
    pub fn new(sample_rate_hz: u32) -> Result<Self, ConfigError> {
        Self::with_midpoint(sample_rate_hz, ADC_MIDPOINT)
    }

    pub fn with_midpoint(sample_rate_hz: u32, midpoint: u16) -> Result<Self, ConfigError> {
        if sample_rate_hz == 0 || sample_rate_hz > 1_000_000 {
            return Err(ConfigError::InvalidSampleRate { hz: sample_rate_hz });
        }
        Ok(Self {
            interval_us: 1_000_000 / sample_rate_hz,
            midpoint: midpoint as f32,
        })
    }

    pub fn interval_us(&self) -> u32 {
        self.interval_us
    }

    /// Fill `frame` with `N` centered samples, blocking for `N` intervals.
    pub fn acquire<A, C, const N: usize>(&self, adc: &mut A, clock: &C, frame: &mut Frame<N>)
    where
        A: AnalogInput,
        C: MonotonicClock,
    {
        let mut deadline = Deadline::start(clock, self.interval_us);
        for (re, im) in frame.re.iter_mut().zip(frame.im.iter_mut()) {
            *re = adc.read() as f32 - self.midpoint;
            *im = 0.0;
            deadline.wait(clock);
        }
    }
}
