#![allow(dead_code)]

use std::cell::Cell;
use std::f32::consts::PI;

use bandscope_dsp::config::{ADC_MAX, ADC_MIDPOINT, SAMPLE_COUNT, SAMPLE_RATE_HZ};
use bandscope_dsp::{AnalogInput, MonotonicClock};
use wavegen::{sine, wf};

/// Bin 20 of a 128-point frame at 4 kHz.
pub const TONE_HZ: f32 = 625.0;

/// One frame of a centered sine, in ADC counts.
pub fn tone_frame(frequency: f32, amplitude: f32) -> [f32; SAMPLE_COUNT] {
    let waveform = wf!(f32, SAMPLE_RATE_HZ as f32, sine!(frequency, amplitude));
    let mut samples = [0.0; SAMPLE_COUNT];
    for (dst, v) in samples.iter_mut().zip(waveform.iter()) {
        *dst = v;
    }
    samples
}

/// Clock that advances `step_us` every time it is read.
pub struct FakeClock {
    now_us: Cell<u32>,
    step_us: u32,
}

impl FakeClock {
    pub fn new(start_us: u32, step_us: u32) -> Self {
        Self {
            now_us: Cell::new(start_us),
            step_us,
        }
    }

    pub fn peek_micros(&self) -> u32 {
        self.now_us.get()
    }

    pub fn advance_millis(&self, ms: u32) {
        self.now_us.set(self.now_us.get().wrapping_add(ms * 1000));
    }
}

impl MonotonicClock for FakeClock {
    fn now_micros(&self) -> u32 {
        let t = self.now_us.get();
        self.now_us.set(t.wrapping_add(self.step_us));
        t
    }

    fn now_millis(&self) -> u32 {
        self.now_us.get() / 1000
    }
}

/// Microphone whose output is a sine of the fake clock's time. Records when
/// each read happened.
pub struct ToneAdc<'a> {
    pub clock: &'a FakeClock,
    pub frequency: f32,
    pub amplitude: f32,
    pub read_times: Vec<u32>,
}

impl<'a> ToneAdc<'a> {
    pub fn new(clock: &'a FakeClock, frequency: f32, amplitude: f32) -> Self {
        Self {
            clock,
            frequency,
            amplitude,
            read_times: Vec::new(),
        }
    }
}

impl AnalogInput for ToneAdc<'_> {
    fn read(&mut self) -> u16 {
        let t_us = self.clock.peek_micros();
        self.read_times.push(t_us);
        let t = t_us as f32 * 1e-6;
        let v = ADC_MIDPOINT as f32 + self.amplitude * (2.0 * PI * self.frequency * t).sin();
        v.round().clamp(0.0, ADC_MAX as f32) as u16
    }
}
