use core::f32::consts::PI;

use microdsp::common::real_fft;
use microfft::Complex32;
#[allow(unused_imports)]
use micromath::F32Ext;

use crate::config::FIRST_USABLE_BIN;
use crate::error::ConfigError;
use crate::frame::Frame;

/// Magnitude of one FFT output bin. Exactly zero for a zero bin.
pub fn magnitude(component: &Complex32) -> f32 {
    let power = component.re * component.re + component.im * component.im;
    if power > 0.0 {
        power.sqrt()
    } else {
        0.0
    }
}

/// Center frequency of `bin` for an `n`-point transform at `sample_rate_hz`.
pub fn bin_frequency_hz(bin: usize, sample_rate_hz: u32, n: usize) -> f32 {
    bin as f32 * sample_rate_hz as f32 / n as f32
}

/// Hamming window + forward real FFT + magnitude, for a fixed frame length.
pub struct SpectralTransform<const N: usize> {
    window: [f32; N],
    sample_rate_hz: u32,
}

impl<const N: usize> SpectralTransform<N> {
    pub fn new(sample_rate_hz: u32) -> Result<Self, ConfigError> {
        if N < 8 || !N.is_power_of_two() || N > 4096 {
            return Err(ConfigError::InvalidSampleCount { samples: N });
        }
        if sample_rate_hz == 0 {
            return Err(ConfigError::InvalidSampleRate { hz: sample_rate_hz });
        }

        let mut window = [0.0; N];
        let span = (N - 1) as f32;
        for (i, w) in window.iter_mut().enumerate() {
            *w = 0.54 - 0.46 * (2.0 * PI * i as f32 / span).cos();
        }
        Ok(Self {
            window,
            sample_rate_hz,
        })
    }

    pub fn window(&self) -> &[f32; N] {
        &self.window
    }

    pub fn apply_window(&self, frame: &mut Frame<N>) {
        for (sample, w) in frame.re.iter_mut().zip(self.window.iter()) {
            *sample *= w;
        }
    }

    /// Transform `frame` in place. Afterwards `frame.re[..N / 2]` holds bin
    /// magnitudes, the rest of `re` and all of `im` are zero.
    pub fn process<'a>(&self, frame: &'a mut Frame<N>) -> Spectrum<'a> {
        self.apply_window(frame);

        let bins = real_fft(&mut frame.re);
        // rfft packs the Nyquist coefficient into the DC bin's imaginary part.
        bins[0].im = 0.0;
        for (k, component) in bins.iter().enumerate() {
            frame.im[k] = magnitude(component);
        }

        let half = N / 2;
        frame.re[..half].copy_from_slice(&frame.im[..half]);
        frame.re[half..].fill(0.0);
        frame.im.fill(0.0);

        Spectrum::new(&frame.re[..half], self.sample_rate_hz)
    }

    /// View of a frame that has already been through [`Self::process`].
    pub fn spectrum<'a>(&self, frame: &'a Frame<N>) -> Spectrum<'a> {
        Spectrum::new(&frame.re[..N / 2], self.sample_rate_hz)
    }
}

/// The `N / 2` meaningful magnitudes of one transformed frame.
#[derive(Debug, Clone, Copy)]
pub struct Spectrum<'a> {
    magnitudes: &'a [f32],
    sample_rate_hz: u32,
}

impl<'a> Spectrum<'a> {
    pub fn new(magnitudes: &'a [f32], sample_rate_hz: u32) -> Self {
        Self {
            magnitudes,
            sample_rate_hz,
        }
    }

    pub fn magnitudes(&self) -> &'a [f32] {
        self.magnitudes
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Transform length this spectrum came from.
    pub fn sample_count(&self) -> usize {
        self.magnitudes.len() * 2
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn bin_frequency_hz(&self, bin: usize) -> f32 {
        bin_frequency_hz(bin, self.sample_rate_hz, self.sample_count())
    }

    /// `(bin, magnitude)` for every bin clear of the DC region.
    pub fn usable_bins(&self) -> impl Iterator<Item = (usize, f32)> + 'a {
        self.magnitudes
            .iter()
            .copied()
            .enumerate()
            .skip(FIRST_USABLE_BIN)
    }
}
