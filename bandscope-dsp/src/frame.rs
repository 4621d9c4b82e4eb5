/// One window of audio, reused every cycle.
///
/// The sampler fills `re` with centered samples and zeroes `im`; the
/// spectral transform then overwrites `re[..N / 2]` with bin magnitudes.
/// Nothing in here survives to the next cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<const N: usize> {
    pub re: [f32; N],
    pub im: [f32; N],
}

impl<const N: usize> Frame<N> {
    pub const fn new() -> Self {
        Self {
            re: [0.0; N],
            im: [0.0; N],
        }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Load already-centered samples, e.g. from a test signal.
    /// Extra input is ignored; missing samples are zero.
    pub fn load(&mut self, samples: &[f32]) {
        self.re.fill(0.0);
        self.im.fill(0.0);
        for (dst, &src) in self.re.iter_mut().zip(samples) {
            *dst = src;
        }
    }
}

impl<const N: usize> Default for Frame<N> {
    fn default() -> Self {
        Self::new()
    }
}
