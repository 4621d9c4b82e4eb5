#![allow(dead_code)]

use std::convert::Infallible;
use std::f32::consts::PI;
use std::ops::Range;

use bandscope_dsp::config::{
    BAND_COUNT, BAND_EDGES, PEAK_TIME_INTERVAL_MS, SAMPLE_COUNT, SAMPLE_RATE_HZ,
};
use bandscope_dsp::{Analyzer, LevelConfig};
use embedded_graphics::{pixelcolor::PixelColor, prelude::*};

/// In-memory framebuffer; pixels outside the screen are dropped.
pub struct Canvas<C, const W: usize, const H: usize> {
    pixels: [[C; W]; H],
}

impl<C: PixelColor, const W: usize, const H: usize> Canvas<C, W, H> {
    pub fn new(background: C) -> Self {
        Self {
            pixels: [[background; W]; H],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> C {
        self.pixels[y][x]
    }

    pub fn count_in(&self, xs: Range<usize>, ys: Range<usize>, color: C) -> usize {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixels[y][x] == color)
            .count()
    }
}

impl<C: PixelColor, const W: usize, const H: usize> OriginDimensions for Canvas<C, W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<C: PixelColor, const W: usize, const H: usize> DrawTarget for Canvas<C, W, H> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as usize) < W && (p.y as usize) < H {
                self.pixels[p.y as usize][p.x as usize] = color;
            }
        }
        Ok(())
    }
}

pub fn analyzer(levels: LevelConfig) -> Analyzer<SAMPLE_COUNT, BAND_COUNT> {
    Analyzer::new(SAMPLE_RATE_HZ, &BAND_EDGES, levels, PEAK_TIME_INTERVAL_MS).unwrap()
}

/// A frame with a whole number of periods landing on `bin`.
pub fn bin_tone(bin: usize, amplitude: f32) -> [f32; SAMPLE_COUNT] {
    let mut samples = [0.0; SAMPLE_COUNT];
    for (i, s) in samples.iter_mut().enumerate() {
        *s = amplitude * (2.0 * PI * bin as f32 * i as f32 / SAMPLE_COUNT as f32).sin();
    }
    samples
}
