//! Pixel geometry of the bar display.
//!
//! All scaling goes through [`map_range`], which behaves like Arduino's
//! integer `map()`: the input is truncated toward zero first and the
//! division truncates too.

use crate::profile::DisplayProfile;

/// Integer linear rescale of `x` from `in_min..in_max` to `out_min..out_max`.
/// Not clamped.
pub fn map_range(x: f32, in_min: i32, in_max: i32, out_min: i32, out_max: i32) -> i32 {
    let x = x as i64;
    let (in_min, in_max) = (in_min as i64, in_max as i64);
    let (out_min, out_max) = (out_min as i64, out_max as i64);
    if in_max == in_min {
        return out_min as i32;
    }
    ((x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min) as i32
}

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

/// Bar geometry for `bands` columns on one display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    width: u32,
    height: u32,
    header_height: u32,
    block_height: u32,
    bar_headroom: u32,
    bar_width: u32,
}

impl BarLayout {
    pub fn new(profile: &DisplayProfile, bands: usize) -> Self {
        Self {
            width: profile.width,
            height: profile.height,
            header_height: profile.header_height,
            block_height: profile.block_height.max(1),
            bar_headroom: profile.bar_headroom,
            bar_width: profile.width / bands.max(1) as u32,
        }
    }

    pub fn bar_width(&self) -> u32 {
        self.bar_width
    }

    pub fn bar_x(&self, band: usize) -> i32 {
        (band as u32 * self.bar_width) as i32
    }

    /// Bar height in pixels for a 0..100 level.
    pub fn bar_pixels(&self, level: f32) -> i32 {
        let usable = self.height.saturating_sub(self.header_height + self.bar_headroom);
        map_range(level, 0, 100, 0, usable as i32).max(0)
    }

    /// Whole blocks a bar of `level` is drawn with.
    pub fn block_count(&self, level: f32) -> usize {
        (self.bar_pixels(level) / self.block_height as i32) as usize
    }

    /// Block `block` of band `band`, counted from the bottom. Leaves a
    /// two-pixel gap to the right and above.
    pub fn block_rect(&self, band: usize, block: usize) -> Rect {
        Rect {
            x: self.bar_x(band),
            y: self.height as i32 - (block as i32 + 1) * self.block_height as i32,
            w: self.bar_width.saturating_sub(2),
            h: self.block_height.saturating_sub(2),
        }
    }

    /// Row of the peak marker, kept below the header and on screen.
    pub fn peak_y(&self, peak: f32) -> i32 {
        let top = self.header_height as i32 + 1;
        let bottom = self.height as i32 - 1;
        map_range(peak, 0, 100, self.height as i32, top).clamp(top, bottom.max(top))
    }

    pub fn peak_width(&self) -> u32 {
        self.bar_width.saturating_sub(2)
    }

    pub fn header_rect(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            w: self.width,
            h: self.header_height,
        }
    }

    /// Area under the header owned by one band.
    pub fn column_rect(&self, band: usize) -> Rect {
        Rect {
            x: self.bar_x(band),
            y: self.header_height as i32,
            w: self.bar_width.saturating_sub(1),
            h: self.height.saturating_sub(self.header_height),
        }
    }
}
