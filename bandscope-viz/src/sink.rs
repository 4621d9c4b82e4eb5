use embedded_graphics::{
    mono_font::{ascii::FONT_5X7, MonoTextStyle},
    pixelcolor::{BinaryColor, Rgb565, Rgb888},
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

/// The drawing capabilities the visualizer needs from a display.
///
/// Colors are given as `Rgb888`; how they land on the panel (dithered,
/// thresholded, converted to 565) is the sink's business. Text is always
/// drawn in the sink's foreground color.
pub trait RenderSink {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb888)
        -> Result<(), Self::Error>;
    /// Horizontal line `w` pixels long starting at `(x, y)`.
    fn draw_line(&mut self, x: i32, y: i32, w: u32, color: Rgb888) -> Result<(), Self::Error>;
    /// `y` is the top of the text.
    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error>;
    /// Hand the finished frame to the panel.
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// Native color of a draw target, derived from the renderer's `Rgb888`.
pub trait FromRgb: PixelColor {
    fn from_rgb(color: Rgb888) -> Self;
}

impl FromRgb for Rgb888 {
    fn from_rgb(color: Rgb888) -> Self {
        color
    }
}

impl FromRgb for Rgb565 {
    fn from_rgb(color: Rgb888) -> Self {
        Rgb565::from(color)
    }
}

impl FromRgb for BinaryColor {
    /// Anything that is not black lights the pixel.
    fn from_rgb(color: Rgb888) -> Self {
        if color == Rgb888::BLACK {
            BinaryColor::Off
        } else {
            BinaryColor::On
        }
    }
}

/// [`RenderSink`] over any embedded-graphics framebuffer.
///
/// `present` only counts frames; a buffered target is pushed to its panel
/// by whoever owns it (see `into_inner`/`target_mut`).
pub struct FramebufferSink<D> {
    target: D,
    frames: u32,
}

impl<D> FramebufferSink<D>
where
    D: DrawTarget,
    D::Color: FromRgb,
{
    pub fn new(target: D) -> Self {
        Self { target, frames: 0 }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    /// Frames presented so far, wrapping.
    pub fn frames(&self) -> u32 {
        self.frames
    }
}

impl<D> RenderSink for FramebufferSink<D>
where
    D: DrawTarget,
    D::Color: FromRgb,
{
    type Error = D::Error;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.target.clear(D::Color::from_rgb(Rgb888::BLACK))
    }

    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        w: u32,
        h: u32,
        color: Rgb888,
    ) -> Result<(), Self::Error> {
        if w == 0 || h == 0 {
            return Ok(());
        }
        Rectangle::new(Point::new(x, y), Size::new(w, h))
            .into_styled(PrimitiveStyle::with_fill(D::Color::from_rgb(color)))
            .draw(&mut self.target)
    }

    fn draw_line(&mut self, x: i32, y: i32, w: u32, color: Rgb888) -> Result<(), Self::Error> {
        if w == 0 {
            return Ok(());
        }
        Line::new(Point::new(x, y), Point::new(x + w as i32 - 1, y))
            .into_styled(PrimitiveStyle::with_stroke(D::Color::from_rgb(color), 1))
            .draw(&mut self.target)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) -> Result<(), Self::Error> {
        let style = MonoTextStyle::new(&FONT_5X7, D::Color::from_rgb(Rgb888::WHITE));
        Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.target)?;
        Ok(())
    }

    fn present(&mut self) -> Result<(), Self::Error> {
        self.frames = self.frames.wrapping_add(1);
        Ok(())
    }
}
