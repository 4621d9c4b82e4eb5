#![no_std]
//! Bar display for `bandscope-dsp` snapshots.
//!
//! [`SpectrumRenderer`] turns a [`bandscope_dsp::Snapshot`] into block bars,
//! peak markers and a dB/Hz header, drawn through any [`RenderSink`].
//! [`FramebufferSink`] adapts an embedded-graphics `DrawTarget`.

#[cfg(feature = "logging")]
use defmt_rtt as _;

pub mod color_strategy;
pub mod layout;
pub mod profile;
pub mod renderer;
pub mod sink;

pub use color_strategy::{ColorContext, ColorMode, ColorStrategy};
pub use layout::{map_range, BarLayout, Rect};
pub use profile::{ClearStrategy, DisplayProfile};
pub use renderer::SpectrumRenderer;
pub use sink::{FramebufferSink, FromRgb, RenderSink};
