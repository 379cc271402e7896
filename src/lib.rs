//! HSV tone adjustment - library crate.
//!
//! Converts interleaved 8-bit RGB buffers to HSV and back, with RGB-domain
//! (channel offset, brightness, contrast) and HSV-domain (hue, saturation,
//! value) adjustments in between. Used by the GUI and the command-line
//! front ends.

pub mod adjust;
pub mod buffer;
pub mod color;
pub mod error;
pub mod image_io;
mod parallel;
pub mod pipeline;

pub use buffer::PixelLayout;
pub use color::{Hsv, Rgb8};
pub use error::{Error, Result};
pub use pipeline::Adjustments;
