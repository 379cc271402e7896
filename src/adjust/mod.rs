//! Pixel-wise tonal adjustments.
//!
//! [`rgb`] operators work in place on interleaved byte buffers and are meant
//! to run before the HSV conversion; [`hsv`] operators work in place on the
//! HSV buffer. The two families do not commute: an HSV round trip between
//! them is lossy.

pub mod hsv;
pub mod rgb;
