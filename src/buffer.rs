//! Whole-image conversion between an interleaved RGB byte buffer and a
//! row-major HSV buffer.
//!
//! HSV index `i` always corresponds to the RGB pixel at byte offset
//! `i * channels`. Only the first three bytes of each pixel are color; any
//! further channels (alpha, padding) are carried by the RGB buffer alone.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::color::{Hsv, Rgb8, hsv_to_rgb, rgb_to_hsv};
use crate::error::{Error, Result};
use crate::parallel;

/// Channels required for color conversion.
pub const MIN_CHANNELS: usize = 3;

/// Rows converted between cancellation checks.
pub const ROW_BATCH: usize = 64;

/// Fill value for extra channels when no source buffer is supplied (opaque alpha).
pub const OPAQUE: u8 = 255;

/// Validated shape of an interleaved image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
    width: usize,
    height: usize,
    channels: usize,
}

impl PixelLayout {
    /// Zero width or height is allowed and describes an empty image.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        if channels < MIN_CHANNELS {
            return Err(Error::TooFewChannels { channels });
        }
        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(Error::SizeOverflow {
                width,
                height,
                channels,
            })?;
        Ok(Self {
            width,
            height,
            channels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Byte length of the interleaved RGB buffer.
    pub fn rgb_len(&self) -> usize {
        self.pixel_count() * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    pub(crate) fn check_rgb(&self, rgb: &[u8]) -> Result<()> {
        check_len(self.rgb_len(), rgb.len())
    }

    pub(crate) fn check_hsv(&self, hsv: &[Hsv]) -> Result<()> {
        check_len(self.pixel_count(), hsv.len())
    }
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::BufferLength { expected, actual })
    }
}

/// Convert an interleaved RGB buffer into a new HSV buffer.
pub fn to_hsv(rgb: &[u8], layout: PixelLayout) -> Result<Vec<Hsv>> {
    layout.check_rgb(rgb)?;
    let start = web_time::Instant::now();
    let hsv = convert_rows(rgb, layout.channels);
    log::debug!(
        "RGB -> HSV: {}x{} in {:.1}ms",
        layout.width,
        layout.height,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(hsv)
}

/// Like [`to_hsv`], checking `cancel` between batches of [`ROW_BATCH`] rows.
///
/// Returns [`Error::Cancelled`] as soon as the flag is observed set.
pub fn to_hsv_cancellable(
    rgb: &[u8],
    layout: PixelLayout,
    cancel: &AtomicBool,
) -> Result<Vec<Hsv>> {
    convert_batches(rgb, layout, |_| cancel.load(Ordering::Relaxed))
}

/// Batch loop behind [`to_hsv_cancellable`]. `stop` sees the index of the
/// batch about to be converted.
fn convert_batches<S>(rgb: &[u8], layout: PixelLayout, mut stop: S) -> Result<Vec<Hsv>>
where
    S: FnMut(usize) -> bool,
{
    layout.check_rgb(rgb)?;
    let mut hsv = Vec::with_capacity(layout.pixel_count());
    let row_bytes = layout.width * layout.channels;
    if row_bytes == 0 {
        return Ok(hsv);
    }

    for (batch_index, batch) in rgb.chunks(row_bytes.saturating_mul(ROW_BATCH)).enumerate() {
        if stop(batch_index) {
            log::warn!(
                "RGB -> HSV cancelled at row {} of {}",
                batch_index * ROW_BATCH,
                layout.height
            );
            return Err(Error::Cancelled);
        }
        hsv.extend(convert_rows(batch, layout.channels));
    }
    Ok(hsv)
}

fn convert_rows(rgb: &[u8], channels: usize) -> Vec<Hsv> {
    parallel::map_pixels(rgb, channels, |pixel| rgb_to_hsv(Rgb8::from_pixel(pixel)))
}

/// Convert an HSV buffer back into a new interleaved RGB buffer.
///
/// Extra channels (index 3 and up) come from `source` when given, which must
/// have the same layout. Without a source they are set to [`OPAQUE`]; the
/// HSV buffer holds nothing to restore them from.
pub fn to_rgb(hsv: &[Hsv], layout: PixelLayout, source: Option<&[u8]>) -> Result<Vec<u8>> {
    layout.check_hsv(hsv)?;
    let mut rgb = match source {
        Some(source) => {
            layout.check_rgb(source)?;
            source.to_vec()
        }
        None => vec![OPAQUE; layout.rgb_len()],
    };

    let start = web_time::Instant::now();
    parallel::zip_pixels_mut(&mut rgb, layout.channels, hsv, |pixel, sample| {
        hsv_to_rgb(*sample).write_to(pixel);
    });
    log::debug!(
        "HSV -> RGB: {}x{} in {:.1}ms",
        layout.width,
        layout.height,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(rgb)
}
