use std::sync::atomic::AtomicBool;

use crate::adjust;
use crate::buffer::{self, PixelLayout};
use crate::error::Result;

/// All adjustment parameters controlled by the user.
///
/// `Default` is the identity: running it only performs the RGB -> HSV -> RGB
/// round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustments {
    // RGB domain, applied before conversion
    pub red_offset: i32,
    pub green_offset: i32,
    pub blue_offset: i32,
    pub brightness: i32,
    pub contrast: f32,

    // HSV domain
    pub hue_degrees: f32,
    pub saturation_scale: f32,
    pub saturation_delta: f32,
    pub value_scale: f32,
    pub value_delta: f32,
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            red_offset: 0,
            green_offset: 0,
            blue_offset: 0,
            brightness: 0,
            contrast: 1.0,

            hue_degrees: 0.0,
            saturation_scale: 1.0,
            saturation_delta: 0.0,
            value_scale: 1.0,
            value_delta: 0.0,
        }
    }
}

impl Adjustments {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Run the full adjustment pipeline on an interleaved RGB buffer.
/// Returns a new buffer with the same layout; extra channels pass through.
pub fn process(rgb: &[u8], layout: PixelLayout, adjustments: &Adjustments) -> Result<Vec<u8>> {
    run(rgb, layout, adjustments, None)
}

/// Like [`process`], but gives up with [`crate::Error::Cancelled`] once `cancel` is set.
pub fn process_cancellable(
    rgb: &[u8],
    layout: PixelLayout,
    adjustments: &Adjustments,
    cancel: &AtomicBool,
) -> Result<Vec<u8>> {
    run(rgb, layout, adjustments, Some(cancel))
}

fn run(
    rgb: &[u8],
    layout: PixelLayout,
    adjustments: &Adjustments,
    cancel: Option<&AtomicBool>,
) -> Result<Vec<u8>> {
    layout.check_rgb(rgb)?;
    let start = web_time::Instant::now();
    log::debug!(
        "processing {}x{} ({} channels) with {:?}",
        layout.width(),
        layout.height(),
        layout.channels(),
        adjustments
    );

    // Step 1: RGB-domain adjustments on a working copy
    let mut working = rgb.to_vec();
    adjust::rgb::offset_channels(
        &mut working,
        layout,
        adjustments.red_offset,
        adjustments.green_offset,
        adjustments.blue_offset,
    )?;
    adjust::rgb::brightness(&mut working, layout, adjustments.brightness)?;
    adjust::rgb::contrast(&mut working, layout, adjustments.contrast)?;

    // Step 2: RGB -> HSV
    let mut hsv = match cancel {
        Some(flag) => buffer::to_hsv_cancellable(&working, layout, flag)?,
        None => buffer::to_hsv(&working, layout)?,
    };

    // Step 3: HSV-domain adjustments, scale before shift
    adjust::hsv::rotate_hue(&mut hsv, adjustments.hue_degrees);
    adjust::hsv::scale_saturation(&mut hsv, adjustments.saturation_scale);
    adjust::hsv::shift_saturation(&mut hsv, adjustments.saturation_delta);
    adjust::hsv::scale_value(&mut hsv, adjustments.value_scale);
    adjust::hsv::shift_value(&mut hsv, adjustments.value_delta);

    // Step 4: HSV -> RGB, extra channels taken from the working copy
    let out = buffer::to_rgb(&hsv, layout, Some(&working))?;

    log::info!(
        "Processing took {:.1}ms",
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(out)
}

/// Largest per-byte difference tolerated by [`identity_check`].
pub const IDENTITY_TOLERANCE: u8 = 1;

/// Outcome of comparing an image with its round-tripped copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityReport {
    pub max_difference: u8,
    /// Index of the first pixel with a byte outside [`IDENTITY_TOLERANCE`].
    pub first_mismatch: Option<usize>,
}

impl IdentityReport {
    pub fn passed(&self) -> bool {
        self.first_mismatch.is_none()
    }
}

/// Compare two buffers of the same layout byte by byte.
pub fn identity_check(
    original: &[u8],
    roundtrip: &[u8],
    layout: PixelLayout,
) -> Result<IdentityReport> {
    layout.check_rgb(original)?;
    layout.check_rgb(roundtrip)?;

    let mut report = IdentityReport {
        max_difference: 0,
        first_mismatch: None,
    };
    for (i, (a, b)) in original.iter().zip(roundtrip).enumerate() {
        let diff = a.abs_diff(*b);
        report.max_difference = report.max_difference.max(diff);
        if diff > IDENTITY_TOLERANCE && report.first_mismatch.is_none() {
            report.first_mismatch = Some(i / layout.channels());
        }
    }
    Ok(report)
}

/// Round-trip `rgb` through HSV without adjustments and compare.
pub fn identity_test(rgb: &[u8], layout: PixelLayout) -> Result<IdentityReport> {
    let roundtrip = process(rgb, layout, &Adjustments::default())?;
    let report = identity_check(rgb, &roundtrip, layout)?;
    match report.first_mismatch {
        None => log::info!(
            "Image within +/-{IDENTITY_TOLERANCE} rgb value (max difference {})",
            report.max_difference
        ),
        Some(pixel) => log::warn!(
            "Pixel {pixel} differs by more than {IDENTITY_TOLERANCE} after round trip"
        ),
    }
    Ok(report)
}
