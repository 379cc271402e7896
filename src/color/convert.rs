//! Per-pixel RGB <-> HSV conversion.

use super::model::{Hsv, Rgb8, normalize_hue};

/// Below this channel spread a pixel is treated as gray and gets no hue.
pub const ACHROMATIC_EPSILON: f32 = 1e-5;

/// Convert one RGB pixel to HSV.
///
/// When two channels tie for the maximum, red wins over green and green
/// over blue.
pub fn rgb_to_hsv(rgb: Rgb8) -> Hsv {
    let r = rgb.r as f32 / 255.0;
    let g = rgb.g as f32 / 255.0;
    let b = rgb.b as f32 / 255.0;

    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);
    let delta = cmax - cmin;

    // Gray, black and white: must return before dividing by delta
    if delta < ACHROMATIC_EPSILON {
        return Hsv::new(0.0, 0.0, cmax);
    }

    let sextant = if r == cmax {
        ((g - b) / delta).rem_euclid(6.0)
    } else if g == cmax {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsv::new(normalize_hue(60.0 * sextant), delta / cmax, cmax)
}

/// Convert one HSV pixel back to RGB.
///
/// Hue may lie outside `[0, 360)`. Samples are rounded to nearest after
/// clamping, so float overshoot never wraps.
pub fn hsv_to_rgb(hsv: Hsv) -> Rgb8 {
    let chroma = hsv.value * hsv.saturation;

    let mut hue_prime = normalize_hue(hsv.hue) / 60.0;
    if hue_prime >= 6.0 {
        hue_prime = 0.0;
    }
    let x = chroma * (1.0 - ((hue_prime % 2.0) - 1.0).abs());

    let (r1, g1, b1) = match hue_prime as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = hsv.value - chroma;
    Rgb8::new(to_sample(r1 + m), to_sample(g1 + m), to_sample(b1 + m))
}

#[inline]
fn to_sample(channel: f32) -> u8 {
    (channel * 255.0).clamp(0.0, 255.0).round() as u8
}

impl From<Rgb8> for Hsv {
    fn from(rgb: Rgb8) -> Self {
        rgb_to_hsv(rgb)
    }
}

impl From<Hsv> for Rgb8 {
    fn from(hsv: Hsv) -> Self {
        hsv_to_rgb(hsv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_hsv(actual: Hsv, hue: f32, saturation: f32, value: f32) {
        assert_abs_diff_eq!(actual.hue, hue, epsilon = 1e-3);
        assert_abs_diff_eq!(actual.saturation, saturation, epsilon = 1e-5);
        assert_abs_diff_eq!(actual.value, value, epsilon = 1e-5);
    }

    #[test]
    fn test_primaries_and_secondaries() {
        assert_hsv(rgb_to_hsv(Rgb8::new(255, 0, 0)), 0.0, 1.0, 1.0);
        assert_hsv(rgb_to_hsv(Rgb8::new(255, 255, 0)), 60.0, 1.0, 1.0);
        assert_hsv(rgb_to_hsv(Rgb8::new(0, 255, 0)), 120.0, 1.0, 1.0);
        assert_hsv(rgb_to_hsv(Rgb8::new(0, 255, 255)), 180.0, 1.0, 1.0);
        assert_hsv(rgb_to_hsv(Rgb8::new(0, 0, 255)), 240.0, 1.0, 1.0);
        assert_hsv(rgb_to_hsv(Rgb8::new(255, 0, 255)), 300.0, 1.0, 1.0);
    }

    #[test]
    fn test_mid_gray() {
        let hsv = rgb_to_hsv(Rgb8::new(128, 128, 128));
        assert_eq!(hsv.hue, 0.0);
        assert_eq!(hsv.saturation, 0.0);
        assert_abs_diff_eq!(hsv.value, 0.502, epsilon = 1e-3);
    }

    #[test]
    fn test_achromatic_has_no_hue() {
        for v in 0..=255u8 {
            let hsv = rgb_to_hsv(Rgb8::new(v, v, v));
            assert_eq!(hsv.hue, 0.0, "gray {v}");
            assert_eq!(hsv.saturation, 0.0, "gray {v}");
            assert_abs_diff_eq!(hsv.value, v as f32 / 255.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_red_dominant_negative_sextant_wraps() {
        // blue > green with red max lands just below 360
        let hsv = rgb_to_hsv(Rgb8::new(255, 0, 1));
        assert!(hsv.hue > 359.0 && hsv.hue < 360.0, "got {}", hsv.hue);
    }

    #[test]
    fn test_output_ranges() {
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(15) {
                for b in (0..=255u16).step_by(15) {
                    let hsv = rgb_to_hsv(Rgb8::new(r as u8, g as u8, b as u8));
                    assert!((0.0..360.0).contains(&hsv.hue));
                    assert!((0.0..=1.0).contains(&hsv.saturation));
                    assert!((0.0..=1.0).contains(&hsv.value));
                }
            }
        }
    }

    #[test]
    fn test_hsv_to_rgb_sextants() {
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 1.0, 1.0)), Rgb8::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(60.0, 1.0, 1.0)), Rgb8::new(255, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(120.0, 1.0, 1.0)), Rgb8::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(180.0, 1.0, 1.0)), Rgb8::new(0, 255, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(240.0, 1.0, 1.0)), Rgb8::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(300.0, 1.0, 1.0)), Rgb8::new(255, 0, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(30.0, 1.0, 1.0)), Rgb8::new(255, 128, 0));
    }

    #[test]
    fn test_hue_360_is_red() {
        assert_eq!(hsv_to_rgb(Hsv::new(360.0, 1.0, 1.0)), Rgb8::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(720.0, 1.0, 1.0)), Rgb8::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(-120.0, 1.0, 1.0)), Rgb8::new(0, 0, 255));
    }

    #[test]
    fn test_out_of_range_inputs_clamp() {
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 0.0, 2.0)), Rgb8::new(255, 255, 255));
        assert_eq!(hsv_to_rgb(Hsv::new(0.0, 0.0, -1.0)), Rgb8::new(0, 0, 0));
        assert_eq!(hsv_to_rgb(Hsv::new(f32::NAN, 0.0, 0.0)), Rgb8::new(0, 0, 0));
    }

    /// Every sampled triple survives the round trip within one step.
    #[test]
    fn test_round_trip_within_one() {
        let mut max_error = 0i32;
        for r in (0..=255u16).step_by(3) {
            for g in (0..=255u16).step_by(3) {
                for b in (0..=255u16).step_by(3) {
                    let original = Rgb8::new(r as u8, g as u8, b as u8);
                    let back = hsv_to_rgb(rgb_to_hsv(original));
                    for (a, z) in original.to_array().iter().zip(back.to_array()) {
                        max_error = max_error.max((*a as i32 - z as i32).abs());
                    }
                    assert!(max_error <= 1, "{original:?} -> {back:?}");
                }
            }
        }
    }

    #[test]
    fn test_round_trip_edges() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            for original in [
                Rgb8::new(v, 0, 255),
                Rgb8::new(255, v, 0),
                Rgb8::new(0, 255, v),
                Rgb8::new(v, v, v),
            ] {
                let back: Rgb8 = Hsv::from(original).into();
                for (a, z) in original.to_array().iter().zip(back.to_array()) {
                    assert!((*a as i32 - z as i32).abs() <= 1, "{original:?} -> {back:?}");
                }
            }
        }
    }

    #[test]
    fn test_darkened_gray_stays_gray() {
        let hsv = rgb_to_hsv(Rgb8::new(128, 128, 128)).shift_value(-0.3);
        let out = hsv_to_rgb(hsv);
        assert_eq!(out.r, out.g);
        assert_eq!(out.g, out.b);
        assert!(out.r < 128);
        // (128/255 - 0.3) * 255 = 51.5
        assert!((51..=52).contains(&out.r), "got {}", out.r);
    }
}
