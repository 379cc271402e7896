use crate::color::Hsv;
use crate::parallel;

/// Rotate every hue by `degrees`, wrapping into `[0, 360)`.
pub fn rotate_hue(pixels: &mut [Hsv], degrees: f32) {
    if degrees == 0.0 {
        return;
    }
    parallel::for_each_mut(pixels, |p| *p = p.rotate_hue(degrees));
}

/// Add `delta` to saturation, clamped to `[0, 1]`.
pub fn shift_saturation(pixels: &mut [Hsv], delta: f32) {
    if delta == 0.0 {
        return;
    }
    parallel::for_each_mut(pixels, |p| *p = p.shift_saturation(delta));
}

/// Add `delta` to value, clamped to `[0, 1]`.
pub fn shift_value(pixels: &mut [Hsv], delta: f32) {
    if delta == 0.0 {
        return;
    }
    parallel::for_each_mut(pixels, |p| *p = p.shift_value(delta));
}

pub fn scale_saturation(pixels: &mut [Hsv], factor: f32) {
    if factor == 1.0 {
        return;
    }
    parallel::for_each_mut(pixels, |p| *p = p.scale_saturation(factor));
}

pub fn scale_value(pixels: &mut [Hsv], factor: f32) {
    if factor == 1.0 {
        return;
    }
    parallel::for_each_mut(pixels, |p| *p = p.scale_value(factor));
}
