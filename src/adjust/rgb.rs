use crate::buffer::PixelLayout;
use crate::color::Rgb8;
use crate::error::Result;
use crate::parallel;

/// Apply per-channel offsets. Samples clamp to `0..=255`.
pub fn offset_channels(
    image: &mut [u8],
    layout: PixelLayout,
    red: i32,
    green: i32,
    blue: i32,
) -> Result<()> {
    layout.check_rgb(image)?;
    if red == 0 && green == 0 && blue == 0 {
        return Ok(());
    }
    map_color(image, layout, |px| px.offset(red, green, blue));
    Ok(())
}

/// Shift all three channels by `amount`.
pub fn brightness(image: &mut [u8], layout: PixelLayout, amount: i32) -> Result<()> {
    layout.check_rgb(image)?;
    if amount == 0 {
        return Ok(());
    }
    map_color(image, layout, |px| px.brighten(amount));
    Ok(())
}

/// Contrast around the 128 midpoint. `factor` is usually 0.5 to 1.5.
pub fn contrast(image: &mut [u8], layout: PixelLayout, factor: f32) -> Result<()> {
    layout.check_rgb(image)?;
    if factor == 1.0 {
        return Ok(());
    }
    map_color(image, layout, |px| px.contrast(factor));
    Ok(())
}

/// Rewrite the color bytes of every pixel; extra channels are left alone.
/// `image` has already been checked against `layout`.
fn map_color<F>(image: &mut [u8], layout: PixelLayout, f: F)
where
    F: Fn(Rgb8) -> Rgb8 + Sync + Send,
{
    parallel::for_each_pixel_mut(image, layout.channels(), |pixel| {
        f(Rgb8::from_pixel(pixel)).write_to(pixel);
    });
}
