use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, GenericImageView, ImageFormat};

use crate::buffer::PixelLayout;
use crate::error::{Error, Result};

/// JPEG output is written at full quality.
pub const JPEG_QUALITY: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpg,
    Png,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Jpg => "JPEG",
            OutputFormat::Png => "PNG",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
        }
    }

    /// Guess the format from a file extension, if it is one we write.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(OutputFormat::Jpg),
            "png" => Some(OutputFormat::Png),
            _ => None,
        }
    }
}

/// A decoded image as an interleaved 8-bit buffer.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub layout: PixelLayout,
}

pub fn load_image(path: &Path) -> Result<DecodedImage> {
    let img = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = from_dynamic(&img)?;
    if decoded.layout.is_empty() {
        return Err(Error::EmptyImage {
            path: path.to_path_buf(),
        });
    }
    log::info!(
        "Loaded {}: {}x{}, {} channels",
        path.display(),
        decoded.layout.width(),
        decoded.layout.height(),
        decoded.layout.channels()
    );
    Ok(decoded)
}

/// Flatten any decoded image to RGBA8 when it carries alpha, RGB8 otherwise.
pub fn from_dynamic(img: &DynamicImage) -> Result<DecodedImage> {
    let (w, h) = img.dimensions();
    let (bytes, channels) = if img.color().has_alpha() {
        (img.to_rgba8().into_raw(), 4)
    } else {
        (img.to_rgb8().into_raw(), 3)
    };
    let layout = PixelLayout::new(w as usize, h as usize, channels)?;
    Ok(DecodedImage { bytes, layout })
}

/// Write an interleaved buffer. JPEG has no alpha, so extra channels are dropped;
/// PNG keeps a fourth channel as alpha.
pub fn save_image(
    bytes: &[u8],
    layout: PixelLayout,
    path: &Path,
    format: OutputFormat,
) -> Result<()> {
    layout.check_rgb(bytes)?;
    let (w, h) = dimensions_u32(layout)?;
    let encode_err = |source| Error::Encode {
        path: path.to_path_buf(),
        source,
    };
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };

    match format {
        OutputFormat::Jpg => {
            let rgb = color_only(bytes, layout);
            let file = File::create(path).map_err(io_err)?;
            let mut writer = BufWriter::new(file);
            JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
                .encode(&rgb, w, h, ExtendedColorType::Rgb8)
                .map_err(encode_err)?;
            writer.flush().map_err(io_err)?;
        }
        OutputFormat::Png => {
            let (data, color) = if layout.channels() == 4 {
                (Cow::Borrowed(bytes), ExtendedColorType::Rgba8)
            } else {
                (color_only(bytes, layout), ExtendedColorType::Rgb8)
            };
            image::save_buffer_with_format(path, &data, w, h, color, ImageFormat::Png)
                .map_err(encode_err)?;
        }
    }
    log::info!("Wrote {} ({})", path.display(), format.name());
    Ok(())
}

/// Derive the output name the CLI writes to: the input name with its last
/// extension replaced by `_new.<ext>`.
pub fn output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_new.{}", format.extension()))
}

fn dimensions_u32(layout: PixelLayout) -> Result<(u32, u32)> {
    let overflow = || Error::SizeOverflow {
        width: layout.width(),
        height: layout.height(),
        channels: layout.channels(),
    };
    let w = u32::try_from(layout.width()).map_err(|_| overflow())?;
    let h = u32::try_from(layout.height()).map_err(|_| overflow())?;
    Ok((w, h))
}

/// The first three bytes of every pixel, borrowed when there is nothing to strip.
fn color_only(bytes: &[u8], layout: PixelLayout) -> Cow<'_, [u8]> {
    if layout.channels() == 3 {
        return Cow::Borrowed(bytes);
    }
    let mut rgb = Vec::with_capacity(layout.pixel_count() * 3);
    for pixel in bytes.chunks_exact(layout.channels()) {
        rgb.extend_from_slice(&pixel[..3]);
    }
    Cow::Owned(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_strips_last_extension() {
        assert_eq!(
            output_path(Path::new("/tmp/photo.png"), OutputFormat::Jpg),
            PathBuf::from("/tmp/photo_new.jpg")
        );
        assert_eq!(
            output_path(Path::new("archive.tar.png"), OutputFormat::Png),
            PathBuf::from("archive.tar_new.png")
        );
        assert_eq!(
            output_path(Path::new("noext"), OutputFormat::Png),
            PathBuf::from("noext_new.png")
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a.JPEG")), Some(OutputFormat::Jpg));
        assert_eq!(OutputFormat::from_path(Path::new("a.png")), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_path(Path::new("a.tiff")), None);
        assert_eq!(OutputFormat::from_path(Path::new("a")), None);
    }

    #[test]
    fn test_color_only_strips_alpha() {
        let layout = PixelLayout::new(2, 1, 4).unwrap();
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(&*color_only(&bytes, layout), &[1, 2, 3, 5, 6, 7]);
    }

    #[test]
    fn test_from_dynamic_picks_channel_count() {
        let rgb = DynamicImage::ImageRgb8(image::RgbImage::new(3, 2));
        let decoded = from_dynamic(&rgb).unwrap();
        assert_eq!(decoded.layout.channels(), 3);
        assert_eq!(decoded.bytes.len(), 18);

        let rgba = DynamicImage::ImageRgba8(image::RgbaImage::new(3, 2));
        assert_eq!(from_dynamic(&rgba).unwrap().layout.channels(), 4);

        let gray = DynamicImage::ImageLuma8(image::GrayImage::new(3, 2));
        assert_eq!(from_dynamic(&gray).unwrap().layout.channels(), 3);
    }
}
