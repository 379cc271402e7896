//! Headless front end: load an image, adjust it, write it back out.
//!
//! Usage: hsv_tone_cli photo.png --format png --hue 30 --value -0.1

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use hsv_tone::image_io::{self, OutputFormat};
use hsv_tone::pipeline::{self, Adjustments, IDENTITY_TOLERANCE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Jpg,
    Png,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Jpg => OutputFormat::Jpg,
            Format::Png => OutputFormat::Png,
        }
    }
}

#[derive(Parser)]
#[command(name = "hsv_tone_cli")]
#[command(about = "Adjust an image in RGB and HSV space")]
struct Cli {
    /// Input image (any format the decoder understands)
    input: PathBuf,

    /// Output type [default: from the --output extension, else jpg]
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Output path [default: <input stem>_new.<format>]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Red channel offset
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    red: i32,

    /// Green channel offset
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    green: i32,

    /// Blue channel offset
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    blue: i32,

    /// Offset added to all three channels
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    brightness: i32,

    /// Contrast factor around the 128 midpoint, usually 0.5 to 1.5
    #[arg(long, default_value_t = 1.0)]
    contrast: f32,

    /// Hue rotation in degrees
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    hue: f32,

    /// Saturation offset, -1.0 to 1.0
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    saturation: f32,

    /// Saturation multiplier
    #[arg(long, default_value_t = 1.0)]
    saturation_scale: f32,

    /// Value offset, -1.0 to 1.0
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    value: f32,

    /// Value multiplier
    #[arg(long, default_value_t = 1.0)]
    value_scale: f32,

    /// Round-trip the image without adjustments and check every byte is within +/-1
    #[arg(long)]
    identity_test: bool,
}

impl Cli {
    /// Explicit `--format`, then the `--output` extension, then JPEG.
    fn output_format(&self) -> OutputFormat {
        self.format
            .map(OutputFormat::from)
            .or_else(|| self.output.as_deref().and_then(OutputFormat::from_path))
            .unwrap_or(OutputFormat::Jpg)
    }

    fn adjustments(&self) -> Adjustments {
        Adjustments {
            red_offset: self.red,
            green_offset: self.green,
            blue_offset: self.blue,
            brightness: self.brightness,
            contrast: self.contrast,
            hue_degrees: self.hue,
            saturation_scale: self.saturation_scale,
            saturation_delta: self.saturation,
            value_scale: self.value_scale,
            value_delta: self.value,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run(&Cli::parse())
}

fn run(cli: &Cli) -> Result<()> {
    let format = cli.output_format();

    let image = image_io::load_image(&cli.input)
        .with_context(|| format!("Error loading image {}", cli.input.display()))?;

    println!("Filename: {}", cli.input.display());
    println!("Output type: {}", format.extension());
    println!("Width: {}", image.layout.width());
    println!("Height: {}", image.layout.height());
    println!("Channels: {}", image.layout.channels());

    if cli.identity_test {
        let report = pipeline::identity_test(&image.bytes, image.layout)?;
        if let Some(pixel) = report.first_mismatch {
            bail!(
                "pixel {pixel} differs by {} after the HSV round trip (tolerance {IDENTITY_TOLERANCE})",
                report.max_difference
            );
        }
        println!("Image within +/-{IDENTITY_TOLERANCE} rgb value");
        return Ok(());
    }

    let adjustments = cli.adjustments();
    if adjustments.is_identity() {
        log::info!("No adjustments given, writing the round-tripped image");
    }
    let adjusted = pipeline::process(&image.bytes, image.layout, &adjustments)?;

    let path = cli
        .output
        .clone()
        .unwrap_or_else(|| image_io::output_path(&cli.input, format));
    image_io::save_image(&adjusted, image.layout, &path, format)
        .with_context(|| format!("Error writing {}", path.display()))?;
    println!("Wrote {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("hsv_tone_cli").chain(args.iter().copied()))
    }

    #[test]
    fn test_output_format_resolution() {
        assert_eq!(cli(&["in.png"]).output_format(), OutputFormat::Jpg);
        assert_eq!(cli(&["in.png", "-o", "out.png"]).output_format(), OutputFormat::Png);
        assert_eq!(cli(&["in.png", "-o", "out.JPEG"]).output_format(), OutputFormat::Jpg);
        assert_eq!(cli(&["in.png", "-o", "out.tiff"]).output_format(), OutputFormat::Jpg);
        assert_eq!(
            cli(&["in.png", "-o", "out.png", "-f", "jpg"]).output_format(),
            OutputFormat::Jpg
        );
        assert_eq!(cli(&["in.jpg", "--format", "png"]).output_format(), OutputFormat::Png);
    }

    #[test]
    fn test_png_output_path_writes_png_with_alpha() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        RgbaImage::from_fn(4, 4, |x, y| Rgba([x as u8 * 60, y as u8 * 60, 90, 17 + x as u8]))
            .save(&input)
            .unwrap();
        let output = dir.path().join("out.png");

        let args = cli(&[
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "--hue",
            "45",
        ]);
        run(&args).unwrap();

        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Png);
        let written = image_io::load_image(&output).unwrap();
        assert_eq!(written.layout.channels(), 4);
        assert_eq!(written.bytes[3], 17);
    }

    #[test]
    fn test_default_output_is_jpeg_next_to_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("photo.png");
        RgbaImage::from_pixel(4, 4, Rgba([200, 100, 50, 255]))
            .save(&input)
            .unwrap();

        run(&cli(&[input.to_str().unwrap()])).unwrap();

        let bytes = std::fs::read(dir.path().join("photo_new.jpg")).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    }
}
