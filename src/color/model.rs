//! Pixel color types.
//!
//! [`Rgb8`] is one device-RGB pixel with 8-bit samples. [`Hsv`] is its
//! hue/saturation/value form: hue in degrees within `[0, 360)`, saturation
//! and value as fractions within `[0.0, 1.0]`.

/// Degrees in one full hue turn.
pub const HUE_TURN: f32 = 360.0;

/// Pivot used by the contrast operator.
pub const CONTRAST_MIDPOINT: f32 = 128.0;

/// One RGB pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Read the color samples of an interleaved pixel.
    ///
    /// # Panics
    ///
    /// If `pixel` is shorter than three bytes. Callers slice pixels from a
    /// validated `PixelLayout`, which has at least three channels.
    #[inline]
    pub(crate) fn from_pixel(pixel: &[u8]) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }

    /// Write the color samples into an interleaved pixel, leaving any
    /// trailing channels untouched. Panics like [`Rgb8::from_pixel`].
    #[inline]
    pub(crate) fn write_to(self, pixel: &mut [u8]) {
        pixel[..3].copy_from_slice(&self.to_array());
    }

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Add a per-channel offset, clamping each sample to `0..=255`.
    pub fn offset(self, red: i32, green: i32, blue: i32) -> Self {
        Self::new(
            offset_sample(self.r, red),
            offset_sample(self.g, green),
            offset_sample(self.b, blue),
        )
    }

    /// Add the same offset to all three channels.
    pub fn brighten(self, amount: i32) -> Self {
        self.offset(amount, amount, amount)
    }

    /// Scale each channel's distance from the midpoint by `factor`.
    /// Results are rounded to nearest, then clamped.
    pub fn contrast(self, factor: f32) -> Self {
        Self::new(
            contrast_sample(self.r, factor),
            contrast_sample(self.g, factor),
            contrast_sample(self.b, factor),
        )
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

fn offset_sample(sample: u8, offset: i32) -> u8 {
    (sample as i32).saturating_add(offset).clamp(0, 255) as u8
}

fn contrast_sample(sample: u8, factor: f32) -> u8 {
    ((sample as f32 - CONTRAST_MIDPOINT) * factor + CONTRAST_MIDPOINT)
        .round()
        .clamp(0.0, 255.0) as u8
}

/// One HSV pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    /// Degrees, `[0, 360)` once normalized.
    pub hue: f32,
    /// `0.0..=1.0`
    pub saturation: f32,
    /// `0.0..=1.0`
    pub value: f32,
}

impl Hsv {
    pub const fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue,
            saturation,
            value,
        }
    }

    /// Rotate the hue around the color wheel. Wraps, never clamps.
    pub fn rotate_hue(self, degrees: f32) -> Self {
        Self {
            hue: normalize_hue(self.hue + degrees),
            ..self
        }
    }

    pub fn shift_saturation(self, delta: f32) -> Self {
        Self {
            saturation: (self.saturation + delta).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn shift_value(self, delta: f32) -> Self {
        Self {
            value: (self.value + delta).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn scale_saturation(self, factor: f32) -> Self {
        Self {
            saturation: (self.saturation * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn scale_value(self, factor: f32) -> Self {
        Self {
            value: (self.value * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Wrap any hue in degrees into `[0, 360)`.
#[inline]
pub fn normalize_hue(hue: f32) -> f32 {
    let wrapped = hue.rem_euclid(HUE_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= HUE_TURN { 0.0 } else { wrapped }
}
