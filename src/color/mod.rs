pub mod convert;
pub mod model;

pub use convert::{hsv_to_rgb, rgb_to_hsv};
pub use model::{Hsv, Rgb8, normalize_hue};
