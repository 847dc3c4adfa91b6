mod hsv;
mod rgb;

pub use hsv::hsv_from_bgr;
pub use rgb::{bgr_from_rgb, rgb_from_bgr};
