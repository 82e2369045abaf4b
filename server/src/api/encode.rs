//! Image-to-transport encoding
//!
//! Every response image goes out as a base64-encoded lossless PNG. Masks are
//! expanded from single-channel to RGB first so clients render all three
//! images the same way.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{GrayImage, ImageFormat, Rgb, RgbImage};

use super::types::ApiError;

/// Encode an RGB image as a base64 PNG string
pub fn encode_png_base64(image: &RgbImage) -> Result<String, ApiError> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ApiError::Encoding(e.to_string()))?;
    Ok(STANDARD.encode(&bytes))
}

/// Expand a grayscale mask to RGB, then encode as a base64 PNG string
pub fn encode_mask_png_base64(mask: &GrayImage) -> Result<String, ApiError> {
    let rgb = RgbImage::from_fn(mask.width(), mask.height(), |x, y| {
        let v = mask.get_pixel(x, y).0[0];
        Rgb([v, v, v])
    });
    encode_png_base64(&rgb)
}
