//! Overlay compositing
//!
//! Blends a translucent red tint over the original image wherever the mask is
//! set: `out = clamp(original * 1.0 + red * alpha)`, per channel, saturating
//! at the 8-bit range. Unmasked pixels pass through untouched.

use image::{GrayImage, Rgb, RgbImage};

use super::types::OVERLAY_ALPHA;

/// Composite the red tumor tint onto the original image
pub fn compose(original: &RgbImage, mask: &GrayImage) -> RgbImage {
    let tint = [255.0 * OVERLAY_ALPHA, 0.0, 0.0];

    RgbImage::from_fn(original.width(), original.height(), |x, y| {
        let pixel = *original.get_pixel(x, y);
        if mask.get_pixel(x, y).0[0] == 0 {
            return pixel;
        }

        let mut blended = [0u8; 3];
        for c in 0..3 {
            blended[c] = (pixel.0[c] as f32 + tint[c]).round().clamp(0.0, 255.0) as u8;
        }
        Rgb(blended)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmasked_pixels_untouched() {
        let original = RgbImage::from_pixel(8, 8, Rgb([10, 20, 30]));
        let mask = GrayImage::new(8, 8);
        assert_eq!(compose(&original, &mask).as_raw(), original.as_raw());
    }

    #[test]
    fn test_masked_pixel_gains_red_tint() {
        let original = RgbImage::from_pixel(8, 8, Rgb([10, 20, 30]));
        let mut mask = GrayImage::new(8, 8);
        mask.put_pixel(3, 3, image::Luma([255]));

        let overlay = compose(&original, &mask);
        // 10 + 255 * 0.7 = 188.5, rounds to 189; green/blue unchanged
        assert_eq!(overlay.get_pixel(3, 3).0, [189, 20, 30]);
        assert_eq!(overlay.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_blend_saturates_instead_of_wrapping() {
        let original = RgbImage::from_pixel(4, 4, Rgb([250, 250, 250]));
        let mask = GrayImage::from_pixel(4, 4, image::Luma([255]));

        let overlay = compose(&original, &mask);
        for p in overlay.pixels() {
            assert_eq!(p.0, [255, 250, 250]);
        }
    }
}
