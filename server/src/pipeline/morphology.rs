//! Binary morphology for mask cleanup
//!
//! Opening (erode then dilate) removes small noise specks; closing (dilate
//! then erode) fills small holes. Both use a fixed 3x3 all-ones kernel, and
//! the cleanup order (open, then close) is a fixed contract. Out-of-bounds
//! neighbors count as set during erosion and unset during dilation, so masks
//! touching the frame edge are not eaten away.

use image::GrayImage;

/// Kernel radius for the fixed 3x3 structuring element
const RADIUS: i32 = 1;

fn is_set(mask: &GrayImage, x: i32, y: i32) -> Option<bool> {
    if x < 0 || y < 0 || x >= mask.width() as i32 || y >= mask.height() as i32 {
        return None;
    }
    Some(mask.get_pixel(x as u32, y as u32).0[0] > 0)
}

/// Erode: a pixel survives only if its whole 3x3 neighborhood is set
pub fn erode(mask: &GrayImage) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        for dy in -RADIUS..=RADIUS {
            for dx in -RADIUS..=RADIUS {
                if let Some(false) = is_set(mask, x as i32 + dx, y as i32 + dy) {
                    return image::Luma([0]);
                }
            }
        }
        image::Luma([255])
    })
}

/// Dilate: a pixel is set if any of its 3x3 neighborhood is set
pub fn dilate(mask: &GrayImage) -> GrayImage {
    GrayImage::from_fn(mask.width(), mask.height(), |x, y| {
        for dy in -RADIUS..=RADIUS {
            for dx in -RADIUS..=RADIUS {
                if let Some(true) = is_set(mask, x as i32 + dx, y as i32 + dy) {
                    return image::Luma([255]);
                }
            }
        }
        image::Luma([0])
    })
}

/// Morphological opening: erode then dilate
pub fn open(mask: &GrayImage) -> GrayImage {
    dilate(&erode(mask))
}

/// Morphological closing: dilate then erode
pub fn close(mask: &GrayImage) -> GrayImage {
    erode(&dilate(mask))
}

/// Full mask cleanup: opening to drop noise specks, then closing to fill
/// small holes
pub fn cleanup(mask: &GrayImage) -> GrayImage {
    close(&open(mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> GrayImage {
        GrayImage::new(64, 64)
    }

    fn filled_rect(mask: &mut GrayImage, x0: u32, y0: u32, x1: u32, y1: u32) {
        for y in y0..y1 {
            for x in x0..x1 {
                mask.put_pixel(x, y, image::Luma([255]));
            }
        }
    }

    fn count_set(mask: &GrayImage) -> usize {
        mask.pixels().filter(|p| p.0[0] > 0).count()
    }

    #[test]
    fn test_opening_removes_isolated_speck() {
        let mut mask = blank();
        mask.put_pixel(30, 30, image::Luma([255]));
        assert_eq!(count_set(&cleanup(&mask)), 0);
    }

    #[test]
    fn test_closing_fills_single_pixel_hole() {
        let mut mask = blank();
        filled_rect(&mut mask, 10, 10, 30, 30);
        mask.put_pixel(20, 20, image::Luma([0]));

        let cleaned = cleanup(&mask);
        assert_eq!(cleaned.get_pixel(20, 20).0[0], 255);
    }

    #[test]
    fn test_solid_block_survives_unchanged() {
        let mut mask = blank();
        filled_rect(&mut mask, 10, 10, 40, 40);
        assert_eq!(cleanup(&mask).as_raw(), mask.as_raw());
    }

    #[test]
    fn test_cleanup_is_idempotent_on_cleaned_mask() {
        let mut mask = blank();
        filled_rect(&mut mask, 5, 5, 25, 25);
        filled_rect(&mut mask, 40, 40, 60, 55);
        mask.put_pixel(2, 60, image::Luma([255])); // speck, removed on first pass

        let once = cleanup(&mask);
        let twice = cleanup(&once);
        assert_eq!(once.as_raw(), twice.as_raw());
    }

    #[test]
    fn test_block_touching_edge_is_preserved() {
        let mut mask = blank();
        filled_rect(&mut mask, 0, 0, 10, 10);
        let cleaned = cleanup(&mask);
        assert_eq!(cleaned.get_pixel(0, 0).0[0], 255);
        assert_eq!(count_set(&cleaned), count_set(&mask));
    }

    #[test]
    fn test_empty_mask_stays_empty() {
        assert_eq!(count_set(&cleanup(&blank())), 0);
    }

    #[test]
    fn test_output_is_strictly_binary() {
        let mut mask = blank();
        filled_rect(&mut mask, 10, 10, 20, 20);
        // Non-255 set values are still treated as set
        mask.put_pixel(15, 15, image::Luma([7]));
        assert!(cleanup(&mask).pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }
}
