//! Content bounds detection - tight bounding rectangle of visible pixels
//!
//! Every crop, preview and export feature sits on top of this single-pass
//! scan of the alpha channel.

use image::RgbaImage;

/// Minimum alpha for a pixel to count as content (~4% of full opacity).
pub const ALPHA_THRESHOLD: u8 = 10;

/// A rectangle in pixel coordinates.
///
/// Bounds are inclusive at construction time: `width = max_x - min_x + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Bounds covering an entire raster of the given size.
    pub fn full(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }

    /// Right edge, exclusive.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Bottom edge, exclusive.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

/// Find the tight bounding rectangle of pixels above the alpha threshold.
///
/// Returns `None` when no pixel exceeds the threshold (fully transparent
/// raster). Most callers want [`content_bounds`], which falls back to the
/// full-frame rectangle instead.
pub fn try_content_bounds(image: &RgbaImage) -> Option<Bounds> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[3] >= ALPHA_THRESHOLD {
            found = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if !found {
        return None;
    }

    Some(Bounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Find the tight bounding rectangle of visible content.
///
/// Degenerates to the full-frame rectangle when the raster is fully
/// transparent, so callers never see an inverted or empty rectangle.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use spritecut::bounds::content_bounds;
///
/// let mut img = RgbaImage::new(8, 8);
/// img.put_pixel(2, 3, Rgba([255, 0, 0, 255]));
/// img.put_pixel(5, 6, Rgba([0, 255, 0, 255]));
///
/// let b = content_bounds(&img);
/// assert_eq!((b.x, b.y, b.width, b.height), (2, 3, 4, 4));
/// ```
pub fn content_bounds(image: &RgbaImage) -> Bounds {
    let (width, height) = image.dimensions();
    try_content_bounds(image).unwrap_or_else(|| Bounds::full(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn opaque() -> Rgba<u8> {
        Rgba([255, 255, 255, 255])
    }

    #[test]
    fn test_empty_raster_falls_back_to_full_frame() {
        let img = RgbaImage::new(10, 6);
        let b = content_bounds(&img);
        assert_eq!(b, Bounds::full(10, 6));
        assert!(try_content_bounds(&img).is_none());
    }

    #[test]
    fn test_single_pixel() {
        let mut img = RgbaImage::new(10, 10);
        img.put_pixel(4, 7, opaque());
        let b = content_bounds(&img);
        assert_eq!((b.x, b.y, b.width, b.height), (4, 7, 1, 1));
    }

    #[test]
    fn test_full_raster() {
        let img = RgbaImage::from_pixel(5, 3, opaque());
        let b = content_bounds(&img);
        assert_eq!(b, Bounds::full(5, 3));
    }

    #[test]
    fn test_threshold_excludes_faint_pixels() {
        // Alpha just below the threshold is ignored, at the threshold counts
        let mut img = RgbaImage::new(6, 6);
        img.put_pixel(0, 0, Rgba([255, 255, 255, ALPHA_THRESHOLD - 1]));
        img.put_pixel(3, 3, Rgba([255, 255, 255, ALPHA_THRESHOLD]));
        let b = content_bounds(&img);
        assert_eq!((b.x, b.y, b.width, b.height), (3, 3, 1, 1));
    }

    #[test]
    fn test_corner_pixels() {
        let mut img = RgbaImage::new(8, 8);
        img.put_pixel(0, 0, opaque());
        img.put_pixel(7, 7, opaque());
        let b = content_bounds(&img);
        assert_eq!(b, Bounds::full(8, 8));
    }

    #[test]
    fn test_idempotent_after_crop() {
        // Cropping to the detected bounds and re-detecting yields the same
        // dimensions at origin
        let mut img = RgbaImage::new(12, 12);
        for y in 3..7 {
            for x in 2..9 {
                img.put_pixel(x, y, opaque());
            }
        }
        let b = content_bounds(&img);
        assert_eq!((b.x, b.y, b.width, b.height), (2, 3, 7, 4));

        let cropped =
            image::imageops::crop_imm(&img, b.x, b.y, b.width, b.height).to_image();
        let b2 = content_bounds(&cropped);
        assert_eq!((b2.x, b2.y, b2.width, b2.height), (0, 0, 7, 4));
    }
}
