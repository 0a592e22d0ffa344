//! Chroma-key matting - knock out a background color by distance
//!
//! A pixel whose color lies within `tolerance` of the key color (plain
//! Euclidean RGB distance) becomes fully transparent; everything else is
//! untouched. Alpha does not participate in the distance.

use image::{Rgba, RgbaImage};

use crate::frame::Frame;

/// Upper bound of the user-adjustable tolerance range.
pub const TOLERANCE_MAX: u32 = 150;

/// Knock out every pixel within `tolerance` of `key`.
///
/// The comparison is squared-distance against `tolerance²`, so the bound is
/// inclusive. A tolerance of 0 removes exact matches only.
pub fn key_out(image: &RgbaImage, key: Rgba<u8>, tolerance: u32) -> RgbaImage {
    let tolerance = tolerance.min(TOLERANCE_MAX);
    let limit = (tolerance * tolerance) as i32;
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let dr = pixel.0[0] as i32 - key.0[0] as i32;
        let dg = pixel.0[1] as i32 - key.0[1] as i32;
        let db = pixel.0[2] as i32 - key.0[2] as i32;
        if dr * dr + dg * dg + db * db <= limit {
            pixel.0[3] = 0;
        }
    }
    out
}

/// Read a pixel color from a frame for key-color selection (eyedropper).
///
/// Coordinates outside the frame clamp to the nearest edge pixel, so a
/// slightly-off click still samples something sensible.
pub fn sample_color(frame: &Frame, x: u32, y: u32) -> Rgba<u8> {
    let x = x.min(frame.width.saturating_sub(1));
    let y = y.min(frame.height.saturating_sub(1));
    *frame.pixels.get_pixel(x, y)
}
