//! Halo removal - erase antialiasing fringe around a keyed subject
//!
//! Chroma keying and AI background removal both leave a ring of semi-opaque
//! pixels where the subject was antialiased against the old background.
//! This stage expands the fully transparent region outward by a fixed
//! radius, clearing those pixels.
//!
//! The expansion radius is Chebyshev distance, computed with a two-pass
//! chamfer distance transform over the alpha channel. Only pixels that are
//! not fully opaque are cleared, so a frame with no fringe is a fixed point
//! of the stage.

use image::RgbaImage;

use crate::bounds::ALPHA_THRESHOLD;

/// Maximum supported expansion radius in pixels.
pub const EXPANSION_MAX: u32 = 30;

/// Expand the transparent region outward by `expansion_px` pixels.
///
/// Pixels within the radius of a transparent pixel lose their alpha unless
/// they are fully opaque. Pixels beyond the raster edge count as opaque, so
/// a subject touching the frame border is not eaten from outside.
pub fn expand_transparency(image: &RgbaImage, expansion_px: u32) -> RgbaImage {
    let expansion = expansion_px.min(EXPANSION_MAX);
    let (width, height) = image.dimensions();
    let mut out = image.clone();
    if expansion == 0 || width == 0 || height == 0 {
        return out;
    }

    let distance = transparency_distance(image);

    for (i, pixel) in out.pixels_mut().enumerate() {
        if distance[i] <= expansion && pixel.0[3] != 255 {
            pixel.0[3] = 0;
        }
    }
    out
}

/// Chebyshev distance from each pixel to the nearest transparent pixel.
///
/// Transparent means alpha below the content threshold. Two chamfer passes
/// (forward then backward) over the 8-neighborhood give the exact Chebyshev
/// metric.
fn transparency_distance(image: &RgbaImage) -> Vec<u32> {
    let (width, height) = image.dimensions();
    let w = width as usize;
    let h = height as usize;
    let mut dist = vec![u32::MAX; w * h];

    for (i, pixel) in image.pixels().enumerate() {
        if pixel.0[3] < ALPHA_THRESHOLD {
            dist[i] = 0;
        }
    }

    let step = |d: u32| d.saturating_add(1);

    // Forward pass: up, left and the two upper diagonals
    for y in 0..h {
        for x in 0..w {
            let i = y * w + x;
            let mut best = dist[i];
            if x > 0 {
                best = best.min(step(dist[i - 1]));
            }
            if y > 0 {
                best = best.min(step(dist[i - w]));
                if x > 0 {
                    best = best.min(step(dist[i - w - 1]));
                }
                if x + 1 < w {
                    best = best.min(step(dist[i - w + 1]));
                }
            }
            dist[i] = best;
        }
    }

    // Backward pass: down, right and the two lower diagonals
    for y in (0..h).rev() {
        for x in (0..w).rev() {
            let i = y * w + x;
            let mut best = dist[i];
            if x + 1 < w {
                best = best.min(step(dist[i + 1]));
            }
            if y + 1 < h {
                best = best.min(step(dist[i + w]));
                if x > 0 {
                    best = best.min(step(dist[i + w - 1]));
                }
                if x + 1 < w {
                    best = best.min(step(dist[i + w + 1]));
                }
            }
            dist[i] = best;
        }
    }

    dist
}
