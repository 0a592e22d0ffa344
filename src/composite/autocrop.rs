//! Auto-crop normalization - place frame content onto a target canvas
//!
//! Two modes with one difference: where the crop rectangle comes from.
//! `AnimationRelative` uses the bounds of a reference frame for the whole
//! set, keeping relative motion (a walking figure keeps its ground contact
//! point). `CenterCenter` recomputes bounds per frame and centers each
//! independently, for unrelated static poses.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::frame::Frame;

/// Upper bound of the per-side canvas reduction.
pub const REDUCTION_MAX: u32 = 100;

/// Where the crop rectangle is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum CropMode {
    /// Bounds from the first frame of the selection, reused for all frames.
    #[default]
    AnimationRelative,
    /// Bounds recomputed per frame, each frame centered independently.
    CenterCenter,
}

/// Horizontal placement within the reduced canvas area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlignX {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement within the reduced canvas area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlignY {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Auto-crop stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AutoCropSettings {
    pub enabled: bool,
    pub mode: CropMode,
    /// Target canvas `[width, height]`.
    pub canvas_size: [u32; 2],
    /// Canvas is reduced by this many pixels on each side before placement.
    pub reduction_px: u32,
    pub align_x: AlignX,
    pub align_y: AlignY,
}

impl Default for AutoCropSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            mode: CropMode::default(),
            canvas_size: [64, 64],
            reduction_px: 0,
            align_x: AlignX::default(),
            align_y: AlignY::default(),
        }
    }
}

/// Crop a frame to `crop_rect` and place the content onto the target canvas.
///
/// Returns `None` when the frame has no visible content to crop to; the
/// pipeline passes the original frame through in that case. Content larger
/// than the usable canvas area is scaled down with nearest-neighbor
/// filtering, preserving aspect ratio; content that already fits is only
/// positioned, never rescaled.
pub fn auto_crop_frame(
    frame: &Frame,
    crop_rect: Bounds,
    settings: &AutoCropSettings,
) -> Option<Frame> {
    if frame.is_blank() {
        return None;
    }

    // Clamp the crop rectangle to the frame (a reference rect from another
    // frame may overhang a smaller frame)
    let x = crop_rect.x.min(frame.width.saturating_sub(1));
    let y = crop_rect.y.min(frame.height.saturating_sub(1));
    let w = crop_rect.width.min(frame.width - x).max(1);
    let h = crop_rect.height.min(frame.height - y).max(1);

    let content = imageops::crop_imm(&frame.pixels, x, y, w, h).to_image();
    let canvas = place_on_canvas(&content, settings);
    Some(frame.with_pixels(canvas))
}

/// Place content onto a fresh transparent canvas per the settings.
pub fn place_on_canvas(content: &RgbaImage, settings: &AutoCropSettings) -> RgbaImage {
    let canvas_w = settings.canvas_size[0].max(1);
    let canvas_h = settings.canvas_size[1].max(1);
    let reduction = settings.reduction_px.min(REDUCTION_MAX);

    // Usable area after the per-side reduction; never collapses below 1px
    let area_w = canvas_w.saturating_sub(reduction * 2).max(1);
    let area_h = canvas_h.saturating_sub(reduction * 2).max(1);

    let (content_w, content_h) = content.dimensions();
    let scaled;
    let placed = if content_w > area_w || content_h > area_h {
        let scale = (area_w as f64 / content_w as f64).min(area_h as f64 / content_h as f64);
        let new_w = ((content_w as f64 * scale).floor() as u32).max(1);
        let new_h = ((content_h as f64 * scale).floor() as u32).max(1);
        scaled = imageops::resize(content, new_w, new_h, FilterType::Nearest);
        &scaled
    } else {
        content
    };

    let (placed_w, placed_h) = placed.dimensions();
    let free_x = area_w - placed_w;
    let free_y = area_h - placed_h;
    let offset_x = reduction
        + match settings.align_x {
            AlignX::Left => 0,
            AlignX::Center => (free_x as f64 / 2.0).round() as u32,
            AlignX::Right => free_x,
        };
    let offset_y = reduction
        + match settings.align_y {
            AlignY::Top => 0,
            AlignY::Center => (free_y as f64 / 2.0).round() as u32,
            AlignY::Bottom => free_y,
        };

    let mut canvas = RgbaImage::new(canvas_w, canvas_h);
    for (px, py, pixel) in placed.enumerate_pixels() {
        let dx = offset_x + px;
        let dy = offset_y + py;
        if dx < canvas_w && dy < canvas_h {
            canvas.put_pixel(dx, dy, *pixel);
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const INK: Rgba<u8> = Rgba([20, 30, 40, 255]);

    fn frame_with_dot(size: u32, x: u32, y: u32) -> Frame {
        let mut img = RgbaImage::new(size, size);
        img.put_pixel(x, y, INK);
        Frame::new(img, 0, 0)
    }

    fn settings(canvas: u32) -> AutoCropSettings {
        AutoCropSettings {
            enabled: true,
            canvas_size: [canvas, canvas],
            ..AutoCropSettings::default()
        }
    }

    #[test]
    fn test_center_placement() {
        let frame = frame_with_dot(16, 3, 12);
        let cropped =
            auto_crop_frame(&frame, frame.content_bounds, &settings(9)).unwrap();

        assert_eq!((cropped.width, cropped.height), (9, 9));
        // 1x1 content centered on a 9x9 canvas lands at (4,4)
        assert_eq!(cropped.pixels.get_pixel(4, 4), &INK);
        assert_eq!(cropped.content_bounds.x, 4);
    }

    #[test]
    fn test_blank_frame_returns_none() {
        let frame = Frame::new(RgbaImage::new(8, 8), 0, 0);
        assert!(auto_crop_frame(&frame, frame.content_bounds, &settings(16)).is_none());
    }

    #[test]
    fn test_alignment_corners() {
        let frame = frame_with_dot(16, 8, 8);
        let mut s = settings(10);
        s.align_x = AlignX::Left;
        s.align_y = AlignY::Top;
        let top_left = auto_crop_frame(&frame, frame.content_bounds, &s).unwrap();
        assert_eq!(top_left.pixels.get_pixel(0, 0), &INK);

        s.align_x = AlignX::Right;
        s.align_y = AlignY::Bottom;
        let bottom_right = auto_crop_frame(&frame, frame.content_bounds, &s).unwrap();
        assert_eq!(bottom_right.pixels.get_pixel(9, 9), &INK);
    }

    #[test]
    fn test_reduction_insets_placement() {
        let frame = frame_with_dot(16, 0, 0);
        let mut s = settings(12);
        s.align_x = AlignX::Left;
        s.align_y = AlignY::Top;
        s.reduction_px = 3;
        let cropped = auto_crop_frame(&frame, frame.content_bounds, &s).unwrap();
        assert_eq!(cropped.pixels.get_pixel(3, 3), &INK);
    }

    #[test]
    fn test_fitting_content_is_not_rescaled() {
        // A 3x2 block on a larger canvas keeps its exact pixels
        let mut img = RgbaImage::new(8, 8);
        for y in 2..4 {
            for x in 1..4 {
                img.put_pixel(x, y, INK);
            }
        }
        let frame = Frame::new(img, 0, 0);
        let cropped =
            auto_crop_frame(&frame, frame.content_bounds, &settings(16)).unwrap();
        let b = cropped.content_bounds;
        assert_eq!((b.width, b.height), (3, 2));
    }

    #[test]
    fn test_oversized_content_scaled_to_fit() {
        let mut img = RgbaImage::from_pixel(40, 20, INK);
        img.put_pixel(0, 0, Rgba([1, 1, 1, 255]));
        let frame = Frame::new(img, 0, 0);
        let cropped =
            auto_crop_frame(&frame, frame.content_bounds, &settings(10)).unwrap();

        assert_eq!((cropped.width, cropped.height), (10, 10));
        let b = cropped.content_bounds;
        // Aspect preserved: 2:1 content in a 10x10 canvas becomes 10x5
        assert_eq!((b.width, b.height), (10, 5));
    }

    #[test]
    fn test_reference_rect_from_other_frame_clamped() {
        // AnimationRelative hands a reference rect that may overhang
        let frame = frame_with_dot(6, 5, 5);
        let reference = Bounds { x: 4, y: 4, width: 10, height: 10 };
        let cropped = auto_crop_frame(&frame, reference, &settings(8)).unwrap();
        assert_eq!((cropped.width, cropped.height), (8, 8));
    }
}
