//! Frame data model - one extracted animation cell
//!
//! A frame owns its pixel buffer. Pipeline stages consume a frame and
//! produce a replacement with updated pixels and bounds; the index within
//! the extraction keeps its identity.

use image::RgbaImage;

use crate::bounds::{self, Bounds};
use crate::directions::RowLayout;
use crate::partition::PartitionDescriptor;

/// A warning generated during extraction or compositing.
///
/// Degenerate geometry and no-op stage conditions are recovered locally and
/// surfaced as warnings so a UI can show them; they never abort a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One animation cell sliced out of a source raster.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Owned RGBA pixel buffer for this cell.
    pub pixels: RgbaImage,
    /// Cell origin within the source raster (source coordinates).
    pub source_x: u32,
    pub source_y: u32,
    /// Cell size; always equals the pixel buffer dimensions.
    pub width: u32,
    pub height: u32,
    /// Tight bounds of visible content, full-frame when fully transparent.
    pub content_bounds: Bounds,
}

impl Frame {
    /// Wrap a pixel buffer sliced from `(source_x, source_y)`, detecting
    /// content bounds on the way in.
    pub fn new(pixels: RgbaImage, source_x: u32, source_y: u32) -> Self {
        let (width, height) = pixels.dimensions();
        let content_bounds = bounds::content_bounds(&pixels);
        Self {
            pixels,
            source_x,
            source_y,
            width,
            height,
            content_bounds,
        }
    }

    /// Replace this frame's pixels, keeping its source position and
    /// re-detecting content bounds. Used by pipeline stages.
    pub fn with_pixels(&self, pixels: RgbaImage) -> Self {
        Frame::new(pixels, self.source_x, self.source_y)
    }

    /// True when no pixel exceeds the opacity threshold.
    pub fn is_blank(&self) -> bool {
        bounds::try_content_bounds(&self.pixels).is_none()
    }
}

/// An ordered frame sequence plus the descriptor that produced it.
///
/// The descriptor is retained so row/column semantics can be re-derived
/// later (e.g. frames-per-direction at export time).
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub frames: Vec<Frame>,
    pub descriptor: PartitionDescriptor,
    /// Row interpretation; always `Unlabeled` for free regions.
    pub layout: RowLayout,
    /// Degenerate-geometry warnings collected during extraction.
    pub warnings: Vec<Warning>,
}

impl ExtractionResult {
    /// Grid columns, or the frame count for free regions (one row).
    pub fn columns(&self) -> usize {
        match self.descriptor.grid_shape() {
            Some((columns, _)) => columns as usize,
            None => self.frames.len(),
        }
    }

    /// Rows of frames with their layout labels.
    ///
    /// Unlabeled layouts yield a single `(None, all frames)` row, matching
    /// the un-split fallback sequence.
    pub fn labeled_rows(&self) -> Vec<(Option<&'static str>, &[Frame])> {
        let columns = self.columns();
        if columns == 0 || self.frames.is_empty() {
            return Vec::new();
        }
        match self.layout {
            RowLayout::Unlabeled => vec![(None, self.frames.as_slice())],
            layout => self
                .frames
                .chunks(columns)
                .enumerate()
                .map(|(row, frames)| (layout.row_label(row), frames))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn test_frame_new_detects_bounds() {
        let mut pixels = RgbaImage::new(8, 8);
        pixels.put_pixel(3, 4, Rgba([255, 0, 0, 255]));
        let frame = Frame::new(pixels, 16, 24);
        assert_eq!(frame.source_x, 16);
        assert_eq!(frame.source_y, 24);
        assert_eq!((frame.width, frame.height), (8, 8));
        assert_eq!(frame.content_bounds.x, 3);
        assert_eq!(frame.content_bounds.y, 4);
        assert!(!frame.is_blank());
    }

    #[test]
    fn test_blank_frame_full_bounds() {
        let frame = Frame::new(RgbaImage::new(5, 7), 0, 0);
        assert!(frame.is_blank());
        assert_eq!(frame.content_bounds, Bounds::full(5, 7));
    }

    #[test]
    fn test_with_pixels_keeps_identity() {
        let frame = Frame::new(solid(4, 4), 8, 12);
        let replaced = frame.with_pixels(RgbaImage::new(6, 6));
        assert_eq!(replaced.source_x, 8);
        assert_eq!(replaced.source_y, 12);
        assert_eq!((replaced.width, replaced.height), (6, 6));
    }
}
