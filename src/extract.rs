//! Frame extraction - slice a source raster into ordered frames
//!
//! Grid and divider extractions iterate row-major (row outer, column inner),
//! so frame index `i = row * columns + col`. Free regions come out in their
//! stored order. Row labeling (directions, attack rows) applies to grid
//! shapes only.

use image::RgbaImage;
use log::debug;

use crate::bounds::Bounds;
use crate::directions::RowLayout;
use crate::frame::{ExtractionResult, Frame, Warning};
use crate::partition::{self, PartitionDescriptor};

/// Slice `source` into frames according to `descriptor`.
///
/// Zero-cell descriptors (0 columns, 0 rows, or an empty region list) are
/// valid and produce an empty result rather than an error. Degenerate
/// geometry is reported through the result's warnings.
///
/// # Examples
///
/// ```
/// use image::RgbaImage;
/// use spritecut::extract::extract;
/// use spritecut::partition::PartitionDescriptor;
///
/// let source = RgbaImage::new(64, 48);
/// let result = extract(&source, PartitionDescriptor::UniformGrid { columns: 4, rows: 3 });
/// assert_eq!(result.frames.len(), 12);
/// // Row-major: frame 5 is row 1, column 1
/// assert_eq!(result.frames[5].source_x, 16);
/// assert_eq!(result.frames[5].source_y, 16);
/// ```
pub fn extract(source: &RgbaImage, descriptor: PartitionDescriptor) -> ExtractionResult {
    let (width, height) = source.dimensions();
    let mut warnings = descriptor.validate();

    let (frames, layout) = match &descriptor {
        PartitionDescriptor::UniformGrid { columns, rows } => {
            let x_edges = partition::uniform_edges(*columns, width);
            let y_edges = partition::uniform_edges(*rows, height);
            let frames = slice_grid(source, &x_edges, &y_edges);
            (frames, RowLayout::for_rows(*rows as usize))
        }
        PartitionDescriptor::DividedGrid {
            vertical_dividers,
            horizontal_dividers,
        } => {
            let x_edges = partition::axis_edges(vertical_dividers, width);
            let y_edges = partition::axis_edges(horizontal_dividers, height);
            let frames = slice_grid(source, &x_edges, &y_edges);
            (frames, RowLayout::for_rows(horizontal_dividers.len() + 1))
        }
        PartitionDescriptor::FreeRegions { regions } => {
            let mut frames = Vec::with_capacity(regions.len());
            for region in regions {
                let rect = partition::region_rect(region, width, height);
                if rect.width == 0 || rect.height == 0 {
                    warnings.push(Warning::new(format!(
                        "Region '{}' maps to an empty pixel rectangle, skipped",
                        region.id
                    )));
                    continue;
                }
                frames.push(slice_rect(source, rect));
            }
            // Free regions are never direction-labeled
            (frames, RowLayout::Unlabeled)
        }
    };

    debug!(
        "extracted {} frames from {}x{} source ({:?})",
        frames.len(),
        width,
        height,
        layout
    );

    ExtractionResult {
        frames,
        descriptor,
        layout,
        warnings,
    }
}

/// Slice every cell of a grid given per-axis pixel edges, row-major.
fn slice_grid(source: &RgbaImage, x_edges: &[u32], y_edges: &[u32]) -> Vec<Frame> {
    let mut frames = Vec::new();
    if x_edges.len() < 2 || y_edges.len() < 2 {
        return frames;
    }
    for row in 0..y_edges.len() - 1 {
        for col in 0..x_edges.len() - 1 {
            let rect = Bounds {
                x: x_edges[col],
                y: y_edges[row],
                width: x_edges[col + 1] - x_edges[col],
                height: y_edges[row + 1] - y_edges[row],
            };
            frames.push(slice_rect(source, rect));
        }
    }
    frames
}

/// Copy one rectangle of the source into an owned frame buffer.
fn slice_rect(source: &RgbaImage, rect: Bounds) -> Frame {
    let mut pixels = RgbaImage::new(rect.width, rect.height);
    for y in 0..rect.height {
        for x in 0..rect.width {
            pixels.put_pixel(x, y, *source.get_pixel(rect.x + x, rect.y + y));
        }
    }
    Frame::new(pixels, rect.x, rect.y)
}
