//! Sprite sheet assembly - pack frames into a grid raster
//!
//! Cell size is the maximum frame size across the input; smaller frames are
//! centered within their cell. Placement is deterministic and
//! order-preserving: frame `i` lands at `(i % columns, i / columns)`.

use image::{Rgba, RgbaImage};
use serde::Serialize;

use crate::frame::Frame;

/// Transparent color used for cell padding
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Where one frame landed within an assembled sheet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    /// Index of the frame in the input order.
    pub index: usize,
    /// Pixel position of the frame within the sheet (including centering).
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// An assembled sheet raster plus its grid geometry.
#[derive(Debug)]
pub struct SpriteSheet {
    pub image: RgbaImage,
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    pub placements: Vec<Placement>,
}

/// Pack frames into a single grid raster.
///
/// Columns default to `ceil(sqrt(n))` when not forced; rows are
/// `ceil(n / columns)`. Frames need not be uniform size going in; each is
/// centered within a cell sized to the largest frame. Zero frames yield a
/// minimal 1x1 transparent raster so export code never needs a null check.
///
/// # Examples
///
/// ```
/// use image::RgbaImage;
/// use spritecut::frame::Frame;
/// use spritecut::spritesheet::assemble;
///
/// let frames: Vec<Frame> = (0..6)
///     .map(|_| Frame::new(RgbaImage::new(8, 8), 0, 0))
///     .collect();
///
/// // 6 frames default to ceil(sqrt(6)) = 3 columns
/// let sheet = assemble(&frames, None);
/// assert_eq!((sheet.columns, sheet.rows), (3, 2));
/// assert_eq!(sheet.image.dimensions(), (24, 16));
///
/// // Forced columns win
/// let sheet = assemble(&frames, Some(6));
/// assert_eq!((sheet.columns, sheet.rows), (6, 1));
/// ```
pub fn assemble(frames: &[Frame], forced_columns: Option<u32>) -> SpriteSheet {
    if frames.is_empty() {
        return SpriteSheet {
            image: RgbaImage::from_pixel(1, 1, TRANSPARENT),
            columns: 1,
            rows: 1,
            cell_width: 1,
            cell_height: 1,
            placements: Vec::new(),
        };
    }

    let count = frames.len() as u32;
    let columns = forced_columns
        .unwrap_or_else(|| (count as f64).sqrt().ceil() as u32)
        .max(1);
    let rows = count.div_ceil(columns);

    let cell_width = frames.iter().map(|f| f.width).max().unwrap_or(1).max(1);
    let cell_height = frames.iter().map(|f| f.height).max().unwrap_or(1).max(1);

    let mut image =
        RgbaImage::from_pixel(columns * cell_width, rows * cell_height, TRANSPARENT);
    let mut placements = Vec::with_capacity(frames.len());

    for (i, frame) in frames.iter().enumerate() {
        let col = (i as u32) % columns;
        let row = (i as u32) / columns;

        // Center the frame within its cell
        let offset_x = ((cell_width - frame.width) as f64 / 2.0).round() as u32;
        let offset_y = ((cell_height - frame.height) as f64 / 2.0).round() as u32;
        let dest_x = col * cell_width + offset_x;
        let dest_y = row * cell_height + offset_y;

        for (x, y, pixel) in frame.pixels.enumerate_pixels() {
            image.put_pixel(dest_x + x, dest_y + y, *pixel);
        }

        placements.push(Placement {
            index: i,
            x: dest_x,
            y: dest_y,
            width: frame.width,
            height: frame.height,
        });
    }

    SpriteSheet {
        image,
        columns,
        rows,
        cell_width,
        cell_height,
        placements,
    }
}
