//! Partition descriptors - how a source raster is divided into frames
//!
//! Three strategies, never mixed within one extraction:
//! - `UniformGrid`: equal-fraction cells
//! - `DividedGrid`: user-adjusted divider percentages per axis
//! - `FreeRegions`: independent percentage-space rectangles in user order
//!
//! All boundary math happens here so the extractor and any preview overlay
//! agree on cell edges to the pixel.

use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::frame::Warning;

/// Minimum distance between adjacent dividers, in percent of the axis.
pub const MIN_DIVIDER_GAP: f64 = 2.0;

/// A free-form region in percentage space (0-100 on both axes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Stable identifier, kept across reorders.
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// How to slice a source raster into frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PartitionDescriptor {
    /// Cells are equal fractions of the source raster.
    #[serde(rename_all = "camelCase")]
    UniformGrid { columns: u32, rows: u32 },
    /// Cell boundaries are divider percentages of source width/height.
    ///
    /// Dividers must be strictly increasing and at least
    /// [`MIN_DIVIDER_GAP`] percent apart; the implied boundary list per axis
    /// is `[0, d1, .., dn, 100]`.
    #[serde(rename_all = "camelCase")]
    DividedGrid {
        vertical_dividers: Vec<f64>,
        horizontal_dividers: Vec<f64>,
    },
    /// One frame per region, in the stored (user-controlled) order.
    #[serde(rename_all = "camelCase")]
    FreeRegions { regions: Vec<Region> },
}

impl PartitionDescriptor {
    /// Number of frames this descriptor will produce.
    pub fn frame_count(&self) -> usize {
        match self {
            PartitionDescriptor::UniformGrid { columns, rows } => {
                (*columns as usize) * (*rows as usize)
            }
            PartitionDescriptor::DividedGrid {
                vertical_dividers,
                horizontal_dividers,
            } => (vertical_dividers.len() + 1) * (horizontal_dividers.len() + 1),
            PartitionDescriptor::FreeRegions { regions } => regions.len(),
        }
    }

    /// Grid shape `(columns, rows)`, or `None` for free regions.
    pub fn grid_shape(&self) -> Option<(u32, u32)> {
        match self {
            PartitionDescriptor::UniformGrid { columns, rows } => Some((*columns, *rows)),
            PartitionDescriptor::DividedGrid {
                vertical_dividers,
                horizontal_dividers,
            } => Some((
                vertical_dividers.len() as u32 + 1,
                horizontal_dividers.len() as u32 + 1,
            )),
            PartitionDescriptor::FreeRegions { .. } => None,
        }
    }

    /// Check divider ordering and spacing, returning a warning per violation.
    ///
    /// Violations are recoverable: extraction still runs, cells collapsed to
    /// zero width simply come out empty.
    pub fn validate(&self) -> Vec<Warning> {
        let mut warnings = Vec::new();
        if let PartitionDescriptor::DividedGrid {
            vertical_dividers,
            horizontal_dividers,
        } = self
        {
            check_dividers("vertical", vertical_dividers, &mut warnings);
            check_dividers("horizontal", horizontal_dividers, &mut warnings);
        }
        if let PartitionDescriptor::FreeRegions { regions } = self {
            for region in regions {
                if region.width <= 0.0 || region.height <= 0.0 {
                    warnings.push(Warning::new(format!(
                        "Region '{}' has zero or negative size ({}x{})",
                        region.id, region.width, region.height
                    )));
                }
            }
        }
        warnings
    }
}

fn check_dividers(axis: &str, dividers: &[f64], warnings: &mut Vec<Warning>) {
    let mut prev = 0.0;
    for (i, &d) in dividers.iter().enumerate() {
        if d <= 0.0 || d >= 100.0 {
            warnings.push(Warning::new(format!(
                "{} divider {} at {:.1}% is outside the open range 0-100",
                axis, i, d
            )));
        }
        if d - prev < MIN_DIVIDER_GAP {
            warnings.push(Warning::new(format!(
                "{} divider {} at {:.1}% is less than {}% from its neighbor",
                axis, i, d, MIN_DIVIDER_GAP
            )));
        }
        prev = d;
    }
    if let Some(&last) = dividers.last() {
        if 100.0 - last < MIN_DIVIDER_GAP {
            warnings.push(Warning::new(format!(
                "{} divider at {:.1}% is less than {}% from the raster edge",
                axis, last, MIN_DIVIDER_GAP
            )));
        }
    }
}

/// Clamp a proposed divider drag position against its neighbors.
///
/// The divider at `index` may move freely between its neighbors (or the
/// raster edges) minus [`MIN_DIVIDER_GAP`] on each side.
pub fn clamp_divider(dividers: &[f64], index: usize, proposed: f64) -> f64 {
    let lower = if index == 0 { 0.0 } else { dividers[index - 1] };
    let upper = if index + 1 < dividers.len() {
        dividers[index + 1]
    } else {
        100.0
    };
    proposed.clamp(lower + MIN_DIVIDER_GAP, upper - MIN_DIVIDER_GAP)
}

/// Convert per-axis divider percentages into absolute pixel edges.
///
/// The returned list always starts at 0 and ends at `size`, with one edge
/// per divider in between. Each edge is rounded independently from its own
/// percentage, so adjacent cells share an edge exactly: no accumulated
/// rounding, no 1px gaps or overlaps.
pub fn axis_edges(dividers: &[f64], size: u32) -> Vec<u32> {
    let mut edges = Vec::with_capacity(dividers.len() + 2);
    edges.push(0);
    let mut previous = 0u32;
    for &d in dividers {
        let px = (d / 100.0 * size as f64).round().clamp(0.0, size as f64) as u32;
        // Out-of-order dividers are a validation warning; edges still must
        // never run backwards
        let px = px.max(previous);
        edges.push(px);
        previous = px;
    }
    edges.push(size.max(previous));
    edges
}

/// Pixel edges for `count` equal cells along an axis of `size` pixels.
///
/// Edge `i` is `round(i * size / count)`, computed independently per edge.
pub fn uniform_edges(count: u32, size: u32) -> Vec<u32> {
    (0..=count)
        .map(|i| (i as f64 / count as f64 * size as f64).round() as u32)
        .collect()
}

/// Absolute pixel rectangle for a free-form region.
///
/// Each edge is rounded independently; the rectangle is clamped to the
/// raster and may come out zero-sized for degenerate regions.
pub fn region_rect(region: &Region, width: u32, height: u32) -> Bounds {
    let x0 = (region.x / 100.0 * width as f64)
        .round()
        .clamp(0.0, width as f64) as u32;
    let y0 = (region.y / 100.0 * height as f64)
        .round()
        .clamp(0.0, height as f64) as u32;
    let x1 = ((region.x + region.width) / 100.0 * width as f64)
        .round()
        .clamp(x0 as f64, width as f64) as u32;
    let y1 = ((region.y + region.height) / 100.0 * height as f64)
        .round()
        .clamp(y0 as f64, height as f64) as u32;
    Bounds {
        x: x0,
        y: y0,
        width: x1 - x0,
        height: y1 - y0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_edges_cover_axis() {
        for count in 1..=12u32 {
            for size in [7u32, 48, 100, 131] {
                let edges = uniform_edges(count, size);
                assert_eq!(edges.len(), count as usize + 1);
                assert_eq!(edges[0], 0);
                assert_eq!(*edges.last().unwrap(), size);
                // Monotonic: adjacent cells tile the axis exactly
                for pair in edges.windows(2) {
                    assert!(pair[0] <= pair[1]);
                }
            }
        }
    }

    #[test]
    fn test_axis_edges_match_uniform_for_even_spacing() {
        // Evenly spaced dividers degenerate to the uniform grid edges
        for count in [2u32, 4, 5, 8] {
            let dividers: Vec<f64> =
                (1..count).map(|i| i as f64 * 100.0 / count as f64).collect();
            for size in [64u32, 97, 256] {
                assert_eq!(
                    axis_edges(&dividers, size),
                    uniform_edges(count, size),
                    "count={} size={}",
                    count,
                    size
                );
            }
        }
    }

    #[test]
    fn test_axis_edges_no_gaps_no_overlaps() {
        let dividers = vec![13.0, 37.5, 62.0, 88.8];
        let edges = axis_edges(&dividers, 123);
        assert_eq!(edges[0], 0);
        assert_eq!(*edges.last().unwrap(), 123);
        let total: u32 = edges.windows(2).map(|p| p[1] - p[0]).sum();
        assert_eq!(total, 123);
    }

    #[test]
    fn test_axis_edges_never_run_backwards() {
        // Out-of-order dividers are invalid but must not produce inverted cells
        let edges = axis_edges(&[60.0, 40.0, 80.0], 100);
        for pair in edges.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(*edges.last().unwrap(), 100);
    }

    #[test]
    fn test_clamp_divider_against_neighbors() {
        let dividers = vec![25.0, 50.0, 75.0];
        // Middle divider may not cross its neighbors minus the minimum gap
        assert_eq!(clamp_divider(&dividers, 1, 10.0), 25.0 + MIN_DIVIDER_GAP);
        assert_eq!(clamp_divider(&dividers, 1, 90.0), 75.0 - MIN_DIVIDER_GAP);
        assert_eq!(clamp_divider(&dividers, 1, 55.0), 55.0);
        // First and last clamp against the raster edges
        assert_eq!(clamp_divider(&dividers, 0, -5.0), MIN_DIVIDER_GAP);
        assert_eq!(clamp_divider(&dividers, 2, 120.0), 100.0 - MIN_DIVIDER_GAP);
    }

    #[test]
    fn test_validate_flags_close_dividers() {
        let descriptor = PartitionDescriptor::DividedGrid {
            vertical_dividers: vec![50.0, 50.5],
            horizontal_dividers: vec![],
        };
        let warnings = descriptor.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("vertical divider"));
    }

    #[test]
    fn test_validate_clean_grid() {
        let descriptor = PartitionDescriptor::DividedGrid {
            vertical_dividers: vec![25.0, 50.0, 75.0],
            horizontal_dividers: vec![33.3, 66.6],
        };
        assert!(descriptor.validate().is_empty());
    }

    #[test]
    fn test_region_rect_rounding() {
        let region = Region {
            id: "r0".to_string(),
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 40.0,
        };
        let rect = region_rect(&region, 200, 100);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (20, 20, 60, 40));
    }

    #[test]
    fn test_region_rect_degenerate() {
        let region = Region {
            id: "thin".to_string(),
            x: 50.0,
            y: 50.0,
            width: 0.0,
            height: 10.0,
        };
        let rect = region_rect(&region, 64, 64);
        assert_eq!(rect.width, 0);
    }

    #[test]
    fn test_frame_count() {
        let grid = PartitionDescriptor::UniformGrid { columns: 4, rows: 3 };
        assert_eq!(grid.frame_count(), 12);

        let divided = PartitionDescriptor::DividedGrid {
            vertical_dividers: vec![50.0],
            horizontal_dividers: vec![25.0, 75.0],
        };
        assert_eq!(divided.frame_count(), 6);
        assert_eq!(divided.grid_shape(), Some((2, 3)));

        let free = PartitionDescriptor::FreeRegions { regions: vec![] };
        assert_eq!(free.frame_count(), 0);
        assert_eq!(free.grid_shape(), None);
    }

    #[test]
    fn test_descriptor_serde_roundtrip() {
        let descriptor = PartitionDescriptor::DividedGrid {
            vertical_dividers: vec![25.0, 75.0],
            horizontal_dividers: vec![50.0],
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("\"dividedGrid\""));
        assert!(json.contains("verticalDividers"));
        let parsed: PartitionDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(descriptor, parsed);
    }
}
