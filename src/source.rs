//! Source raster loading - files, memory buffers and still sequences
//!
//! Every input origin (a generated sheet image, an uploaded still, frames
//! grabbed from a video elsewhere) is normalized to an RGBA raster here
//! before it reaches the extractor. Decode failures are fatal for that
//! source; no partial extraction is attempted.

use image::RgbaImage;
use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for source loading failures
#[derive(Debug, Error)]
pub enum SourceError {
    /// The raster could not be decoded
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },
    /// The glob pattern was invalid
    #[error("invalid sequence pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    /// The pattern matched no files
    #[error("sequence pattern '{0}' matched no files")]
    EmptySequence(String),
}

/// Decode a raster from a file path.
pub fn load_raster(path: &Path) -> Result<RgbaImage, SourceError> {
    let image = image::open(path).map_err(|source| SourceError::Decode {
        path: path.display().to_string(),
        source,
    })?;
    let rgba = image.to_rgba8();
    debug!("decoded {} ({}x{})", path.display(), rgba.width(), rgba.height());
    Ok(rgba)
}

/// Decode a raster from an in-memory buffer (e.g. a provider response).
pub fn load_raster_bytes(bytes: &[u8]) -> Result<RgbaImage, SourceError> {
    let image = image::load_from_memory(bytes).map_err(|source| SourceError::Decode {
        path: "<memory>".to_string(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Load an ordered still-image sequence matching a glob pattern.
///
/// Paths are sorted lexicographically, so zero-padded frame numbering in
/// file names gives frame order. Unreadable matches are decode failures,
/// not skips.
pub fn load_sequence(pattern: &str) -> Result<Vec<(PathBuf, RgbaImage)>, SourceError> {
    let paths = glob::glob(pattern).map_err(|source| SourceError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut files: Vec<PathBuf> = paths.filter_map(|entry| entry.ok()).collect();
    files.sort();
    if files.is_empty() {
        return Err(SourceError::EmptySequence(pattern.to_string()));
    }

    let mut frames = Vec::with_capacity(files.len());
    for path in files {
        let raster = load_raster(&path)?;
        frames.push((path, raster));
    }
    Ok(frames)
}
