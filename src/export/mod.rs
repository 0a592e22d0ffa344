//! Export surface - animation config emission and bundle packaging
//!
//! The emitted `config.json` is the durable, engine-facing contract: field
//! names, direction order and `startFrame` arithmetic must match exactly
//! for a downstream engine to load the sheets correctly.

pub mod archive;
pub mod config;

pub use archive::write_bundle;
pub use config::{AnimationConfig, AnimationEntry, ClipEntry, SheetEntry};

/// Common error type for export operations.
#[derive(Debug)]
pub enum ExportError {
    /// IO error during file writing
    Io(std::io::Error),
    /// Image encoding error
    Image(image::ImageError),
    /// Serialization error
    Serialization(String),
    /// Archive packaging error
    Archive(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Image(e) => write!(f, "Image error: {}", e),
            ExportError::Serialization(e) => write!(f, "Serialization error: {}", e),
            ExportError::Archive(e) => write!(f, "Archive error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Image(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Serialization(e.to_string())
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        ExportError::Archive(e.to_string())
    }
}

/// Result alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
