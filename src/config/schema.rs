//! Configuration schema types for `scut.toml`
//!
//! Defines the structure and validation rules for a spritecut project:
//! output defaults plus the process-wide compositing settings that every
//! pipeline invocation reads.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::composite::CompositingSettings;

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name, used as the default output stem
    pub name: String,
    /// Output directory for sheets, frames and bundles
    pub out: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: "sprites".to_string(),
            out: PathBuf::from("build"),
        }
    }
}

/// Export defaults applied to all outputs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    /// Integer upscale factor for exported rasters (1-16)
    pub scale: u8,
    /// Pretty-print the emitted config JSON
    pub pretty: bool,
    /// Also write a ZIP bundle next to the loose files
    pub bundle: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: 1,
            pretty: true,
            bundle: false,
        }
    }
}

/// Root configuration for a spritecut project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScutConfig {
    pub project: ProjectConfig,
    /// Compositing settings shared by every pipeline invocation
    pub settings: CompositingSettings,
    pub export: ExportConfig,
}

impl ScutConfig {
    /// Validate value ranges, returning one message per violation.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.settings.validate();
        if self.export.scale == 0 || self.export.scale > 16 {
            errors.push(format!(
                "export.scale {} is outside 1..=16",
                self.export.scale
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScutConfig::default();
        assert_eq!(config.project.name, "sprites");
        assert_eq!(config.project.out, PathBuf::from("build"));
        assert_eq!(config.export.scale, 1);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: ScutConfig = toml::from_str("").unwrap();
        assert_eq!(config.project.name, "sprites");
        assert!(!config.settings.chroma_key.enabled);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_src = r##"
            [project]
            name = "hero"
            out = "dist"

            [settings.chromaKey]
            enabled = true
            color = "#3aff5c"
            tolerance = 60

            [settings.haloRemoval]
            enabled = true
            expansionPx = 3

            [settings.autoCrop]
            enabled = true
            mode = "centerCenter"
            canvasSize = [96, 96]
            reductionPx = 4
            alignX = "left"
            alignY = "bottom"

            [export]
            scale = 2
            bundle = true
        "##;
        let config: ScutConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.project.name, "hero");
        assert!(config.settings.chroma_key.enabled);
        assert_eq!(config.settings.chroma_key.tolerance, 60);
        assert_eq!(config.settings.halo_removal.expansion_px, 3);
        assert_eq!(config.settings.auto_crop.canvas_size, [96, 96]);
        assert_eq!(config.export.scale, 2);
        assert!(config.export.bundle);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_range_errors() {
        let mut config = ScutConfig::default();
        config.export.scale = 0;
        config.settings.halo_removal.enabled = true;
        config.settings.halo_removal.expansion_px = 99;
        let errors = config.validate();
        assert_eq!(errors.len(), 2);
    }
}
