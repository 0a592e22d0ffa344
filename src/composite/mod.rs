//! Compositing pipeline - per-frame cleanup between extraction and assembly
//!
//! Stages run in a fixed order when enabled, each independently optional:
//! chroma-key matte, halo removal, auto-crop normalization. Compositing is
//! best-effort per frame: a stage that cannot produce a valid result falls
//! back to its input frame and records the fallback, and a single bad frame
//! never aborts the batch.

pub mod autocrop;
pub mod chroma;
pub mod halo;

pub use autocrop::{AlignX, AlignY, AutoCropSettings, CropMode};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::color;
use crate::frame::Frame;

/// Chroma-key stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChromaKeySettings {
    pub enabled: bool,
    /// Key color as a hex string (set directly or via the eyedropper).
    pub color: String,
    /// Euclidean RGB distance tolerance, 0..=150.
    pub tolerance: u32,
}

impl Default for ChromaKeySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            color: "#00ff00".to_string(),
            tolerance: 40,
        }
    }
}

/// Halo removal stage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HaloRemovalSettings {
    pub enabled: bool,
    /// Expansion radius in pixels, 1..=30.
    pub expansion_px: u32,
}

impl Default for HaloRemovalSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            expansion_px: 2,
        }
    }
}

/// Process-wide compositing settings.
///
/// Owned by the orchestrating layer and passed by reference into each
/// pipeline invocation; stages never hold their own copies. Mutated only by
/// explicit user edits, read-only during export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositingSettings {
    pub chroma_key: ChromaKeySettings,
    pub halo_removal: HaloRemovalSettings,
    pub auto_crop: AutoCropSettings,
}

impl CompositingSettings {
    /// Check value ranges, returning one message per violation.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.chroma_key.enabled {
            if let Err(e) = color::parse_color(&self.chroma_key.color) {
                errors.push(format!(
                    "chromaKey.color '{}': {}",
                    self.chroma_key.color, e
                ));
            }
            if self.chroma_key.tolerance > chroma::TOLERANCE_MAX {
                errors.push(format!(
                    "chromaKey.tolerance {} exceeds {}",
                    self.chroma_key.tolerance,
                    chroma::TOLERANCE_MAX
                ));
            }
        }
        if self.halo_removal.enabled
            && !(1..=halo::EXPANSION_MAX).contains(&self.halo_removal.expansion_px)
        {
            errors.push(format!(
                "haloRemoval.expansionPx {} is outside 1..={}",
                self.halo_removal.expansion_px,
                halo::EXPANSION_MAX
            ));
        }
        if self.auto_crop.enabled {
            if self.auto_crop.reduction_px > autocrop::REDUCTION_MAX {
                errors.push(format!(
                    "autoCrop.reductionPx {} exceeds {}",
                    self.auto_crop.reduction_px,
                    autocrop::REDUCTION_MAX
                ));
            }
            if self.auto_crop.canvas_size[0] == 0 || self.auto_crop.canvas_size[1] == 0 {
                errors.push("autoCrop.canvasSize must be at least 1x1".to_string());
            }
        }
        errors
    }
}

/// Pipeline stage identifier, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ChromaKey,
    HaloRemoval,
    AutoCrop,
}

impl Stage {
    /// Human-readable stage name for progress reporting.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::ChromaKey => "chroma key",
            Stage::HaloRemoval => "halo removal",
            Stage::AutoCrop => "auto-crop",
        }
    }
}

/// A stage that fell back to its input for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StageFallback {
    pub frame_index: usize,
    pub stage: Stage,
    pub message: String,
}

/// Result of compositing a batch of frames.
#[derive(Debug)]
pub struct CompositeOutcome {
    pub frames: Vec<Frame>,
    /// Per-frame stage fallbacks; completed frames are preserved regardless.
    pub fallbacks: Vec<StageFallback>,
}

/// Progress callback: `(stage, completed frames, total frames)`.
pub type ProgressFn<'a> = &'a mut dyn FnMut(Stage, usize, usize);

/// Run the enabled stages over `frames` in index order.
///
/// `AnimationRelative` auto-crop reads its reference bounds from frame 0
/// after frame 0 has finished the chroma and halo stages, so frames are
/// processed strictly in index order and stages are never reordered within
/// a frame.
pub fn composite_frames(
    frames: Vec<Frame>,
    settings: &CompositingSettings,
    progress: ProgressFn<'_>,
) -> CompositeOutcome {
    let total = frames.len();
    let mut fallbacks = Vec::new();

    // Resolve the key color once; an unparseable color disables the stage
    // for the whole batch (and is reported against frame 0)
    let key_color = if settings.chroma_key.enabled {
        match color::parse_color(&settings.chroma_key.color) {
            Ok(c) => Some(c),
            Err(e) => {
                warn!("chroma key disabled: {}", e);
                fallbacks.push(StageFallback {
                    frame_index: 0,
                    stage: Stage::ChromaKey,
                    message: format!("invalid key color '{}': {}", settings.chroma_key.color, e),
                });
                None
            }
        }
    } else {
        None
    };

    let mut out: Vec<Frame> = Vec::with_capacity(total);
    let mut reference_bounds: Option<Bounds> = None;

    for (index, frame) in frames.into_iter().enumerate() {
        let mut current = frame;

        if let Some(key) = key_color {
            current = current
                .with_pixels(chroma::key_out(&current.pixels, key, settings.chroma_key.tolerance));
            progress(Stage::ChromaKey, index + 1, total);
        }

        if settings.halo_removal.enabled {
            current = current.with_pixels(halo::expand_transparency(
                &current.pixels,
                settings.halo_removal.expansion_px,
            ));
            progress(Stage::HaloRemoval, index + 1, total);
        }

        if settings.auto_crop.enabled {
            // Frame 0 finishes stages 1-2 before its bounds seed the batch
            let crop_rect = match settings.auto_crop.mode {
                CropMode::AnimationRelative => {
                    *reference_bounds.get_or_insert(current.content_bounds)
                }
                CropMode::CenterCenter => current.content_bounds,
            };
            match autocrop::auto_crop_frame(&current, crop_rect, &settings.auto_crop) {
                Some(cropped) => current = cropped,
                None => {
                    debug!("frame {}: nothing to crop to, passed through", index);
                    fallbacks.push(StageFallback {
                        frame_index: index,
                        stage: Stage::AutoCrop,
                        message: "frame has no visible content to crop to".to_string(),
                    });
                }
            }
            progress(Stage::AutoCrop, index + 1, total);
        }

        out.push(current);
    }

    CompositeOutcome {
        frames: out,
        fallbacks,
    }
}
