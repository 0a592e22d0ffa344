//! Animation config emission - the JSON contract a game engine loads
//!
//! # Output Format
//!
//! ```json
//! {
//!   "sheets": {
//!     "walk": { "path": "walk.png", "columns": 6, "rows": 8,
//!               "frameWidth": 64, "frameHeight": 64 }
//!   },
//!   "animations": {
//!     "walk": {
//!       "down":      { "sheet": "walk", "startFrame": 0,  "frameCount": 6,
//!                      "frameDuration": 100, "loop": true },
//!       "down-left": { "sheet": "walk", "startFrame": 6,  "frameCount": 6,
//!                      "frameDuration": 100, "loop": true }
//!     },
//!     "hurt": { "sheet": "hurt", "startFrame": 0, "frameCount": 4,
//!               "frameDuration": 120, "loop": false }
//!   }
//! }
//! ```
//!
//! Directional entries appear in the fixed direction-table order, with
//! `startFrame = directionIndex * framesPerDirection`. The direction tables
//! in [`crate::directions`] are the single source of truth; this module
//! never derives row order on its own.

use indexmap::IndexMap;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::animation::AnimationType;
use crate::directions::{
    Direction, RowLayout, ATTACK_ROW_ORDER, EIGHT_DIRECTION_ORDER, FOUR_DIRECTION_ORDER,
};
use crate::export::Result;
use crate::frame::Warning;
use crate::spritesheet::SpriteSheet;

/// Grid geometry of one exported sheet raster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetEntry {
    pub path: String,
    pub columns: u32,
    pub rows: u32,
    pub frame_width: u32,
    pub frame_height: u32,
}

/// One playable clip: a frame range on a sheet plus playback constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipEntry {
    pub sheet: String,
    pub start_frame: u32,
    pub frame_count: u32,
    pub frame_duration: u32,
    #[serde(rename = "loop")]
    pub looped: bool,
}

/// A flat clip or one clip per direction, keyed by direction name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnimationEntry {
    Directional(IndexMap<String, ClipEntry>),
    Flat(ClipEntry),
}

/// The emitted config: sheet geometry plus animation clips.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnimationConfig {
    pub sheets: IndexMap<String, SheetEntry>,
    pub animations: IndexMap<String, AnimationEntry>,
}

impl AnimationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an assembled sheet under `name`, referenced by `path`.
    pub fn add_sheet(&mut self, name: &str, path: &str, sheet: &SpriteSheet) {
        self.sheets.insert(
            name.to_string(),
            SheetEntry {
                path: path.to_string(),
                columns: sheet.columns,
                rows: sheet.rows,
                frame_width: sheet.cell_width,
                frame_height: sheet.cell_height,
            },
        );
    }

    /// Emit animation entries for one sheet.
    ///
    /// The row layout decides the shape: direction rows produce one clip
    /// per direction in table order, the attack-combo layout produces three
    /// flat clips, and anything else produces a single flat clip covering
    /// the whole sheet. A directional animation over an unlabeled layout is
    /// recoverable: it degrades to the flat fallback with a warning.
    pub fn add_animation(
        &mut self,
        animation: AnimationType,
        sheet_name: &str,
        sheet: &SpriteSheet,
        layout: RowLayout,
    ) -> Vec<Warning> {
        let mut warnings = Vec::new();
        let spec = animation.spec();
        let frames_per_row = sheet.columns;

        match layout {
            RowLayout::EightDirection => {
                self.insert_directional(
                    animation,
                    sheet_name,
                    &EIGHT_DIRECTION_ORDER,
                    frames_per_row,
                );
            }
            RowLayout::FourDirection => {
                self.insert_directional(
                    animation,
                    sheet_name,
                    &FOUR_DIRECTION_ORDER,
                    frames_per_row,
                );
            }
            RowLayout::AttackCombo => {
                // Three flat clips on one sheet, one per attack row; an
                // unknown row name falls back to the requested animation's
                // playback constants
                for (row, &name) in ATTACK_ROW_ORDER.iter().enumerate() {
                    let row_spec = AnimationType::parse(name)
                        .map(|a| a.spec())
                        .unwrap_or(spec);
                    self.animations.insert(
                        name.to_string(),
                        AnimationEntry::Flat(ClipEntry {
                            sheet: sheet_name.to_string(),
                            start_frame: row as u32 * frames_per_row,
                            frame_count: frames_per_row,
                            frame_duration: row_spec.frame_duration_ms,
                            looped: row_spec.loops,
                        }),
                    );
                }
            }
            RowLayout::Unlabeled => {
                if spec.directional {
                    warnings.push(Warning::new(format!(
                        "Animation '{}' is directional but its sheet has no direction rows; \
                         emitting a flat entry",
                        animation.key()
                    )));
                }
                self.animations.insert(
                    animation.key().to_string(),
                    AnimationEntry::Flat(ClipEntry {
                        sheet: sheet_name.to_string(),
                        start_frame: 0,
                        frame_count: sheet.placements.len() as u32,
                        frame_duration: spec.frame_duration_ms,
                        looped: spec.loops,
                    }),
                );
            }
        }

        warnings
    }

    fn insert_directional(
        &mut self,
        animation: AnimationType,
        sheet_name: &str,
        order: &[Direction],
        frames_per_direction: u32,
    ) {
        let spec = animation.spec();
        let mut clips = IndexMap::with_capacity(order.len());
        for (index, direction) in order.iter().enumerate() {
            clips.insert(
                direction.key().to_string(),
                ClipEntry {
                    sheet: sheet_name.to_string(),
                    start_frame: index as u32 * frames_per_direction,
                    frame_count: frames_per_direction,
                    frame_duration: spec.frame_duration_ms,
                    looped: spec.loops,
                },
            );
        }
        self.animations.insert(
            animation.key().to_string(),
            AnimationEntry::Directional(clips),
        );
    }

    /// Serialize the config to a JSON string.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Write the config JSON to a file, creating parent directories.
    pub fn write(&self, path: &Path, pretty: bool) -> Result<()> {
        let json = self.to_json(pretty)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
