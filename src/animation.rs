//! Animation types - per-type playback constants and layout validation
//!
//! Frame durations and loop flags are fixed per animation type, not
//! computed; the table below is the external configuration surface the
//! config emitter reads.

use crate::directions::RowLayout;
use crate::frame::{ExtractionResult, Warning};

/// The animation types a character sheet can be sliced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationType {
    Walk,
    Idle,
    Attack1,
    Attack2,
    Attack3,
    Dash,
    Hurt,
    Death,
    Special,
}

/// Playback constants for one animation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSpec {
    /// Duration of each frame in milliseconds.
    pub frame_duration_ms: u32,
    /// Whether the animation repeats.
    pub loops: bool,
    /// Whether the type is played per facing direction.
    pub directional: bool,
}

impl AnimationType {
    pub const ALL: [AnimationType; 9] = [
        AnimationType::Walk,
        AnimationType::Idle,
        AnimationType::Attack1,
        AnimationType::Attack2,
        AnimationType::Attack3,
        AnimationType::Dash,
        AnimationType::Hurt,
        AnimationType::Death,
        AnimationType::Special,
    ];

    /// Stable identifier used in config keys and file names.
    pub fn key(&self) -> &'static str {
        match self {
            AnimationType::Walk => "walk",
            AnimationType::Idle => "idle",
            AnimationType::Attack1 => "attack1",
            AnimationType::Attack2 => "attack2",
            AnimationType::Attack3 => "attack3",
            AnimationType::Dash => "dash",
            AnimationType::Hurt => "hurt",
            AnimationType::Death => "death",
            AnimationType::Special => "special",
        }
    }

    /// Parse an animation type identifier.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.key() == s)
    }

    /// Playback constants for this type.
    pub fn spec(&self) -> AnimationSpec {
        match self {
            AnimationType::Walk => AnimationSpec {
                frame_duration_ms: 100,
                loops: true,
                directional: true,
            },
            AnimationType::Idle => AnimationSpec {
                frame_duration_ms: 150,
                loops: true,
                directional: true,
            },
            AnimationType::Attack1 | AnimationType::Attack2 | AnimationType::Attack3 => {
                AnimationSpec {
                    frame_duration_ms: 80,
                    loops: false,
                    directional: false,
                }
            }
            AnimationType::Dash => AnimationSpec {
                frame_duration_ms: 70,
                loops: false,
                directional: false,
            },
            AnimationType::Hurt => AnimationSpec {
                frame_duration_ms: 120,
                loops: false,
                directional: false,
            },
            AnimationType::Death => AnimationSpec {
                frame_duration_ms: 140,
                loops: false,
                directional: false,
            },
            AnimationType::Special => AnimationSpec {
                frame_duration_ms: 90,
                loops: false,
                directional: false,
            },
        }
    }
}

/// Check an extraction against the expectations of an animation type.
///
/// Mismatches are warnings, not errors: the export still runs with the
/// un-split fallback sequence.
pub fn validate_layout(animation: AnimationType, extraction: &ExtractionResult) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if extraction.frames.is_empty() {
        warnings.push(Warning::new(format!(
            "Animation '{}' has no frames",
            animation.key()
        )));
        return warnings;
    }

    let spec = animation.spec();
    if spec.directional {
        match extraction.layout {
            RowLayout::EightDirection | RowLayout::FourDirection => {}
            _ => warnings.push(Warning::new(format!(
                "Animation '{}' is directional but the extraction has no direction rows; \
                 exporting a single unlabeled sequence",
                animation.key()
            ))),
        }
    }

    warnings
}
