//! Pipeline orchestration - extraction, compositing and supersede semantics
//!
//! The chain is always extraction, then compositing (fixed stage order),
//! then assembly; stages are never reordered and frames are processed in
//! index order. A session tags each extraction with a generation so that a
//! re-triggered pass supersedes an in-flight one instead of merging with it
//! (last-write-wins on the visible frame set).

use image::RgbaImage;
use log::debug;

use crate::composite::{self, CompositeOutcome, CompositingSettings, ProgressFn};
use crate::frame::{ExtractionResult, Warning};
use crate::partition::PartitionDescriptor;

/// An extraction tagged with the session generation that produced it.
#[derive(Debug, Clone)]
pub struct Batch {
    pub generation: u64,
    pub extraction: ExtractionResult,
}

/// Tracks the newest extraction and rejects stale batches.
#[derive(Debug, Default)]
pub struct Session {
    generation: u64,
    latest: Option<Batch>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract frames from `source`, superseding any previous batch.
    pub fn extract(&mut self, source: &RgbaImage, descriptor: PartitionDescriptor) -> Batch {
        self.generation += 1;
        let batch = Batch {
            generation: self.generation,
            extraction: crate::extract::extract(source, descriptor),
        };
        self.latest = Some(batch.clone());
        batch
    }

    /// Adopt a processed batch as the visible frame set.
    ///
    /// Returns `false` without touching the session when the batch comes
    /// from an older generation than the newest extraction.
    pub fn adopt(&mut self, batch: Batch) -> bool {
        if batch.generation < self.generation {
            debug!(
                "dropping stale batch (generation {} < {})",
                batch.generation, self.generation
            );
            return false;
        }
        self.latest = Some(batch);
        true
    }

    /// The batch currently visible, if any.
    pub fn latest(&self) -> Option<&Batch> {
        self.latest.as_ref()
    }
}

/// A fully processed frame set ready for assembly or direct export.
#[derive(Debug)]
pub struct ProcessedBatch {
    pub extraction: ExtractionResult,
    /// Warnings from extraction plus compositing fallbacks, in that order.
    pub warnings: Vec<Warning>,
}

/// Run extraction and compositing over a source raster.
///
/// Convenience entry point for callers that do not need session supersede
/// tracking. Settings are read, never mutated.
pub fn process(
    source: &RgbaImage,
    descriptor: PartitionDescriptor,
    settings: &CompositingSettings,
    progress: ProgressFn<'_>,
) -> ProcessedBatch {
    let extraction = crate::extract::extract(source, descriptor);
    let mut warnings = extraction.warnings.clone();

    let CompositeOutcome { frames, fallbacks } =
        composite::composite_frames(extraction.frames, settings, progress);

    for fallback in &fallbacks {
        warnings.push(Warning::new(format!(
            "frame {} ({}): {}",
            fallback.frame_index,
            fallback.stage.display_name(),
            fallback.message
        )));
    }

    ProcessedBatch {
        extraction: ExtractionResult {
            frames,
            descriptor: extraction.descriptor,
            layout: extraction.layout,
            warnings: extraction.warnings,
        },
        warnings,
    }
}
