//! Edit operations and how each one runs against the image service.

use crate::artifact::Artifact;
use crate::artifact::raster::{enforce_upscale, preserve_unmasked};
use crate::error::{EditError, GenerationError, HistoryError};
use crate::services::imaging::{Hotspot, ImageTransformService, UpscaleFactor};

/// One edit the user can request
#[derive(Clone, Debug, PartialEq)]
pub enum EditOperation {
    /// Start a new session from a text prompt
    GenerateFromText { prompt: String },
    EditAtPoint { instruction: String, point: Hotspot },
    GlobalAdjustment { instruction: String },
    Filter { instruction: String },
    Style { instruction: String },
    RemoveBackground,
    /// White in `mask` is replaced, black is preserved
    InpaintMasked { mask: Artifact },
    Upscale { factor: UpscaleFactor },
}

impl EditOperation {
    /// Short slug used in generated artifact names and logs
    pub fn label(&self) -> &'static str {
        match self {
            EditOperation::GenerateFromText { .. } => "generate",
            EditOperation::EditAtPoint { .. } => "edit",
            EditOperation::GlobalAdjustment { .. } => "adjust",
            EditOperation::Filter { .. } => "filter",
            EditOperation::Style { .. } => "style",
            EditOperation::RemoveBackground => "cutout",
            EditOperation::InpaintMasked { .. } => "inpaint",
            EditOperation::Upscale { .. } => "upscale",
        }
    }

    /// Text shown while the operation is in flight
    pub fn description(&self) -> String {
        match self {
            EditOperation::GenerateFromText { prompt } => format!("Generating \"{}\"...", prompt),
            EditOperation::EditAtPoint { instruction, point } => {
                format!("Editing at ({}, {}): {}...", point.x, point.y, instruction)
            }
            EditOperation::GlobalAdjustment { instruction } => format!("Adjusting: {}...", instruction),
            EditOperation::Filter { instruction } => format!("Applying filter: {}...", instruction),
            EditOperation::Style { instruction } => format!("Applying style: {}...", instruction),
            EditOperation::RemoveBackground => "Removing background...".to_string(),
            EditOperation::InpaintMasked { .. } => "Filling masked region...".to_string(),
            EditOperation::Upscale { factor } => format!("Upscaling x{}...", factor.factor()),
        }
    }

    /// Whether the operation transforms the current artifact
    pub fn needs_source(&self) -> bool {
        !matches!(self, EditOperation::GenerateFromText { .. })
    }

    /// Whether a successful result replaces the session instead of extending it
    pub fn starts_session(&self) -> bool {
        !self.needs_source()
    }

    /// Call the service and enforce its output contract.
    ///
    /// Blocking; runs on a background task.
    pub fn run(
        &self,
        service: &dyn ImageTransformService,
        source: Option<&Artifact>,
    ) -> Result<Artifact, EditError> {
        let source = || source.ok_or(HistoryError::InvalidState("edit requested before seed"));

        let result = match self {
            EditOperation::GenerateFromText { prompt } => service.generate_from_text(prompt)?,
            EditOperation::EditAtPoint { instruction, point } => {
                service.edit_at_point(source()?, instruction, *point)?
            }
            EditOperation::GlobalAdjustment { instruction } => {
                service.apply_global_adjustment(source()?, instruction)?
            }
            EditOperation::Filter { instruction } => service.apply_filter(source()?, instruction)?,
            EditOperation::Style { instruction } => service.apply_style(source()?, instruction)?,
            EditOperation::RemoveBackground => service.remove_background(source()?)?,
            EditOperation::InpaintMasked { mask } => {
                let source = source()?;
                let raw = service.inpaint_masked(source, mask)?;
                preserve_unmasked(source, mask, raw).map_err(GenerationError::from)?
            }
            EditOperation::Upscale { factor } => {
                let source = source()?;
                let raw = service.upscale(source, *factor)?;
                enforce_upscale(source, raw, factor.factor())?
            }
        };
        Ok(result)
    }
}
