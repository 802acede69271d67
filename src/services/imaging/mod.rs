//! Client side of the generative image service.
//!
//! Every edit the user can apply maps to one method of
//! [`ImageTransformService`]. Implementations are blocking; callers run them
//! on the async compute pool.

mod gemini;
mod prompts;


pub use gemini::GeminiImageService;

use crate::artifact::Artifact;
use crate::error::GenerationError;

/// Pixel position inside the source image
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hotspot {
    pub x: u32,
    pub y: u32,
}

/// Supported upscale multipliers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UpscaleFactor {
    #[default]
    X2,
    X4,
}

impl UpscaleFactor {
    pub fn factor(self) -> u32 {
        match self {
            UpscaleFactor::X2 => 2,
            UpscaleFactor::X4 => 4,
        }
    }

    pub fn all() -> &'static [UpscaleFactor] {
        &[UpscaleFactor::X2, UpscaleFactor::X4]
    }
}

/// Operations offered by the external image service.
///
/// All methods share one failure taxonomy: [`GenerationError::Blocked`] for
/// policy refusals, [`GenerationError::Service`] for transport or API errors,
/// and [`GenerationError::NoResult`] when nothing usable came back.
pub trait ImageTransformService: Send + Sync {
    fn generate_from_text(&self, prompt: &str) -> Result<Artifact, GenerationError>;

    /// Localized edit around `point`.
    fn edit_at_point(
        &self,
        source: &Artifact,
        instruction: &str,
        point: Hotspot,
    ) -> Result<Artifact, GenerationError>;

    fn apply_global_adjustment(
        &self,
        source: &Artifact,
        instruction: &str,
    ) -> Result<Artifact, GenerationError>;

    fn apply_filter(&self, source: &Artifact, instruction: &str) -> Result<Artifact, GenerationError>;

    fn apply_style(&self, source: &Artifact, instruction: &str) -> Result<Artifact, GenerationError>;

    fn remove_background(&self, source: &Artifact) -> Result<Artifact, GenerationError>;

    /// Replace the white region of `mask`; black pixels must come back unchanged.
    fn inpaint_masked(&self, source: &Artifact, mask: &Artifact) -> Result<Artifact, GenerationError>;

    /// Output must be exactly `factor` times the source dimensions.
    fn upscale(&self, source: &Artifact, factor: UpscaleFactor) -> Result<Artifact, GenerationError>;
}
