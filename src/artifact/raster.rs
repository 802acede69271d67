//! Pixel-level checks applied to image service output before it is committed.

use image::imageops::{self, FilterType};
use image::{GenericImageView, RgbaImage};

use crate::error::{ArtifactError, GenerationError};

use super::Artifact;

/// Mask luma below this counts as "preserve"
const MASK_THRESHOLD: u8 = 128;

/// Copy every pixel that is black in `mask` from `source` into `result`.
///
/// The service is only trusted with the white region. When the service
/// returned a different size the result is resampled to the source size
/// first, and the mask is scaled with nearest-neighbour so its edges stay hard.
pub fn preserve_unmasked(
    source: &Artifact,
    mask: &Artifact,
    result: Artifact,
) -> Result<Artifact, ArtifactError> {
    let source_pixels = source.decode()?.to_rgba8();
    let (width, height) = source_pixels.dimensions();

    let mut mask_pixels = mask.decode()?.to_luma8();
    if mask_pixels.dimensions() != (width, height) {
        mask_pixels = imageops::resize(&mask_pixels, width, height, FilterType::Nearest);
    }

    let decoded = result.decode()?;
    let resized = decoded.dimensions() != (width, height);
    let mut output: RgbaImage = if resized {
        imageops::resize(&decoded.to_rgba8(), width, height, FilterType::Triangle)
    } else {
        decoded.to_rgba8()
    };

    let mut restored = 0usize;
    for (x, y, mask_pixel) in mask_pixels.enumerate_pixels() {
        if mask_pixel.0[0] < MASK_THRESHOLD {
            let original = source_pixels.get_pixel(x, y);
            let pixel = output.get_pixel_mut(x, y);
            if pixel != original {
                *pixel = *original;
                restored += 1;
            }
        }
    }

    if restored == 0 && !resized {
        return Ok(result);
    }

    bevy::log::debug!("Restored {} preserved pixels in {}", restored, result.name());
    let encoded = Artifact::from_image(&image::DynamicImage::ImageRgba8(output), "inpaint")?;
    Ok(encoded.renamed(result.name()))
}

/// Upscaled output must be exactly `factor` times the source in both axes.
pub fn check_upscale(source: &Artifact, result: &Artifact, factor: u32) -> Result<(), GenerationError> {
    let (sw, sh) = source.dimensions()?;
    let (rw, rh) = result.dimensions()?;
    let expected = (sw * factor, sh * factor);

    if (rw, rh) != expected {
        return Err(GenerationError::NoResult(format!(
            "upscale x{} returned {}x{}, expected {}x{}",
            factor, rw, rh, expected.0, expected.1
        )));
    }
    Ok(())
}

/// Make an upscale result honour the exact-factor contract.
///
/// Exact output passes through. A result that grew but landed on the wrong
/// resolution is resampled to the exact size. Anything smaller than the
/// source is rejected.
pub fn enforce_upscale(source: &Artifact, result: Artifact, factor: u32) -> Result<Artifact, GenerationError> {
    let Err(mismatch) = check_upscale(source, &result, factor) else {
        return Ok(result);
    };

    let (sw, sh) = source.dimensions()?;
    let (rw, rh) = result.dimensions()?;
    if rw <= sw || rh <= sh {
        return Err(mismatch);
    }

    bevy::log::warn!("{}; resampling to exact size", mismatch);
    let resized = result
        .decode()?
        .resize_exact(sw * factor, sh * factor, FilterType::Lanczos3);
    Ok(Artifact::from_image(&resized, "upscale")?.renamed(result.name()))
}
