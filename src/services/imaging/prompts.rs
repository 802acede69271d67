//! Instruction templates sent alongside the source image.

use super::Hotspot;

pub fn generate(prompt: &str) -> String {
    format!(
        "Generate a single high-quality image for the following description. \
         Return only the image.\nDescription: \"{}\"",
        prompt
    )
}

pub fn edit_at_point(instruction: &str, point: Hotspot, dimensions: (u32, u32)) -> String {
    format!(
        "You are an expert photo editor. Perform a natural, localized edit on the provided \
         image.\nRequest: \"{}\"\nEdit location: the area around pixel (x: {}, y: {}) \
         of the {}x{} image.\nBlend the edit seamlessly with its surroundings. Everything \
         outside the immediate edit area must stay identical to the original. Return only \
         the edited image.",
        instruction, point.x, point.y, dimensions.0, dimensions.1
    )
}

pub fn global_adjustment(instruction: &str) -> String {
    format!(
        "You are an expert photo editor. Apply this photorealistic adjustment to the entire \
         image: \"{}\". Keep the composition and subjects unchanged. Return only the \
         adjusted image.",
        instruction
    )
}

pub fn filter(instruction: &str) -> String {
    format!(
        "Apply the following stylistic filter to the entire image: \"{}\". Change only the \
         look, not the content or composition. Return only the filtered image.",
        instruction
    )
}

pub fn style(instruction: &str) -> String {
    format!(
        "Redraw the provided image in this artistic style: \"{}\". Preserve the subjects, \
         pose and composition. Return only the restyled image.",
        instruction
    )
}

pub fn remove_background() -> String {
    "Remove the background from the provided image. Keep the main subject exactly as it is \
     and make everything else fully transparent. Return a PNG with an alpha channel."
        .to_string()
}

pub fn inpaint() -> String {
    "The first image is the source, the second is a mask of the same size. Replace only the \
     regions that are white in the mask with content that fits the surrounding scene. \
     Pixels that are black in the mask must stay exactly as they are. Return only the \
     resulting image."
        .to_string()
}

pub fn upscale(factor: u32, dimensions: (u32, u32)) -> String {
    format!(
        "Upscale the provided image by a factor of {} to exactly {}x{} pixels. Restore fine \
         detail and sharpness without changing the content. Return only the upscaled image.",
        factor,
        dimensions.0 * factor,
        dimensions.1 * factor
    )
}
