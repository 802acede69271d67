//! Image artifacts produced by uploads, generations and edits.
//!
//! An [`Artifact`] is immutable once built. The encoded bytes live behind an
//! `Arc`, so history entries, background tasks and persistence can all hold
//! the same image without copying it.
//!
//! ## Module Structure
//!
//! - [`raster`] - Pixel-level helpers that enforce service output contracts

pub mod raster;


use image::{DynamicImage, ImageFormat, ImageReader};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ArtifactError;

/// MIME type used for everything we encode ourselves
pub const PNG_CONTENT_TYPE: &str = "image/png";

static NAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// An encoded image with its content type and display name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    bytes: Arc<[u8]>,
    content_type: String,
    name: String,
}

impl Artifact {
    pub fn new(bytes: impl Into<Arc<[u8]>>, content_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            content_type: content_type.into(),
            name: name.into(),
        }
    }

    /// Wrap service output, naming it after the operation that produced it.
    pub fn generated(bytes: impl Into<Arc<[u8]>>, content_type: impl Into<String>, label: &str) -> Self {
        let content_type = content_type.into();
        let name = generated_name(label, &content_type);
        Self::new(bytes, content_type, name)
    }

    /// Encode a decoded image as PNG.
    pub fn from_image(image: &DynamicImage, label: &str) -> Result<Self, ArtifactError> {
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| ArtifactError::Encode(e.to_string()))?;
        Ok(Self::generated(buffer.into_inner(), PNG_CONTENT_TYPE, label))
    }

    /// Read an image file from disk, keeping its original encoding.
    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = std::fs::read(path)?;
        let format = image::guess_format(&bytes).map_err(|e| ArtifactError::Decode(e.to_string()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| generated_name("upload", format.to_mime_type()));

        Ok(Self::new(bytes, format.to_mime_type(), name))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Same image under a different display name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            bytes: Arc::clone(&self.bytes),
            content_type: self.content_type.clone(),
            name: name.into(),
        }
    }

    pub fn decode(&self) -> Result<DynamicImage, ArtifactError> {
        image::load_from_memory(&self.bytes).map_err(|e| ArtifactError::Decode(e.to_string()))
    }

    /// Width and height read from the image header, without a full decode.
    pub fn dimensions(&self) -> Result<(u32, u32), ArtifactError> {
        ImageReader::new(Cursor::new(&self.bytes[..]))
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| ArtifactError::Decode(e.to_string()))
    }
}

/// File extension for a MIME type, falling back to `bin`.
pub fn extension_for(content_type: &str) -> &'static str {
    ImageFormat::from_mime_type(content_type)
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("bin")
}

/// `<label>-<timestamp>-<n>.<ext>`
fn generated_name(label: &str, content_type: &str) -> String {
    let n = NAME_COUNTER.fetch_add(1, Ordering::Relaxed);
    let timestamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    format!("{}-{}-{}.{}", label, timestamp, n, extension_for(content_type))
}
