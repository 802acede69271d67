//! Message types for edit operations.

use bevy::prelude::*;
use std::path::PathBuf;

use super::operation::EditOperation;

/// Request to run an edit against the current artifact
#[derive(Message, Clone, Debug)]
pub struct EditRequest(pub EditOperation);

/// Request to re-run the last failed edit
#[derive(Message)]
pub struct RetryEditRequest;

/// Request to start a session from an image file
#[derive(Message)]
pub struct OpenImageRequest {
    pub path: PathBuf,
}

/// Request to write the current artifact to disk
#[derive(Message)]
pub struct ExportImageRequest {
    pub path: PathBuf,
}
