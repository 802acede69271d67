//! Edit session resource and background task components.

use bevy::prelude::*;
use bevy::tasks::Task;

use crate::artifact::Artifact;
use crate::error::EditError;

use super::busy::{BusyFlag, BusyGuard};
use super::operation::EditOperation;

/// Resource tracking the in-flight edit and the last failure
#[derive(Resource, Default)]
pub struct EditSession {
    busy: BusyFlag,
    /// Description of the edit currently running
    pub pending: Option<String>,
    /// Error message from the last failed operation
    pub last_error: Option<String>,
    /// The operation that failed, kept for "Retry"
    pub last_failed: Option<EditOperation>,
}

impl EditSession {
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Claim the session for `operation`.
    pub fn begin(&mut self, operation: &EditOperation) -> Result<BusyGuard, EditError> {
        let guard = self.busy.try_acquire().ok_or(EditError::Busy)?;
        self.pending = Some(operation.description());
        self.last_error = None;
        self.last_failed = None;
        Ok(guard)
    }

    /// The failed operation to send again. It stays available until a new
    /// edit actually starts.
    pub fn retry_operation(&mut self) -> Option<EditOperation> {
        let operation = self.last_failed.clone()?;
        self.last_error = None;
        Some(operation)
    }

    pub fn record_success(&mut self) {
        self.pending = None;
        self.last_error = None;
        self.last_failed = None;
    }

    pub fn record_failure(&mut self, operation: Option<EditOperation>, error: &EditError) {
        self.pending = None;
        self.last_error = Some(error.to_string());
        // Only external failures are worth retrying
        self.last_failed = match error {
            EditError::Generation(_) => operation,
            _ => None,
        };
    }

    /// Report a non-edit failure (file I/O) without a retry affordance.
    pub fn record_message(&mut self, message: String) {
        self.last_error = Some(message);
        self.last_failed = None;
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
        self.last_failed = None;
    }
}

/// What a finished edit task hands back.
///
/// Owns the busy guard so the session stays busy until the result has been
/// committed (or rejected) on the main thread.
pub struct EditOutcome {
    pub operation: EditOperation,
    pub result: Result<Artifact, EditError>,
    pub guard: BusyGuard,
}

/// Background task running one edit
#[derive(Component)]
pub struct EditTask(pub Task<EditOutcome>);
