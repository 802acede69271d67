//! Message types for history navigation.

use bevy::prelude::*;

/// Request to move through (or discard) the edit history
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRequest {
    /// Jump to a specific entry
    Seek(usize),
    Undo,
    Redo,
    /// Jump back to entry 0
    RevertToOriginal,
    /// Discard the session entirely
    NewSession,
}
