//! Edit history for the editing session.
//!
//! Every committed edit appends an [`Artifact`](crate::artifact::Artifact)
//! to a linear log. Undo and redo only move a cursor; committing a new edit
//! from a rewound cursor discards the abandoned future.
//!
//! ## Usage
//!
//! - **Ctrl+Z**: Step back one entry
//! - **Ctrl+Y** or **Ctrl+Shift+Z**: Step forward one entry
//!
//! ## Module Structure
//!
//! - [`edit_history`] - EditHistory resource and its operations
//! - [`messages`] - HistoryRequest message for navigation
//! - [`systems`] - Bevy systems for keyboard shortcuts and request handling

mod edit_history;
mod messages;
mod systems;


// Re-exports
pub use edit_history::EditHistory;
pub use messages::HistoryRequest;
pub use systems::{apply_history_requests, handle_history_shortcuts};

use bevy::prelude::*;

pub struct HistoryPlugin;

impl Plugin for HistoryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditHistory>()
            .add_message::<HistoryRequest>()
            .add_systems(
                Update,
                (
                    handle_history_shortcuts,
                    apply_history_requests.run_if(on_message::<HistoryRequest>),
                )
                    .chain(),
            );
    }
}
