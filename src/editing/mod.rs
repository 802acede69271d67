//! Edit operations against the image service.
//!
//! An [`EditRequest`] names one [`EditOperation`]. At most one runs at a
//! time: the [`EditSession`] busy flag is claimed when the background task
//! starts and released once the result has been committed to the
//! [`EditHistory`](crate::history::EditHistory) or recorded as a failure.
//! A failed operation never touches the history.
//!
//! ## Module Structure
//!
//! - [`busy`] - BusyFlag and its drop guard
//! - [`operation`] - EditOperation and how each variant calls the service
//! - [`state`] - EditSession resource and the task component
//! - [`messages`] - Request messages
//! - [`systems`] - Start, poll, retry, open and export systems

mod busy;
mod messages;
mod operation;
mod state;
mod systems;


// Re-exports
pub use busy::{BusyFlag, BusyGuard};
pub use messages::{EditRequest, ExportImageRequest, OpenImageRequest, RetryEditRequest};
pub use operation::EditOperation;
pub use state::{EditOutcome, EditSession, EditTask};
pub use systems::{
    export_image_system, open_image_system, poll_edit_tasks, retry_failed_edit, start_edit_tasks,
};

use bevy::prelude::*;

pub struct EditingPlugin;

impl Plugin for EditingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditSession>()
            .add_message::<EditRequest>()
            .add_message::<RetryEditRequest>()
            .add_message::<OpenImageRequest>()
            .add_message::<ExportImageRequest>()
            .add_systems(
                Update,
                (
                    retry_failed_edit.run_if(on_message::<RetryEditRequest>),
                    start_edit_tasks.run_if(on_message::<EditRequest>),
                    poll_edit_tasks,
                    open_image_system.run_if(on_message::<OpenImageRequest>),
                    export_image_system.run_if(on_message::<ExportImageRequest>),
                )
                    .chain(),
            );
    }
}
