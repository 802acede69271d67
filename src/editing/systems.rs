//! Bevy systems driving edits: start, poll, retry, open and export.

use bevy::prelude::*;
use bevy::tasks::AsyncComputeTaskPool;
use futures_lite::future;
use std::sync::Arc;

use crate::artifact::Artifact;
use crate::config::UpdateLastOpenDirRequest;
use crate::error::{EditError, HistoryError};
use crate::history::EditHistory;
use crate::services::ImageService;

use super::messages::{EditRequest, ExportImageRequest, OpenImageRequest, RetryEditRequest};
use super::operation::EditOperation;
use super::state::{EditOutcome, EditSession, EditTask};

/// System to turn a retry click into a fresh edit request
pub fn retry_failed_edit(
    mut events: MessageReader<RetryEditRequest>,
    mut session: ResMut<EditSession>,
    mut edits: MessageWriter<EditRequest>,
) {
    for _ in events.read() {
        if let Some(operation) = session.retry_operation() {
            info!("Retrying {}", operation.label());
            edits.write(EditRequest(operation));
        }
    }
}

/// Starts a background task for each accepted edit request
pub fn start_edit_tasks(
    mut commands: Commands,
    mut events: MessageReader<EditRequest>,
    mut session: ResMut<EditSession>,
    history: Res<EditHistory>,
    service: Option<Res<ImageService>>,
) {
    for event in events.read() {
        let operation = event.0.clone();

        let Some(service) = service.as_ref() else {
            error!("Image service is not configured; dropping {}", operation.label());
            continue;
        };

        if operation.needs_source() && history.is_empty() {
            let err = EditError::from(HistoryError::InvalidState("edit requested before seed"));
            error!("{}", err);
            session.record_failure(None, &err);
            continue;
        }

        // Only one edit may be in flight
        let guard = match session.begin(&operation) {
            Ok(guard) => guard,
            Err(e) => {
                warn!("Ignoring {}: {}", operation.label(), e);
                session.last_error = Some(e.to_string());
                continue;
            }
        };

        let service = Arc::clone(&service.0);
        let source = history.current().cloned();
        info!("Starting {}", operation.label());

        let task_pool = AsyncComputeTaskPool::get();
        let task = task_pool.spawn(async move {
            let result = operation.run(service.as_ref(), source.as_ref());
            EditOutcome {
                operation,
                result,
                guard,
            }
        });

        commands.spawn(EditTask(task));
    }
}

/// Polls edit tasks and commits or records their results
pub fn poll_edit_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut EditTask)>,
    mut session: ResMut<EditSession>,
    mut history: ResMut<EditHistory>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        // A live task always holds the busy guard. If the flag is clear the
        // task unwound before producing an outcome; don't poll it again.
        if !session.is_busy() {
            error!("Edit task ended without producing a result");
            session.pending = None;
            session.record_message("The edit stopped unexpectedly. Please try again.".to_string());
            commands.entity(entity).despawn();
            continue;
        }

        if let Some(outcome) = future::block_on(future::poll_once(&mut task.0)) {
            let EditOutcome {
                operation,
                result,
                guard,
            } = outcome;

            match commit_outcome(&mut history, &operation, result) {
                Ok(()) => {
                    info!(
                        "{} committed, history now {} entries",
                        operation.label(),
                        history.len()
                    );
                    session.record_success();
                }
                Err(e) => {
                    warn!("{} failed: {}", operation.label(), e);
                    session.record_failure(Some(operation), &e);
                }
            }

            drop(guard);
            commands.entity(entity).despawn();
        }
    }
}

/// Apply a finished edit to the history. Failures leave it untouched.
pub(crate) fn commit_outcome(
    history: &mut EditHistory,
    operation: &EditOperation,
    result: Result<Artifact, EditError>,
) -> Result<(), EditError> {
    let artifact = result?;
    if operation.starts_session() {
        history.seed(artifact);
        Ok(())
    } else {
        history.append(artifact).map_err(EditError::from)
    }
}

/// Seeds a new session from an image file
pub fn open_image_system(
    mut events: MessageReader<OpenImageRequest>,
    mut session: ResMut<EditSession>,
    mut history: ResMut<EditHistory>,
    mut config_events: MessageWriter<UpdateLastOpenDirRequest>,
) {
    for event in events.read() {
        if session.is_busy() {
            warn!("Not opening {:?} while an edit is in progress", event.path);
            continue;
        }

        match Artifact::from_file(&event.path) {
            Ok(artifact) => {
                info!("Opened {:?} as a new session", event.path);
                history.seed(artifact);
                session.dismiss_error();
                if let Some(dir) = event.path.parent() {
                    config_events.write(UpdateLastOpenDirRequest {
                        path: dir.to_path_buf(),
                    });
                }
            }
            Err(e) => {
                error!("Failed to open {:?}: {}", event.path, e);
                session.record_message(format!("Could not open image: {}", e));
            }
        }
    }
}

/// Writes the current artifact to the requested path
pub fn export_image_system(
    mut events: MessageReader<ExportImageRequest>,
    mut session: ResMut<EditSession>,
    history: Res<EditHistory>,
) {
    for event in events.read() {
        let Some(current) = history.current() else {
            warn!("Nothing to export");
            continue;
        };

        match std::fs::write(&event.path, current.bytes()) {
            Ok(()) => info!("Exported {} to {:?}", current.name(), event.path),
            Err(e) => {
                error!("Failed to export to {:?}: {}", event.path, e);
                session.record_message(format!("Could not export image: {}", e));
            }
        }
    }
}
