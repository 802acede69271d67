//! Systems restoring and persisting session state.

use bevy::prelude::*;

use crate::constants::SESSION_KEY;
use crate::error::StorageError;
use crate::history::EditHistory;

use super::SessionStorage;
use super::saved_history::{load_history, save_history};
use super::store::KeyValueStore;

/// History revision known to match what is stored
#[derive(Resource, Default, Debug)]
pub struct PersistedRevision(pub Option<u64>);

/// Startup system: restore the last session, discarding corrupt data
pub fn restore_history_system(
    storage: Res<SessionStorage>,
    mut history: ResMut<EditHistory>,
    mut written: ResMut<PersistedRevision>,
) {
    restore_session(storage.store(), &mut history, &mut written);
}

/// System to write the history whenever it has changed since the last write
pub fn persist_history_system(
    storage: Res<SessionStorage>,
    history: Res<EditHistory>,
    mut written: ResMut<PersistedRevision>,
) {
    persist_changes(storage.store(), &history, &mut written);
}

pub(crate) fn restore_session(
    store: &dyn KeyValueStore,
    history: &mut EditHistory,
    written: &mut PersistedRevision,
) {
    match load_history(store, SESSION_KEY) {
        Ok(Some((entries, cursor))) => {
            let count = entries.len();
            match history.restore(entries, cursor) {
                Ok(()) => info!("Restored editing session ({} entries)", count),
                Err(e) => discard_session(store, &e.to_string()),
            }
        }
        Ok(None) => debug!("No saved editing session"),
        Err(StorageError::Corrupt(reason)) => discard_session(store, &reason),
        // The stored session may still be good; leave it for the next start
        Err(e) => error!("Could not read saved session: {}", e),
    }
    // Whatever is stored now is the baseline; only later mutations write
    written.0 = Some(history.revision());
}

fn discard_session(store: &dyn KeyValueStore, reason: &str) {
    warn!("Discarding saved session: {}", reason);
    if let Err(e) = store.remove(SESSION_KEY) {
        warn!("Failed to clear saved session: {}", e);
    }
}

pub(crate) fn persist_changes(
    store: &dyn KeyValueStore,
    history: &EditHistory,
    written: &mut PersistedRevision,
) {
    let revision = history.revision();
    if written.0 == Some(revision) {
        return;
    }

    match save_history(store, SESSION_KEY, history) {
        Ok(()) => debug!("Persisted history revision {}", revision),
        Err(e) => error!("Failed to persist history: {}", e),
    }
    // Failed writes are not retried until the next mutation
    written.0 = Some(revision);
}
