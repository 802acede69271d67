//! On-disk form of the edit history.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::artifact::Artifact;
use crate::error::StorageError;
use crate::history::EditHistory;

use super::store::KeyValueStore;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedArtifact {
    pub name: String,
    pub content_type: String,
    /// Standard base64 of the encoded image
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedHistory {
    pub entries: Vec<SavedArtifact>,
    pub cursor: usize,
}

impl SavedHistory {
    /// Snapshot a non-empty history. Returns `None` for an empty one.
    pub fn from_history(history: &EditHistory) -> Option<Self> {
        let cursor = history.cursor()?;
        let entries = history
            .entries()
            .iter()
            .map(|artifact| SavedArtifact {
                name: artifact.name().to_string(),
                content_type: artifact.content_type().to_string(),
                data: STANDARD.encode(artifact.bytes()),
            })
            .collect();
        Some(Self { entries, cursor })
    }

    /// Decode entries back into artifacts, validating the snapshot.
    pub fn into_parts(self) -> Result<(Vec<Artifact>, usize), StorageError> {
        if self.entries.is_empty() {
            return Err(StorageError::Corrupt("saved history has no entries".to_string()));
        }
        if self.cursor >= self.entries.len() {
            return Err(StorageError::Corrupt(format!(
                "saved cursor {} outside {} entries",
                self.cursor,
                self.entries.len()
            )));
        }

        let artifacts = self
            .entries
            .into_iter()
            .map(|saved| {
                let bytes = STANDARD
                    .decode(saved.data.as_bytes())
                    .map_err(|e| StorageError::Corrupt(format!("entry '{}': {}", saved.name, e)))?;
                Ok(Artifact::new(bytes, saved.content_type, saved.name))
            })
            .collect::<Result<Vec<_>, StorageError>>()?;

        Ok((artifacts, self.cursor))
    }
}

/// Write the history under `key`, removing the key when the history is empty.
pub fn save_history(store: &dyn KeyValueStore, key: &str, history: &EditHistory) -> Result<(), StorageError> {
    match SavedHistory::from_history(history) {
        Some(saved) => store.set(key, &serde_json::to_string(&saved)?),
        None => store.remove(key),
    }
}

/// Read the history stored under `key`.
///
/// `Ok(None)` when nothing is stored. Corrupt data is an error; callers
/// discard it and start empty.
pub fn load_history(store: &dyn KeyValueStore, key: &str) -> Result<Option<(Vec<Artifact>, usize)>, StorageError> {
    let Some(json) = store.get(key)? else {
        return Ok(None);
    };
    let saved: SavedHistory =
        serde_json::from_str(&json).map_err(|e| StorageError::Corrupt(e.to_string()))?;
    saved.into_parts().map(Some)
}
