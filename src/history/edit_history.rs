//! Edit history resource: a rewindable log of artifacts with a cursor.

use bevy::prelude::*;

use crate::artifact::Artifact;
use crate::error::HistoryError;

/// Resource holding every artifact of the current editing session.
///
/// Entry 0 is always the original image. The cursor points at the entry on
/// display; committing a new edit from a rewound cursor drops everything after
/// it.
#[derive(Resource, Default, Debug)]
pub struct EditHistory {
    entries: Vec<Artifact>,
    cursor: Option<usize>,
    /// Bumped on every mutation so persistence writes once per change
    revision: u64,
}

impl EditHistory {
    /// Start a new history containing only `artifact`.
    pub fn seed(&mut self, artifact: Artifact) {
        self.entries.clear();
        self.entries.push(artifact);
        self.cursor = Some(0);
        self.bump();
    }

    /// Commit a new edit after the cursor, discarding any redo branch.
    pub fn append(&mut self, artifact: Artifact) -> Result<(), HistoryError> {
        let cursor = self
            .cursor
            .ok_or(HistoryError::InvalidState("append before seed"))?;

        let discarded = self.entries.len() - (cursor + 1);
        if discarded > 0 {
            debug!("Discarding {} redo entries", discarded);
        }
        self.entries.truncate(cursor + 1);
        self.entries.push(artifact);
        self.cursor = Some(self.entries.len() - 1);
        self.bump();
        Ok(())
    }

    /// Move the cursor without touching the entries.
    pub fn seek(&mut self, index: usize) -> Result<(), HistoryError> {
        if index >= self.entries.len() {
            return Err(HistoryError::OutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        if self.cursor != Some(index) {
            self.cursor = Some(index);
            self.bump();
        }
        Ok(())
    }

    /// Drop the whole session.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.bump();
    }

    /// Rebuild from a persisted snapshot.
    pub fn restore(&mut self, entries: Vec<Artifact>, cursor: usize) -> Result<(), HistoryError> {
        if entries.is_empty() {
            return Err(HistoryError::InvalidState("restore with no entries"));
        }
        if cursor >= entries.len() {
            return Err(HistoryError::OutOfRange {
                index: cursor,
                len: entries.len(),
            });
        }
        self.entries = entries;
        self.cursor = Some(cursor);
        self.bump();
        Ok(())
    }

    pub fn current(&self) -> Option<&Artifact> {
        self.cursor.and_then(|i| self.entries.get(i))
    }

    pub fn original(&self) -> Option<&Artifact> {
        self.entries.first()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|i| i > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// Step back one entry. Returns false when already at the original.
    pub fn undo(&mut self) -> bool {
        match self.cursor {
            Some(i) if i > 0 => self.seek(i - 1).is_ok(),
            _ => false,
        }
    }

    /// Step forward one entry. Returns false when already at the tip.
    pub fn redo(&mut self) -> bool {
        match self.cursor {
            Some(i) if i + 1 < self.entries.len() => self.seek(i + 1).is_ok(),
            _ => false,
        }
    }

    /// Jump back to entry 0. Returns false when already there.
    pub fn revert_to_original(&mut self) -> bool {
        self.can_undo() && self.seek(0).is_ok()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[Artifact] {
        &self.entries
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
