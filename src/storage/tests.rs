//! Unit tests for the storage module.

use super::minted::{MintedNft, MintedRegistry, load_minted, minted_key, save_minted};
use super::saved_history::{SavedArtifact, SavedHistory, load_history, save_history};
use super::store::{FileStore, KeyValueStore, MemoryStore};
use super::systems::{PersistedRevision, persist_changes, restore_session};
use crate::artifact::{Artifact, PNG_CONTENT_TYPE};
use crate::constants::SESSION_KEY;
use crate::error::StorageError;
use crate::history::EditHistory;

const KEY: &str = "edit_history";

fn artifact(name: &str, bytes: &[u8]) -> Artifact {
    Artifact::new(bytes.to_vec(), PNG_CONTENT_TYPE, name)
}

fn sample_history() -> EditHistory {
    let mut history = EditHistory::default();
    history.seed(artifact("A0", &[0, 1, 2]));
    history.append(artifact("A1", &[3, 4])).unwrap();
    history.append(artifact("A2", &[255])).unwrap();
    history.seek(1).unwrap();
    history
}

/// Store whose reads fail with an I/O error while writes still land
#[derive(Default)]
struct UnreadableStore {
    inner: MemoryStore,
}

impl KeyValueStore for UnreadableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked").into())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

fn record(title: &str) -> MintedNft {
    MintedNft {
        title: title.to_string(),
        description: "desc".to_string(),
        content_url: format!("ipfs://{}", title),
        tx_hash: "0xabc".to_string(),
        contract_address: "0x1234567890abcdef1234567890abcdef12345678".to_string(),
        network: "sepolia".to_string(),
        minted_at: "2026-01-01T00:00:00+00:00".to_string(),
    }
}

#[test]
fn test_history_round_trip() {
    let store = MemoryStore::default();
    let history = sample_history();
    save_history(&store, KEY, &history).unwrap();

    let (entries, cursor) = load_history(&store, KEY).unwrap().unwrap();
    assert_eq!(entries, history.entries());
    assert_eq!(cursor, 1);
}

#[test]
fn test_empty_history_removes_key() {
    let store = MemoryStore::default();
    save_history(&store, KEY, &sample_history()).unwrap();

    let mut history = sample_history();
    history.reset();
    save_history(&store, KEY, &history).unwrap();

    assert!(store.get(KEY).unwrap().is_none());
    assert!(load_history(&store, KEY).unwrap().is_none());
}

#[test]
fn test_missing_history_is_none() {
    let store = MemoryStore::default();
    assert!(load_history(&store, KEY).unwrap().is_none());
}

#[test]
fn test_corrupt_json_is_error() {
    let store = MemoryStore::default();
    store.set(KEY, "{ definitely not json").unwrap();
    assert!(matches!(load_history(&store, KEY), Err(StorageError::Corrupt(_))));
}

#[test]
fn test_bad_base64_is_error() {
    let saved = SavedHistory {
        entries: vec![SavedArtifact {
            name: "x".to_string(),
            content_type: PNG_CONTENT_TYPE.to_string(),
            data: "%%%".to_string(),
        }],
        cursor: 0,
    };
    assert!(matches!(saved.into_parts(), Err(StorageError::Corrupt(_))));
}

#[test]
fn test_out_of_range_cursor_is_error() {
    let store = MemoryStore::default();
    let saved = SavedHistory {
        entries: vec![SavedArtifact {
            name: "x".to_string(),
            content_type: PNG_CONTENT_TYPE.to_string(),
            data: String::new(),
        }],
        cursor: 4,
    };
    store.set(KEY, &serde_json::to_string(&saved).unwrap()).unwrap();
    assert!(matches!(load_history(&store, KEY), Err(StorageError::Corrupt(_))));
}

#[test]
fn test_empty_entries_is_error() {
    let saved = SavedHistory {
        entries: vec![],
        cursor: 0,
    };
    assert!(saved.into_parts().is_err());
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("nested"));

    assert!(store.get("a key").unwrap().is_none());
    store.set("a key", "value").unwrap();
    assert_eq!(store.get("a key").unwrap().as_deref(), Some("value"));

    store.set("a key", "second").unwrap();
    assert_eq!(store.get("a key").unwrap().as_deref(), Some("second"));

    store.remove("a key").unwrap();
    assert!(store.get("a key").unwrap().is_none());
    // Removing twice is fine
    store.remove("a key").unwrap();
}

#[test]
fn test_file_store_sanitizes_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    store.set("minted_nfts:0xAB/../x", "[]").unwrap();

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files, vec!["minted_nfts_0xAB____x.json"]);
}

#[test]
fn test_file_store_history_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    save_history(&store, KEY, &sample_history()).unwrap();

    let (entries, cursor) = load_history(&store, KEY).unwrap().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2].bytes(), &[255]);
    assert_eq!(cursor, 1);
}

#[test]
fn test_minted_records_per_account() {
    let store = MemoryStore::default();
    save_minted(&store, "0xAAA", &[record("one"), record("two")]).unwrap();
    save_minted(&store, "0xbbb", &[record("three")]).unwrap();

    assert_eq!(load_minted(&store, "0xaaa").unwrap().len(), 2);
    assert_eq!(load_minted(&store, "0xBBB").unwrap()[0].title, "three");
    assert!(load_minted(&store, "0xccc").unwrap().is_empty());
}

#[test]
fn test_minted_key_lowercases() {
    assert_eq!(minted_key("0xAbC"), "minted_nfts:0xabc");
}

#[test]
fn test_corrupt_minted_records() {
    let store = MemoryStore::default();
    store.set(&minted_key("0xaaa"), "nope").unwrap();
    assert!(matches!(load_minted(&store, "0xaaa"), Err(StorageError::Corrupt(_))));
}

// Startup restore and change-driven writes

#[test]
fn test_restore_session_loads_saved_history() {
    let store = MemoryStore::default();
    save_history(&store, SESSION_KEY, &sample_history()).unwrap();

    let mut history = EditHistory::default();
    let mut written = PersistedRevision::default();
    restore_session(&store, &mut history, &mut written);

    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), Some(1));
    assert_eq!(written.0, Some(history.revision()));
}

#[test]
fn test_unreadable_session_survives_startup() {
    let store = UnreadableStore::default();
    save_history(&store.inner, SESSION_KEY, &sample_history()).unwrap();

    let mut history = EditHistory::default();
    let mut written = PersistedRevision::default();
    restore_session(&store, &mut history, &mut written);
    assert!(history.is_empty());

    // The first frame's write pass must not clear the stored session
    persist_changes(&store, &history, &mut written);
    assert!(store.inner.get(SESSION_KEY).unwrap().is_some());
}

#[test]
fn test_corrupt_session_removed_at_startup() {
    let store = MemoryStore::default();
    store.set(SESSION_KEY, "{ not json").unwrap();

    let mut history = EditHistory::default();
    let mut written = PersistedRevision::default();
    restore_session(&store, &mut history, &mut written);

    assert!(history.is_empty());
    assert!(store.get(SESSION_KEY).unwrap().is_none());
}

#[test]
fn test_persist_changes_writes_only_after_mutation() {
    let store = MemoryStore::default();
    let mut history = EditHistory::default();
    let mut written = PersistedRevision::default();
    restore_session(&store, &mut history, &mut written);

    persist_changes(&store, &history, &mut written);
    assert!(store.get(SESSION_KEY).unwrap().is_none());

    history.seed(artifact("A0", &[7]));
    persist_changes(&store, &history, &mut written);
    assert!(store.get(SESSION_KEY).unwrap().is_some());

    history.reset();
    persist_changes(&store, &history, &mut written);
    assert!(store.get(SESSION_KEY).unwrap().is_none());
}

// Minted registry

#[test]
fn test_registry_switches_accounts() {
    let store = MemoryStore::default();
    save_minted(&store, "0xaaa", &[record("one")]).unwrap();

    let mut registry = MintedRegistry::default();
    registry.load_account(&store, "0xAAA");
    assert!(registry.is_account("0xaaa"));
    assert_eq!(registry.records.len(), 1);

    registry.records.push(record("two"));
    assert!(registry.save(&store).unwrap());
    assert_eq!(load_minted(&store, "0xaaa").unwrap().len(), 2);
}

#[test]
fn test_registry_replaces_corrupt_records() {
    let store = MemoryStore::default();
    store.set(&minted_key("0xaaa"), "nope").unwrap();

    let mut registry = MintedRegistry::default();
    registry.load_account(&store, "0xaaa");
    assert!(registry.records.is_empty());

    registry.records.push(record("fresh"));
    assert!(registry.save(&store).unwrap());
    assert_eq!(load_minted(&store, "0xaaa").unwrap()[0].title, "fresh");
}

#[test]
fn test_registry_keeps_unreadable_records() {
    let store = UnreadableStore::default();
    save_minted(&store.inner, "0xaaa", &[record("one"), record("two")]).unwrap();

    let mut registry = MintedRegistry::default();
    registry.load_account(&store, "0xaaa");
    registry.records.push(record("three"));

    assert!(!registry.save(&store).unwrap());
    assert_eq!(load_minted(&store.inner, "0xaaa").unwrap().len(), 2);
}

#[test]
fn test_registry_without_account_saves_nothing() {
    let store = MemoryStore::default();
    assert!(!MintedRegistry::default().save(&store).unwrap());
}
