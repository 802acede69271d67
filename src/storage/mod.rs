//! Session persistence.
//!
//! The edit history is stored under a fixed session key and rewritten after
//! every mutation. Minted-NFT records are stored per account. Reads are
//! best-effort: corrupt data is logged, discarded, and the app starts empty.
//! Data that merely could not be read is left in place.
//!
//! ## Module Structure
//!
//! - [`store`] - KeyValueStore trait with file and in-memory backends
//! - [`saved_history`] - Serialized history format
//! - [`minted`] - Minted NFT records and the MintedRegistry resource
//! - [`systems`] - Restore on startup, persist on change

pub mod minted;
pub mod saved_history;
pub mod store;
mod systems;

#[cfg(test)]
mod tests;

pub use minted::{MintedNft, MintedRegistry};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use bevy::prelude::*;
use std::sync::Arc;

/// Resource wrapping the active key-value store
#[derive(Resource, Clone)]
pub struct SessionStorage(pub Arc<dyn KeyValueStore>);

impl SessionStorage {
    /// File store under the platform storage dir, or memory if that is unusable.
    pub fn open_default() -> Self {
        let root = crate::paths::storage_dir();
        match std::fs::create_dir_all(&root) {
            Ok(()) => {
                info!("Session storage at {:?}", root);
                Self(Arc::new(FileStore::new(root)))
            }
            Err(e) => {
                warn!(
                    "Cannot use storage dir {:?} ({}); session will not survive restarts",
                    root, e
                );
                Self(Arc::new(MemoryStore::default()))
            }
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.0.as_ref()
    }
}

pub struct StoragePlugin;

impl Plugin for StoragePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SessionStorage::open_default())
            .init_resource::<MintedRegistry>()
            .init_resource::<systems::PersistedRevision>()
            .add_systems(Startup, systems::restore_history_system)
            .add_systems(PostUpdate, systems::persist_history_system);
    }
}
