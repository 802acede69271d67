//! Per-account records of minted NFTs.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::MINTED_KEY_PREFIX;
use crate::error::StorageError;

use super::store::KeyValueStore;

/// One successfully minted token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MintedNft {
    pub title: String,
    pub description: String,
    pub content_url: String,
    pub tx_hash: String,
    pub contract_address: String,
    pub network: String,
    /// RFC 3339 timestamp
    pub minted_at: String,
}

/// Resource holding the minted records of the connected account
#[derive(Resource, Default, Debug)]
pub struct MintedRegistry {
    pub account: Option<String>,
    pub records: Vec<MintedNft>,
    /// The stored records could not be read; saving would overwrite them
    read_failed: bool,
}

impl MintedRegistry {
    pub fn is_account(&self, address: &str) -> bool {
        self.account
            .as_deref()
            .is_some_and(|account| account.eq_ignore_ascii_case(address))
    }

    /// Switch to `address` and load its records. Corrupt records are dropped.
    pub fn load_account(&mut self, store: &dyn KeyValueStore, address: &str) {
        self.account = Some(address.to_string());
        match load_minted(store, address) {
            Ok(records) => {
                self.records = records;
                self.read_failed = false;
            }
            Err(e) => {
                warn!("Discarding minted records for {}: {}", address, e);
                self.records = Vec::new();
                self.read_failed = !matches!(e, StorageError::Corrupt(_));
            }
        }
    }

    /// Write the records back. `Ok(false)` when nothing was written.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<bool, StorageError> {
        let Some(account) = &self.account else {
            return Ok(false);
        };
        if self.read_failed {
            warn!("Not saving minted records for {}: stored records were unreadable", account);
            return Ok(false);
        }
        save_minted(store, account, &self.records)?;
        Ok(true)
    }
}

/// Storage key for an account's records; addresses are case-insensitive
pub fn minted_key(address: &str) -> String {
    format!("{}{}", MINTED_KEY_PREFIX, address.to_ascii_lowercase())
}

pub fn load_minted(store: &dyn KeyValueStore, address: &str) -> Result<Vec<MintedNft>, StorageError> {
    match store.get(&minted_key(address))? {
        Some(json) => serde_json::from_str(&json).map_err(|e| StorageError::Corrupt(e.to_string())),
        None => Ok(Vec::new()),
    }
}

pub fn save_minted(store: &dyn KeyValueStore, address: &str, records: &[MintedNft]) -> Result<(), StorageError> {
    store.set(&minted_key(address), &serde_json::to_string_pretty(records)?)
}
