//! Wallet, content storage and on-chain minting collaborators.
//!
//! The chain itself is out of reach of this crate: [`MintingService`] wraps
//! a gateway that owns the wallet and the contract calls. One `mint` call is
//! one transaction; sequencing several of them is [`batch::mint_batch`]'s job.

pub mod batch;
mod gateway;

#[cfg(test)]
mod tests;

pub use batch::{BatchMintReport, MintItem, MintOutcome, MintedToken, mint_batch, mint_one};
pub use gateway::GatewayMintingService;

use serde::{Deserialize, Serialize};

use crate::artifact::Artifact;
use crate::error::TransactionError;

/// A trait/value pair in the NFT metadata
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftAttribute {
    pub trait_type: String,
    pub value: String,
}

/// Human-facing metadata uploaded next to the image
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub attributes: Vec<NftAttribute>,
}

/// Which contract on which network to mint against
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintTarget {
    pub contract_address: String,
    pub network: String,
}

impl MintTarget {
    /// Catch obviously broken settings before any transaction is attempted.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if !is_evm_address(&self.contract_address) {
            return Err(TransactionError::Misconfigured(format!(
                "'{}' is not a contract address",
                self.contract_address
            )));
        }
        if self.network.trim().is_empty() {
            return Err(TransactionError::Misconfigured("no network selected".to_string()));
        }
        Ok(())
    }
}

/// Result of one successful mint transaction
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    pub tx_hash: String,
}

pub trait MintingService: Send + Sync {
    /// Address of the connected account.
    fn connect(&self) -> Result<String, TransactionError>;

    /// Store the image and its metadata, returning the content URL.
    fn upload_metadata(&self, image: &Artifact, metadata: &NftMetadata) -> Result<String, TransactionError>;

    fn mint(
        &self,
        target: &MintTarget,
        to_address: &str,
        content_url: &str,
    ) -> Result<MintReceipt, TransactionError>;
}

/// `0x` followed by 40 hex digits
pub fn is_evm_address(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Parse `key=value` lines into attributes, skipping blanks and malformed lines.
pub fn parse_attributes(text: &str) -> Vec<NftAttribute> {
    text.lines()
        .filter_map(|line| {
            let (key, value) = line.split_once('=')?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some(NftAttribute {
                trait_type: key.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}
