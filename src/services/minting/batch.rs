//! Minting one or many artifacts through a [`MintingService`].

use crate::artifact::Artifact;
use crate::error::TransactionError;

use super::{MintReceipt, MintTarget, MintingService, NftMetadata};

/// One artifact queued for minting
#[derive(Clone, Debug)]
pub struct MintItem {
    pub artifact: Artifact,
    pub metadata: NftMetadata,
}

/// A minted token: where its metadata lives and the transaction that created it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintedToken {
    pub content_url: String,
    pub receipt: MintReceipt,
}

/// Per-item result of a batch
#[derive(Clone, Debug)]
pub struct MintOutcome {
    pub index: usize,
    pub title: String,
    pub result: Result<MintedToken, TransactionError>,
}

/// Summary of a batch run; every item has exactly one outcome
#[derive(Clone, Debug, Default)]
pub struct BatchMintReport {
    pub outcomes: Vec<MintOutcome>,
}

impl BatchMintReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn summary(&self) -> String {
        format!("{} minted, {} failed", self.succeeded(), self.failed())
    }
}

/// Upload metadata for one item and mint it to `owner`.
pub fn mint_one(
    service: &dyn MintingService,
    target: &MintTarget,
    owner: &str,
    item: &MintItem,
) -> Result<MintedToken, TransactionError> {
    let content_url = service.upload_metadata(&item.artifact, &item.metadata)?;
    let receipt = service.mint(target, owner, &content_url)?;
    Ok(MintedToken { content_url, receipt })
}

/// Mint every item in order.
///
/// A failure is recorded against its item and the batch moves on; earlier
/// successes are never rolled back. A broken target fails every item without
/// contacting the service.
pub fn mint_batch(
    service: &dyn MintingService,
    target: &MintTarget,
    owner: &str,
    items: &[MintItem],
) -> BatchMintReport {
    let target_check = target.validate();

    let outcomes = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let result = match &target_check {
                Ok(()) => mint_one(service, target, owner, item),
                Err(e) => Err(e.clone()),
            };

            match &result {
                Ok(token) => bevy::log::info!(
                    "Minted '{}' ({}/{}): {}",
                    item.metadata.title,
                    index + 1,
                    items.len(),
                    token.receipt.tx_hash
                ),
                Err(e) => bevy::log::warn!(
                    "Minting '{}' ({}/{}) failed: {}",
                    item.metadata.title,
                    index + 1,
                    items.len(),
                    e
                ),
            }

            MintOutcome {
                index,
                title: item.metadata.title.clone(),
                result,
            }
        })
        .collect();

    BatchMintReport { outcomes }
}
