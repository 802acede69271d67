//! Building mint items from the session and minted records from reports.

use crate::artifact::Artifact;
use crate::services::minting::{
    BatchMintReport, MintItem, MintTarget, NftAttribute, NftMetadata, parse_attributes,
};
use crate::storage::MintedNft;

use super::messages::{BatchMintRequest, MintRequest};

/// The single item minted by a [`MintRequest`]
pub fn single_item(artifact: &Artifact, request: &MintRequest) -> MintItem {
    MintItem {
        artifact: artifact.clone(),
        metadata: NftMetadata {
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            attributes: parse_attributes(&request.attributes),
        },
    }
}

/// One item per history entry, titled `"<prefix> #<n>"`
pub fn batch_items(entries: &[Artifact], request: &BatchMintRequest) -> Vec<MintItem> {
    let prefix = request.title_prefix.trim();
    let total = entries.len();
    entries
        .iter()
        .enumerate()
        .map(|(index, artifact)| MintItem {
            artifact: artifact.clone(),
            metadata: NftMetadata {
                title: format!("{} #{}", prefix, index + 1),
                description: request.description.trim().to_string(),
                attributes: vec![NftAttribute {
                    trait_type: "edit_step".to_string(),
                    value: format!("{}/{}", index + 1, total),
                }],
            },
        })
        .collect()
}

/// Records for every successful outcome in `report`
pub fn minted_records(
    report: &BatchMintReport,
    metadata: &[NftMetadata],
    target: &MintTarget,
    minted_at: &str,
) -> Vec<MintedNft> {
    report
        .outcomes
        .iter()
        .filter_map(|outcome| {
            let token = outcome.result.as_ref().ok()?;
            let description = metadata
                .get(outcome.index)
                .map(|m| m.description.clone())
                .unwrap_or_default();
            Some(MintedNft {
                title: outcome.title.clone(),
                description,
                content_url: token.content_url.clone(),
                tx_hash: token.receipt.tx_hash.clone(),
                contract_address: target.contract_address.clone(),
                network: target.network.clone(),
                minted_at: minted_at.to_string(),
            })
        })
        .collect()
}
