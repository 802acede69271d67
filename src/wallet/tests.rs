//! Unit tests for mint item construction, records and minting status.

use super::messages::{BatchMintRequest, MintRequest};
use super::records::{batch_items, minted_records, single_item};
use super::state::{MintingStatus, WalletState};
use crate::artifact::{Artifact, PNG_CONTENT_TYPE};
use crate::error::TransactionError;
use crate::services::minting::{
    BatchMintReport, MintOutcome, MintReceipt, MintTarget, MintedToken, NftMetadata,
};

fn artifact(name: &str) -> Artifact {
    Artifact::new(name.as_bytes().to_vec(), PNG_CONTENT_TYPE, name)
}

fn target() -> MintTarget {
    MintTarget {
        contract_address: format!("0x{}", "ab".repeat(20)),
        network: "sepolia".to_string(),
    }
}

fn token(n: usize) -> MintedToken {
    MintedToken {
        content_url: format!("ipfs://cid{}", n),
        receipt: MintReceipt {
            tx_hash: format!("0xtx{}", n),
        },
    }
}

fn report_with_failure_at(failed: usize, len: usize) -> BatchMintReport {
    BatchMintReport {
        outcomes: (0..len)
            .map(|index| MintOutcome {
                index,
                title: format!("Item #{}", index + 1),
                result: if index == failed {
                    Err(TransactionError::Rejected("user denied".to_string()))
                } else {
                    Ok(token(index))
                },
            })
            .collect(),
    }
}

#[test]
fn test_single_item_parses_attributes() {
    let request = MintRequest {
        title: "  Sunset  ".to_string(),
        description: "warm tones".to_string(),
        attributes: "mood=calm\nbogus line\npalette = orange".to_string(),
    };
    let item = single_item(&artifact("A0"), &request);

    assert_eq!(item.metadata.title, "Sunset");
    assert_eq!(item.metadata.attributes.len(), 2);
    assert_eq!(item.metadata.attributes[1].trait_type, "palette");
    assert_eq!(item.metadata.attributes[1].value, "orange");
    assert_eq!(item.artifact.name(), "A0");
}

#[test]
fn test_batch_items_cover_every_entry_in_order() {
    let entries = vec![artifact("A0"), artifact("A1"), artifact("A2")];
    let request = BatchMintRequest {
        title_prefix: "Series".to_string(),
        description: "steps".to_string(),
    };
    let items = batch_items(&entries, &request);

    let titles: Vec<&str> = items.iter().map(|i| i.metadata.title.as_str()).collect();
    assert_eq!(titles, vec!["Series #1", "Series #2", "Series #3"]);
    assert_eq!(items[2].artifact.name(), "A2");
    assert_eq!(items[2].metadata.attributes[0].value, "3/3");
}

#[test]
fn test_batch_items_empty_history() {
    let request = BatchMintRequest {
        title_prefix: "Series".to_string(),
        description: String::new(),
    };
    assert!(batch_items(&[], &request).is_empty());
}

#[test]
fn test_minted_records_skip_failures() {
    let report = report_with_failure_at(1, 3);
    let metadata: Vec<NftMetadata> = (0..3)
        .map(|i| NftMetadata {
            title: format!("Item #{}", i + 1),
            description: format!("desc {}", i),
            attributes: Vec::new(),
        })
        .collect();

    let records = minted_records(&report, &metadata, &target(), "2026-01-01T00:00:00+00:00");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title, "Item #1");
    assert_eq!(records[1].title, "Item #3");
    assert_eq!(records[1].description, "desc 2");
    assert_eq!(records[1].tx_hash, "0xtx2");
    assert_eq!(records[1].network, "sepolia");
}

#[test]
fn test_status_single_slot() {
    let mut status = MintingStatus::default();
    let guard = status.begin("Minting...".to_string()).unwrap();
    assert!(status.is_busy());
    assert!(status.begin("again".to_string()).is_none());

    drop(guard);
    assert!(!status.is_busy());
}

#[test]
fn test_status_report_single_failure_shows_error() {
    let mut status = MintingStatus::default();
    status.pending = Some("Minting...".to_string());
    status.record_report(report_with_failure_at(0, 1));

    assert!(status.pending.is_none());
    assert_eq!(
        status.last_error.as_deref(),
        Some("transaction rejected: user denied")
    );
}

#[test]
fn test_status_report_batch_summary() {
    let mut status = MintingStatus::default();
    status.record_report(report_with_failure_at(1, 3));

    assert_eq!(status.last_error.as_deref(), Some("2 minted, 1 failed"));
    assert_eq!(status.last_report.as_ref().unwrap().succeeded(), 2);
}

#[test]
fn test_status_report_all_ok_clears_error() {
    let mut status = MintingStatus::default();
    status.last_error = Some("old".to_string());
    status.record_report(report_with_failure_at(usize::MAX, 2));
    assert!(status.last_error.is_none());
}

#[test]
fn test_record_error_keeps_pending_job() {
    let mut status = MintingStatus::default();
    let _guard = status.begin("Minting...".to_string()).unwrap();
    status.record_error(&TransactionError::NoWallet);

    assert!(status.pending.is_some());
    assert_eq!(status.last_error.as_deref(), Some("no wallet account available"));
}

#[test]
fn test_wallet_default_disconnected() {
    let wallet = WalletState::default();
    assert!(!wallet.is_connected());
    assert!(!wallet.is_connecting());
}

#[test]
fn test_wallet_single_connect() {
    let mut wallet = WalletState::default();
    wallet.last_error = Some("earlier failure".to_string());

    let guard = wallet.begin_connect().unwrap();
    assert!(wallet.is_connecting());
    assert!(wallet.last_error.is_none());
    assert!(wallet.begin_connect().is_none());

    drop(guard);
    assert!(!wallet.is_connecting());
}

#[test]
fn test_wallet_connect_released_when_task_panics() {
    let mut wallet = WalletState::default();
    let guard = wallet.begin_connect().unwrap();

    let handle = std::thread::spawn(move || {
        let _guard = guard;
        panic!("connect blew up");
    });
    assert!(handle.join().is_err());

    // A connect task component with a clear flag is treated as abandoned
    assert!(!wallet.is_connecting());
    assert!(wallet.begin_connect().is_some());
}
