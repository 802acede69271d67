//! Unit tests for minting helpers and batch sequencing.

use std::sync::Mutex;

use super::gateway::classify_status;
use super::{
    MintItem, MintReceipt, MintTarget, MintingService, NftAttribute, NftMetadata, is_evm_address,
    mint_batch, parse_attributes,
};
use crate::artifact::{Artifact, PNG_CONTENT_TYPE};
use crate::error::TransactionError;

const CONTRACT: &str = "0x1234567890abcdef1234567890abcdef12345678";
const OWNER: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

/// Records calls; fails the mint whose title is in `fail_titles`
struct FakeMinter {
    fail_titles: Vec<&'static str>,
    uploads: Mutex<Vec<String>>,
    mints: Mutex<Vec<String>>,
}

impl FakeMinter {
    fn failing(fail_titles: Vec<&'static str>) -> Self {
        Self {
            fail_titles,
            uploads: Mutex::new(Vec::new()),
            mints: Mutex::new(Vec::new()),
        }
    }
}

impl MintingService for FakeMinter {
    fn connect(&self) -> Result<String, TransactionError> {
        Ok(OWNER.to_string())
    }

    fn upload_metadata(&self, _image: &Artifact, metadata: &NftMetadata) -> Result<String, TransactionError> {
        self.uploads.lock().unwrap().push(metadata.title.clone());
        Ok(format!("ipfs://{}", metadata.title))
    }

    fn mint(
        &self,
        _target: &MintTarget,
        _to_address: &str,
        content_url: &str,
    ) -> Result<MintReceipt, TransactionError> {
        self.mints.lock().unwrap().push(content_url.to_string());
        let title = content_url.trim_start_matches("ipfs://");
        if self.fail_titles.contains(&title) {
            return Err(TransactionError::Rejected("user denied signature".to_string()));
        }
        Ok(MintReceipt {
            tx_hash: format!("0xtx-{}", title),
        })
    }
}

fn target() -> MintTarget {
    MintTarget {
        contract_address: CONTRACT.to_string(),
        network: "sepolia".to_string(),
    }
}

fn item(title: &str) -> MintItem {
    MintItem {
        artifact: Artifact::new(vec![0u8; 4], PNG_CONTENT_TYPE, format!("{}.png", title)),
        metadata: NftMetadata {
            title: title.to_string(),
            description: "test".to_string(),
            attributes: vec![],
        },
    }
}

#[test]
fn test_batch_continues_past_failure() {
    let minter = FakeMinter::failing(vec!["two"]);
    let items = vec![item("one"), item("two"), item("three")];

    let report = mint_batch(&minter, &target(), OWNER, &items);

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(report.outcomes[0].result.is_ok());
    assert!(matches!(
        report.outcomes[1].result,
        Err(TransactionError::Rejected(_))
    ));
    assert_eq!(
        report.outcomes[2].result.as_ref().unwrap().receipt.tx_hash,
        "0xtx-three"
    );
    assert_eq!(minter.mints.lock().unwrap().len(), 3);
    assert_eq!(report.summary(), "2 minted, 1 failed");
}

#[test]
fn test_batch_preserves_order_and_indices() {
    let minter = FakeMinter::failing(vec![]);
    let items = vec![item("a"), item("b"), item("c")];
    let report = mint_batch(&minter, &target(), OWNER, &items);

    let titles: Vec<_> = report.outcomes.iter().map(|o| o.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
    let indices: Vec<_> = report.outcomes.iter().map(|o| o.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert_eq!(*minter.uploads.lock().unwrap(), vec!["a", "b", "c"]);
}

#[test]
fn test_batch_with_bad_target_skips_service() {
    let minter = FakeMinter::failing(vec![]);
    let bad = MintTarget {
        contract_address: "not-an-address".to_string(),
        network: "sepolia".to_string(),
    };

    let report = mint_batch(&minter, &bad, OWNER, &[item("a"), item("b")]);
    assert_eq!(report.failed(), 2);
    assert!(minter.uploads.lock().unwrap().is_empty());
    assert!(matches!(
        report.outcomes[0].result,
        Err(TransactionError::Misconfigured(_))
    ));
}

#[test]
fn test_empty_batch() {
    let minter = FakeMinter::failing(vec![]);
    let report = mint_batch(&minter, &target(), OWNER, &[]);
    assert_eq!(report.succeeded(), 0);
    assert_eq!(report.failed(), 0);
}

#[test]
fn test_target_validation() {
    assert!(target().validate().is_ok());
    let no_network = MintTarget {
        contract_address: CONTRACT.to_string(),
        network: "  ".to_string(),
    };
    assert!(matches!(
        no_network.validate(),
        Err(TransactionError::Misconfigured(_))
    ));
}

#[test]
fn test_is_evm_address() {
    assert!(is_evm_address(CONTRACT));
    assert!(!is_evm_address("1234567890abcdef1234567890abcdef12345678"));
    assert!(!is_evm_address("0x123"));
    assert!(!is_evm_address("0xZZ34567890abcdef1234567890abcdef12345678"));
}

#[test]
fn test_parse_attributes() {
    let attrs = parse_attributes("Background = Blue\n\nbroken line\nMood=happy\n=empty\n");
    assert_eq!(
        attrs,
        vec![
            NftAttribute {
                trait_type: "Background".to_string(),
                value: "Blue".to_string()
            },
            NftAttribute {
                trait_type: "Mood".to_string(),
                value: "happy".to_string()
            },
        ]
    );
}

#[test]
fn test_classify_status() {
    assert!(matches!(classify_status(400, "bad contract"), TransactionError::Misconfigured(m) if m == "bad contract"));
    assert!(matches!(classify_status(403, ""), TransactionError::Rejected(m) if m == "HTTP 403"));
    assert!(matches!(classify_status(422, "execution reverted"), TransactionError::Reverted(_)));
    assert!(matches!(classify_status(503, ""), TransactionError::Network(_)));
}

#[test]
fn test_metadata_serializes_trait_type() {
    let metadata = NftMetadata {
        title: "t".to_string(),
        description: "d".to_string(),
        attributes: parse_attributes("Eyes=Laser"),
    };
    let json = serde_json::to_string(&metadata).unwrap();
    assert!(json.contains("\"trait_type\":\"Eyes\""));
}
