//! REST client for the minting gateway.
//!
//! Endpoints:
//! - `GET  /wallet`      -> `{ "address": "0x..." | null }`
//! - `POST /ipfs/upload` -> `{ "url": "ipfs://..." }`
//! - `POST /mint`        -> `{ "txHash": "0x..." }`

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::artifact::Artifact;
use crate::error::TransactionError;

use super::{MintReceipt, MintTarget, MintingService, NftMetadata, is_evm_address};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct GatewayMintingService {
    agent: ureq::Agent,
    base_url: String,
}

impl GatewayMintingService {
    pub fn new(base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Deserialize)]
struct WalletResponse {
    address: Option<String>,
}

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest<'a> {
    #[serde(flatten)]
    metadata: &'a NftMetadata,
    image: UploadImage<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadImage<'a> {
    file_name: &'a str,
    content_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MintCall<'a> {
    contract_address: &'a str,
    network: &'a str,
    to: &'a str,
    token_uri: &'a str,
}

impl MintingService for GatewayMintingService {
    fn connect(&self) -> Result<String, TransactionError> {
        let response = match self.agent.get(&self.url("/wallet")).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(404, _)) => return Err(TransactionError::NoWallet),
            Err(ureq::Error::Status(code, resp)) => {
                return Err(classify_status(code, &resp.into_string().unwrap_or_default()));
            }
            Err(e) => return Err(TransactionError::Network(e.to_string())),
        };

        let wallet: WalletResponse = response
            .into_json()
            .map_err(|e| TransactionError::Network(format!("malformed wallet response: {}", e)))?;

        match wallet.address {
            Some(address) if is_evm_address(&address) => Ok(address),
            _ => Err(TransactionError::NoWallet),
        }
    }

    fn upload_metadata(&self, image: &Artifact, metadata: &NftMetadata) -> Result<String, TransactionError> {
        let body = UploadRequest {
            metadata,
            image: UploadImage {
                file_name: image.name(),
                content_type: image.content_type(),
                data: STANDARD.encode(image.bytes()),
            },
        };

        let response = self
            .agent
            .post(&self.url("/ipfs/upload"))
            .send_json(&body)
            .map_err(map_transport)?;

        let uploaded: UploadResponse = response
            .into_json()
            .map_err(|e| TransactionError::Network(format!("malformed upload response: {}", e)))?;
        Ok(uploaded.url)
    }

    fn mint(
        &self,
        target: &MintTarget,
        to_address: &str,
        content_url: &str,
    ) -> Result<MintReceipt, TransactionError> {
        target.validate()?;

        let body = MintCall {
            contract_address: &target.contract_address,
            network: &target.network,
            to: to_address,
            token_uri: content_url,
        };

        let response = self
            .agent
            .post(&self.url("/mint"))
            .send_json(&body)
            .map_err(map_transport)?;

        response
            .into_json()
            .map_err(|e| TransactionError::Network(format!("malformed mint response: {}", e)))
    }
}

fn map_transport(err: ureq::Error) -> TransactionError {
    match err {
        ureq::Error::Status(code, resp) => classify_status(code, &resp.into_string().unwrap_or_default()),
        other => TransactionError::Network(other.to_string()),
    }
}

/// Map a gateway status code onto the transaction error taxonomy.
pub(crate) fn classify_status(code: u16, body: &str) -> TransactionError {
    let detail = if body.trim().is_empty() {
        format!("HTTP {}", code)
    } else {
        body.trim().to_string()
    };

    match code {
        400 | 404 => TransactionError::Misconfigured(detail),
        401 | 403 | 409 => TransactionError::Rejected(detail),
        422 => TransactionError::Reverted(detail),
        _ => TransactionError::Network(detail),
    }
}
