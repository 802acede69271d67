//! Message types for the wallet and minting flow.

use bevy::prelude::*;

/// Request to connect (or reconnect) the wallet account
#[derive(Message)]
pub struct ConnectWalletRequest;

/// Request to mint the current artifact
#[derive(Message, Clone, Debug)]
pub struct MintRequest {
    pub title: String,
    pub description: String,
    /// `key=value` lines
    pub attributes: String,
}

/// Request to mint every history entry as its own token
#[derive(Message, Clone, Debug)]
pub struct BatchMintRequest {
    pub title_prefix: String,
    pub description: String,
}
