//! Wallet connection and the mint flow.
//!
//! Connecting asks the minting gateway for the account address and loads
//! that account's minted records. A [`MintRequest`] mints the current
//! artifact; a [`BatchMintRequest`] mints every history entry in order. Mint
//! jobs run one at a time on a background task, guarded by their own busy
//! flag so editing stays available while a mint is pending.
//!
//! ## Module Structure
//!
//! - [`state`] - WalletState and MintingStatus resources, task components
//! - [`messages`] - Connect and mint request messages
//! - [`records`] - Mint items from the session, minted records from reports
//! - [`systems`] - Connect, mint and poll systems

mod messages;
mod records;
mod state;
mod systems;

#[cfg(test)]
mod tests;

// Re-exports
pub use messages::{BatchMintRequest, ConnectWalletRequest, MintRequest};
pub use state::{MintingStatus, WalletState};

use bevy::prelude::*;

pub struct MintingPlugin;

impl Plugin for MintingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WalletState>()
            .init_resource::<MintingStatus>()
            .add_message::<ConnectWalletRequest>()
            .add_message::<MintRequest>()
            .add_message::<BatchMintRequest>()
            .add_systems(
                Update,
                (
                    systems::start_connect.run_if(on_message::<ConnectWalletRequest>),
                    systems::poll_connect,
                    systems::start_single_mint.run_if(on_message::<MintRequest>),
                    systems::start_batch_mint.run_if(on_message::<BatchMintRequest>),
                    systems::poll_mint_tasks,
                )
                    .chain(),
            );
    }
}
