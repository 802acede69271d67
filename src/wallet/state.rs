//! Wallet and minting resources plus their background task components.

use bevy::prelude::*;
use bevy::tasks::Task;

use crate::editing::{BusyFlag, BusyGuard};
use crate::error::TransactionError;
use crate::services::minting::{BatchMintReport, MintTarget, NftMetadata};

/// Resource for the connected wallet account
#[derive(Resource, Default, Debug)]
pub struct WalletState {
    /// Connected account address
    pub address: Option<String>,
    /// Held while a connect call is in flight
    connecting: BusyFlag,
    /// Error message from the last failed connect
    pub last_error: Option<String>,
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn is_connecting(&self) -> bool {
        self.connecting.is_busy()
    }

    /// Claim the connect slot. `None` while another connect is running.
    pub fn begin_connect(&mut self) -> Option<BusyGuard> {
        let guard = self.connecting.try_acquire()?;
        self.last_error = None;
        Some(guard)
    }
}

/// Resource tracking mint jobs. Independent of the edit session's busy flag.
#[derive(Resource, Default)]
pub struct MintingStatus {
    busy: BusyFlag,
    /// Description of the job currently running
    pub pending: Option<String>,
    /// Report of the last finished job
    pub last_report: Option<BatchMintReport>,
    /// Error message from the last job, if any item failed
    pub last_error: Option<String>,
}

impl MintingStatus {
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Claim the minting slot for a job described by `description`.
    pub fn begin(&mut self, description: String) -> Option<BusyGuard> {
        let guard = self.busy.try_acquire()?;
        self.pending = Some(description);
        self.last_error = None;
        Some(guard)
    }

    /// Store a finished job's report and derive the error line from it.
    pub fn record_report(&mut self, report: BatchMintReport) {
        self.pending = None;
        self.last_error = match report.failed() {
            0 => None,
            _ if report.outcomes.len() == 1 => report.outcomes[0]
                .result
                .as_ref()
                .err()
                .map(ToString::to_string),
            _ => Some(report.summary()),
        };
        self.last_report = Some(report);
    }

    /// Report a job that was refused before it started.
    pub fn record_error(&mut self, error: &TransactionError) {
        self.last_error = Some(error.to_string());
    }
}

/// What a finished mint job hands back to the main thread
pub struct MintJobOutcome {
    pub owner: String,
    pub target: MintTarget,
    /// Metadata per item, in the same order as the report
    pub metadata: Vec<NftMetadata>,
    pub report: BatchMintReport,
    pub guard: BusyGuard,
}

/// What a finished connect hands back
pub struct ConnectOutcome {
    pub result: Result<String, TransactionError>,
    pub guard: BusyGuard,
}

/// Background task connecting the wallet
#[derive(Component)]
pub struct ConnectTask(pub Task<ConnectOutcome>);

/// Background task running a mint job
#[derive(Component)]
pub struct MintTask(pub Task<MintJobOutcome>);
