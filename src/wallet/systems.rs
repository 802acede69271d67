//! Bevy systems for connecting the wallet and running mint jobs.

use bevy::prelude::*;
use bevy::tasks::AsyncComputeTaskPool;
use futures_lite::future;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::error::TransactionError;
use crate::history::EditHistory;
use crate::services::MintingGateway;
use crate::services::minting::{MintItem, MintTarget, mint_batch};
use crate::storage::{MintedRegistry, SessionStorage};

use super::messages::{BatchMintRequest, ConnectWalletRequest, MintRequest};
use super::records::{batch_items, minted_records, single_item};
use super::state::{ConnectOutcome, ConnectTask, MintJobOutcome, MintTask, MintingStatus, WalletState};

/// System to start a wallet connect
pub fn start_connect(
    mut commands: Commands,
    mut events: MessageReader<ConnectWalletRequest>,
    mut wallet: ResMut<WalletState>,
    gateway: Option<Res<MintingGateway>>,
) {
    // Several clicks in one frame still mean one connect
    if events.read().count() == 0 || wallet.is_connecting() {
        return;
    }
    let Some(gateway) = gateway else {
        error!("Minting gateway is not configured");
        return;
    };
    let Some(guard) = wallet.begin_connect() else {
        return;
    };

    let service = Arc::clone(&gateway.0);
    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move {
        ConnectOutcome {
            result: service.connect(),
            guard,
        }
    });
    commands.spawn(ConnectTask(task));
}

/// System to poll the connect task and load the account's minted records
pub fn poll_connect(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ConnectTask)>,
    mut wallet: ResMut<WalletState>,
    mut registry: ResMut<MintedRegistry>,
    storage: Res<SessionStorage>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        // The guard lives in the outcome; a clear flag means the task unwound
        if !wallet.is_connecting() {
            error!("Wallet connect ended without a result");
            wallet.last_error = Some("Connecting stopped unexpectedly".to_string());
            commands.entity(entity).despawn();
            continue;
        }

        let Some(ConnectOutcome { result, guard }) =
            future::block_on(future::poll_once(&mut task.0))
        else {
            continue;
        };

        match result {
            Ok(address) => {
                info!("Wallet connected: {}", address);
                registry.load_account(storage.store(), &address);
                wallet.address = Some(address);
            }
            Err(e) => {
                warn!("Wallet connect failed: {}", e);
                wallet.last_error = Some(e.to_string());
            }
        }

        drop(guard);
        commands.entity(entity).despawn();
    }
}

/// System to queue the current artifact for minting
pub fn start_single_mint(
    mut commands: Commands,
    mut events: MessageReader<MintRequest>,
    mut status: ResMut<MintingStatus>,
    wallet: Res<WalletState>,
    history: Res<EditHistory>,
    config: Res<AppConfig>,
    gateway: Option<Res<MintingGateway>>,
) {
    for request in events.read() {
        let Some(current) = history.current() else {
            warn!("Mint requested with nothing to mint");
            continue;
        };
        let items = vec![single_item(current, request)];
        let description = format!("Minting \"{}\"...", request.title.trim());
        spawn_mint_job(
            &mut commands,
            &mut status,
            &wallet,
            &config,
            gateway.as_deref(),
            items,
            description,
        );
    }
}

/// System to queue every history entry for minting
pub fn start_batch_mint(
    mut commands: Commands,
    mut events: MessageReader<BatchMintRequest>,
    mut status: ResMut<MintingStatus>,
    wallet: Res<WalletState>,
    history: Res<EditHistory>,
    config: Res<AppConfig>,
    gateway: Option<Res<MintingGateway>>,
) {
    for request in events.read() {
        let items = batch_items(history.entries(), request);
        if items.is_empty() {
            warn!("Batch mint requested with an empty history");
            continue;
        }
        let description = format!("Minting {} images...", items.len());
        spawn_mint_job(
            &mut commands,
            &mut status,
            &wallet,
            &config,
            gateway.as_deref(),
            items,
            description,
        );
    }
}

fn spawn_mint_job(
    commands: &mut Commands,
    status: &mut MintingStatus,
    wallet: &WalletState,
    config: &AppConfig,
    gateway: Option<&MintingGateway>,
    items: Vec<MintItem>,
    description: String,
) {
    let Some(owner) = wallet.address.clone() else {
        status.record_error(&TransactionError::NoWallet);
        return;
    };
    let Some(gateway) = gateway else {
        error!("Minting gateway is not configured");
        return;
    };
    let Some(guard) = status.begin(description) else {
        warn!("A mint job is already running");
        return;
    };

    let target = MintTarget {
        contract_address: config.data.minting.contract_address.trim().to_string(),
        network: config.data.minting.network.trim().to_string(),
    };
    let service = Arc::clone(&gateway.0);
    info!("Starting mint job of {} item(s) for {}", items.len(), owner);

    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move {
        let report = mint_batch(service.as_ref(), &target, &owner, &items);
        MintJobOutcome {
            owner,
            target,
            metadata: items.into_iter().map(|item| item.metadata).collect(),
            report,
            guard,
        }
    });
    commands.spawn(MintTask(task));
}

/// System to poll mint jobs, record minted tokens and persist them
pub fn poll_mint_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut MintTask)>,
    mut status: ResMut<MintingStatus>,
    mut registry: ResMut<MintedRegistry>,
    storage: Res<SessionStorage>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        if !status.is_busy() {
            error!("Mint task ended without producing a report");
            status.pending = None;
            status.last_error = Some("Minting stopped unexpectedly".to_string());
            commands.entity(entity).despawn();
            continue;
        }

        let Some(outcome) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        let MintJobOutcome {
            owner,
            target,
            metadata,
            report,
            guard,
        } = outcome;

        let minted_at = chrono::Utc::now().to_rfc3339();
        let records = minted_records(&report, &metadata, &target, &minted_at);
        info!("Mint job finished: {}", report.summary());

        if !records.is_empty() {
            if !registry.is_account(&owner) {
                registry.load_account(storage.store(), &owner);
            }
            registry.records.extend(records);
            if let Err(e) = registry.save(storage.store()) {
                error!("Failed to persist minted records: {}", e);
            }
        }

        status.record_report(report);
        drop(guard);
        commands.entity(entity).despawn();
    }
}
