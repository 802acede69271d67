use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::history::EditHistory;
use crate::storage::MintedRegistry;
use crate::theme;
use crate::wallet::{BatchMintRequest, ConnectWalletRequest, MintRequest, MintingStatus, WalletState};

/// State for the mint window
#[derive(Resource)]
pub struct MintPanelState {
    pub is_open: bool,
    pub title: String,
    pub description: String,
    /// `key=value` lines
    pub attributes: String,
    pub batch_prefix: String,
}

impl Default for MintPanelState {
    fn default() -> Self {
        Self {
            is_open: false,
            title: String::new(),
            description: String::new(),
            attributes: String::new(),
            batch_prefix: "Pixelmint".to_string(),
        }
    }
}

/// Shorten `0x1234...abcd` style addresses for display
pub fn short_address(address: &str) -> String {
    if address.len() <= 12 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Renders the mint window
#[allow(clippy::too_many_arguments)]
pub fn mint_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<MintPanelState>,
    wallet: Res<WalletState>,
    status: Res<MintingStatus>,
    registry: Res<MintedRegistry>,
    history: Res<EditHistory>,
    mut connect_events: MessageWriter<ConnectWalletRequest>,
    mut mint_events: MessageWriter<MintRequest>,
    mut batch_events: MessageWriter<BatchMintRequest>,
) -> Result {
    if !panel.is_open {
        return Ok(());
    }

    let mut open = true;
    let busy = status.is_busy();

    egui::Window::new("Mint")
        .collapsible(true)
        .resizable(true)
        .default_width(360.0)
        .open(&mut open)
        .show(contexts.ctx_mut()?, |ui| {
            // Wallet section
            ui.group(|ui| {
                ui.label(egui::RichText::new("Wallet").strong());
                ui.horizontal(|ui| match &wallet.address {
                    Some(address) => {
                        ui.colored_label(theme::SUCCESS_TEXT, "Connected");
                        ui.monospace(short_address(address)).on_hover_text(address);
                    }
                    None if wallet.is_connecting() => {
                        ui.spinner();
                        ui.label("Connecting...");
                    }
                    None => {
                        if ui.button("Connect Wallet").clicked() {
                            connect_events.write(ConnectWalletRequest);
                        }
                    }
                });
                if let Some(error) = &wallet.last_error {
                    ui.colored_label(theme::ERROR_TEXT, error);
                }
            });

            ui.add_space(8.0);

            // Single mint section
            ui.group(|ui| {
                ui.label(egui::RichText::new("Mint current image").strong());
                ui.horizontal(|ui| {
                    ui.label("Title:");
                    ui.text_edit_singleline(&mut panel.title);
                });
                ui.label("Description:");
                ui.add(egui::TextEdit::multiline(&mut panel.description).desired_rows(2));
                ui.label("Attributes (one key=value per line):");
                ui.add(
                    egui::TextEdit::multiline(&mut panel.attributes)
                        .desired_rows(2)
                        .hint_text("mood=calm"),
                );

                let can_mint = wallet.is_connected()
                    && !busy
                    && history.current().is_some()
                    && !panel.title.trim().is_empty();
                if ui
                    .add_enabled(can_mint, egui::Button::new("Mint"))
                    .on_disabled_hover_text("Connect a wallet, open an image and set a title")
                    .clicked()
                {
                    mint_events.write(MintRequest {
                        title: panel.title.clone(),
                        description: panel.description.clone(),
                        attributes: panel.attributes.clone(),
                    });
                }
            });

            ui.add_space(8.0);

            // Batch mint section
            ui.group(|ui| {
                ui.label(egui::RichText::new("Mint every history step").strong());
                ui.horizontal(|ui| {
                    ui.label("Title prefix:");
                    ui.text_edit_singleline(&mut panel.batch_prefix);
                });
                let can_batch = wallet.is_connected() && !busy && !history.is_empty();
                if ui
                    .add_enabled(
                        can_batch,
                        egui::Button::new(format!("Mint {} images", history.len())),
                    )
                    .clicked()
                {
                    batch_events.write(BatchMintRequest {
                        title_prefix: panel.batch_prefix.clone(),
                        description: panel.description.clone(),
                    });
                }
            });

            ui.add_space(8.0);

            // Job status
            if let Some(pending) = &status.pending {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(pending);
                });
            }
            if let Some(error) = &status.last_error {
                ui.colored_label(theme::ERROR_TEXT, error);
            }
            if let Some(report) = &status.last_report {
                ui.label(format!("Last job: {}", report.summary()));
                for outcome in &report.outcomes {
                    match &outcome.result {
                        Ok(token) => ui.colored_label(
                            theme::SUCCESS_TEXT,
                            format!("{}: {}", outcome.title, token.receipt.tx_hash),
                        ),
                        Err(e) => {
                            ui.colored_label(theme::ERROR_TEXT, format!("{}: {}", outcome.title, e))
                        }
                    };
                }
            }

            ui.separator();

            // Minted records for the connected account
            ui.collapsing(format!("Minted ({})", registry.records.len()), |ui| {
                if registry.records.is_empty() {
                    ui.label(egui::RichText::new("Nothing minted yet").weak().italics());
                    return;
                }
                egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    for record in registry.records.iter().rev() {
                        ui.label(egui::RichText::new(&record.title).strong());
                        ui.label(
                            egui::RichText::new(format!(
                                "{} on {} at {}",
                                record.tx_hash, record.network, record.minted_at
                            ))
                            .small()
                            .color(theme::HINT_TEXT),
                        );
                        ui.label(egui::RichText::new(&record.content_url).small().weak());
                        ui.add_space(4.0);
                    }
                });
            });
        });

    if !open {
        panel.is_open = false;
    }

    Ok(())
}
