use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, ImageServiceSettings, MintingSettings, SaveConfigRequest};
use crate::services::minting::is_evm_address;
use crate::theme;

/// State for the settings dialog
#[derive(Resource, Default)]
pub struct SettingsDialogState {
    /// Whether the dialog is open
    pub is_open: bool,
    /// Edited image service settings
    pub image_service: ImageServiceSettings,
    /// Edited minting settings
    pub minting: MintingSettings,
    /// Whether changes have been made
    pub has_changes: bool,
}

impl SettingsDialogState {
    /// Open the dialog with a copy of the current config
    pub fn open(&mut self, config: &AppConfig) {
        self.image_service = config.data.image_service.clone();
        self.minting = config.data.minting.clone();
        self.has_changes = false;
        self.is_open = true;
    }

    /// Problems that should block saving
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.image_service.endpoint.trim().is_empty() {
            return Some("Image service endpoint is required");
        }
        if self.image_service.model.trim().is_empty() {
            return Some("Model name is required");
        }
        if self.minting.gateway_url.trim().is_empty() {
            return Some("Minting gateway URL is required");
        }
        let contract = self.minting.contract_address.trim();
        if !contract.is_empty() && !is_evm_address(contract) {
            return Some("Contract address must be 0x followed by 40 hex digits");
        }
        None
    }
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) -> bool {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .desired_width(f32::INFINITY)
            .hint_text(hint),
    )
    .changed()
}

/// Renders the settings dialog
pub fn settings_dialog_ui(
    mut contexts: EguiContexts,
    mut dialog_state: ResMut<SettingsDialogState>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    if !dialog_state.is_open {
        return Ok(());
    }

    let mut should_close = false;
    let mut should_save = false;
    let validation = dialog_state.validation_error();

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            let state = &mut *dialog_state;
            let mut changed = false;

            ui.group(|ui| {
                ui.label(egui::RichText::new("Image Service").strong());
                ui.add_space(8.0);
                changed |= text_row(
                    ui,
                    "Endpoint:",
                    &mut state.image_service.endpoint,
                    "https://generativelanguage.googleapis.com/v1beta",
                );
                changed |= text_row(ui, "Model:", &mut state.image_service.model, "");
                changed |= text_row(
                    ui,
                    "API key environment variable:",
                    &mut state.image_service.api_key_env,
                    "GEMINI_API_KEY",
                );

                let key_set = std::env::var(state.image_service.api_key_env.trim())
                    .is_ok_and(|v| !v.is_empty());
                if !key_set {
                    ui.colored_label(theme::ERROR_TEXT, "The variable is not set; requests will fail.");
                }
            });

            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Minting").strong());
                ui.add_space(8.0);
                changed |= text_row(ui, "Gateway URL:", &mut state.minting.gateway_url, "");
                changed |= text_row(
                    ui,
                    "Contract address:",
                    &mut state.minting.contract_address,
                    "0x...",
                );
                changed |= text_row(ui, "Network:", &mut state.minting.network, "sepolia");
            });

            if changed {
                state.has_changes = true;
            }

            if let Some(error) = validation {
                ui.add_space(8.0);
                ui.colored_label(theme::ERROR_TEXT, error);
            }

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        state.has_changes && validation.is_none(),
                        egui::Button::new("Save"),
                    )
                    .clicked()
                {
                    should_save = true;
                }

                if ui.button("Cancel").clicked() {
                    should_close = true;
                }
            });
        });

    if should_save {
        config.data.image_service = dialog_state.image_service.clone();
        config.data.minting = dialog_state.minting.clone();
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Settings updated");
        should_close = true;
    }

    if should_close {
        dialog_state.is_open = false;
        dialog_state.has_changes = false;
    }

    Ok(())
}
