use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::PathBuf;

use crate::artifact::extension_for;
use crate::config::{AppConfig, ConfigResetNotification};
use crate::editing::{EditSession, ExportImageRequest, OpenImageRequest};
use crate::history::{EditHistory, HistoryRequest};

use super::edit_panel::IMAGE_EXTENSIONS;
use super::mint_panel::MintPanelState;
use super::settings_dialog::SettingsDialogState;

#[derive(Resource, Default)]
pub struct FileMenuState {
    pub show_new_confirmation: bool,
    /// Pending async file dialog for opening an image
    pub pending_open: Option<Task<Option<PathBuf>>>,
    /// Pending async file dialog for exporting the current image
    pub pending_export: Option<Task<Option<PathBuf>>>,
}

/// Suggested export file name: the artifact's name with an extension that
/// matches its content type
pub fn export_file_name(name: &str, content_type: &str) -> String {
    let ext = extension_for(content_type);
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    format!("{}.{}", stem, ext)
}

/// Top menu bar with file and window actions
#[allow(clippy::too_many_arguments)]
pub fn menu_bar_ui(
    mut contexts: EguiContexts,
    mut menu_state: ResMut<FileMenuState>,
    mut settings: ResMut<SettingsDialogState>,
    mut mint_panel: ResMut<MintPanelState>,
    config: Res<AppConfig>,
    history: Res<EditHistory>,
    session: Res<EditSession>,
    mut open_events: MessageWriter<OpenImageRequest>,
    mut export_events: MessageWriter<ExportImageRequest>,
) -> Result {
    // Poll pending dialogs (before drawing so results apply this frame)
    if let Some(ref mut task) = menu_state.pending_open
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        menu_state.pending_open = None;
        if let Some(path) = result {
            open_events.write(OpenImageRequest { path });
        }
    }
    if let Some(ref mut task) = menu_state.pending_export
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        menu_state.pending_export = None;
        if let Some(path) = result {
            export_events.write(ExportImageRequest { path });
        }
    }

    let mut should_open = false;
    let mut should_export = false;
    let busy = session.is_busy();

    egui::TopBottomPanel::top("menu_bar").show(contexts.ctx_mut()?, |ui| {
        ui.horizontal(|ui| {
            ui.menu_button("File", |ui| {
                if ui.add_enabled(!busy, egui::Button::new("Open Image...")).clicked() {
                    should_open = true;
                    ui.close();
                }
                if ui
                    .add_enabled(history.current().is_some(), egui::Button::new("Export Image..."))
                    .clicked()
                {
                    should_export = true;
                    ui.close();
                }
                ui.separator();
                if ui
                    .add_enabled(!busy && !history.is_empty(), egui::Button::new("New Session"))
                    .clicked()
                {
                    menu_state.show_new_confirmation = true;
                    ui.close();
                }
                ui.separator();
                if ui.button("Settings...").clicked() {
                    settings.open(&config);
                    ui.close();
                }
            });
            ui.menu_button("Window", |ui| {
                if ui.checkbox(&mut mint_panel.is_open, "Mint").clicked() {
                    ui.close();
                }
            });
        });
    });

    if should_open && menu_state.pending_open.is_none() {
        let start_dir = config.data.last_open_dir.clone();
        let task_pool = AsyncComputeTaskPool::get();
        menu_state.pending_open = Some(task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title("Open Image")
                .add_filter("Images", IMAGE_EXTENSIONS);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        }));
    }

    if should_export
        && menu_state.pending_export.is_none()
        && let Some(current) = history.current()
    {
        let file_name = export_file_name(current.name(), current.content_type());
        let ext = extension_for(current.content_type()).to_string();
        let task_pool = AsyncComputeTaskPool::get();
        menu_state.pending_export = Some(task_pool.spawn(async move {
            rfd::AsyncFileDialog::new()
                .set_title("Export Image")
                .set_file_name(file_name)
                .add_filter("Image", &[ext.as_str()])
                .save_file()
                .await
                .map(|h| h.path().to_path_buf())
        }));
    }

    Ok(())
}

/// Confirmation before discarding the whole session
pub fn new_session_dialog_ui(
    mut contexts: EguiContexts,
    mut menu_state: ResMut<FileMenuState>,
    mut requests: MessageWriter<HistoryRequest>,
) -> Result {
    if !menu_state.show_new_confirmation {
        return Ok(());
    }

    egui::Window::new("New Session")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Start over? Every image in the history will be discarded.");
            ui.horizontal(|ui| {
                if ui.button("Start Over").clicked() {
                    requests.write(HistoryRequest::NewSession);
                    menu_state.show_new_confirmation = false;
                }
                if ui.button("Cancel").clicked() {
                    menu_state.show_new_confirmation = false;
                }
            });
        });

    Ok(())
}

/// Renders the config reset notification (shown at startup if config was corrupted)
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your configuration file could not be loaded and has been reset to defaults.");

            if let Some(ref reason) = notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).weak());
            }

            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}
