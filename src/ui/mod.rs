mod canvas;
mod edit_panel;
mod file_menu;
mod history_panel;
mod mint_panel;
mod settings_dialog;

#[cfg(test)]
mod tests;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<canvas::CanvasState>()
            .init_resource::<edit_panel::EditPanelState>()
            .init_resource::<file_menu::FileMenuState>()
            .init_resource::<mint_panel::MintPanelState>()
            .init_resource::<settings_dialog::SettingsDialogState>()
            // Panels claim space in order: top bar, sides, then the canvas
            // takes what is left. Use chain() to enforce ordering
            .add_systems(
                EguiPrimaryContextPass,
                (
                    file_menu::menu_bar_ui,
                    edit_panel::edit_panel_ui,
                    history_panel::history_panel_ui,
                    canvas::canvas_ui,
                )
                    .chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    // Last: dialogs/overlays
                    mint_panel::mint_panel_ui,
                    file_menu::new_session_dialog_ui,
                    file_menu::config_reset_notification_ui,
                    settings_dialog::settings_dialog_ui,
                )
                    .after(canvas::canvas_ui),
            );
    }
}
