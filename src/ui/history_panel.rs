use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editing::EditSession;
use crate::history::{EditHistory, HistoryRequest};
use crate::theme;

/// Right panel listing every history entry
pub fn history_panel_ui(
    mut contexts: EguiContexts,
    history: Res<EditHistory>,
    session: Res<EditSession>,
    mut requests: MessageWriter<HistoryRequest>,
) -> Result {
    let busy = session.is_busy();

    egui::SidePanel::right("history_panel")
        .default_width(220.0)
        .resizable(true)
        .show(contexts.ctx_mut()?, |ui| {
            ui.heading("History");
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!busy && history.can_undo(), egui::Button::new("Undo"))
                    .on_hover_text("Ctrl+Z")
                    .clicked()
                {
                    requests.write(HistoryRequest::Undo);
                }
                if ui
                    .add_enabled(!busy && history.can_redo(), egui::Button::new("Redo"))
                    .on_hover_text("Ctrl+Y")
                    .clicked()
                {
                    requests.write(HistoryRequest::Redo);
                }
                if ui
                    .add_enabled(!busy && history.can_undo(), egui::Button::new("Original"))
                    .on_hover_text("Jump back to the first image")
                    .clicked()
                {
                    requests.write(HistoryRequest::RevertToOriginal);
                }
            });

            ui.separator();

            if history.is_empty() {
                ui.label(egui::RichText::new("No edits yet").weak().italics());
                return;
            }

            let cursor = history.cursor();
            egui::ScrollArea::vertical().show(ui, |ui| {
                for (index, entry) in history.entries().iter().enumerate() {
                    let selected = cursor == Some(index);
                    let text = if index == 0 {
                        egui::RichText::new(format!("{}. {} (original)", index + 1, entry.name()))
                            .color(theme::ORIGINAL_ENTRY)
                    } else {
                        egui::RichText::new(format!("{}. {}", index + 1, entry.name()))
                    };

                    let response = ui.add_enabled(!busy, egui::Button::new(text).selected(selected));
                    if response.clicked() && !selected {
                        requests.write(HistoryRequest::Seek(index));
                    }
                }
            });

            if history.can_redo() {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new("Applying an edit here discards the later entries.")
                        .small()
                        .color(theme::HINT_TEXT),
                );
            }
        });

    Ok(())
}
