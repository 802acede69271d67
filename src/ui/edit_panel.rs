use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use bevy_egui::{egui, EguiContexts};
use futures_lite::future;
use std::path::PathBuf;

use crate::artifact::Artifact;
use crate::editing::{EditOperation, EditRequest, EditSession, RetryEditRequest};
use crate::history::EditHistory;
use crate::services::imaging::{Hotspot, UpscaleFactor};
use crate::theme;

use super::canvas::CanvasState;

/// Image extensions offered by the file pickers
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

const FILTER_PRESETS: &[&str] = &["Synthwave", "Anime", "Lomo", "Glitch"];
const ADJUSTMENT_PRESETS: &[&str] = &[
    "Blur the background",
    "Enhance details",
    "Warmer lighting",
    "Studio lighting",
];

/// Which operation the panel is set up for
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperationKind {
    #[default]
    Generate,
    EditAtPoint,
    Adjust,
    Filter,
    Style,
    RemoveBackground,
    Inpaint,
    Upscale,
}

impl OperationKind {
    pub fn all() -> &'static [OperationKind] {
        &[
            OperationKind::Generate,
            OperationKind::EditAtPoint,
            OperationKind::Adjust,
            OperationKind::Filter,
            OperationKind::Style,
            OperationKind::RemoveBackground,
            OperationKind::Inpaint,
            OperationKind::Upscale,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OperationKind::Generate => "Generate",
            OperationKind::EditAtPoint => "Retouch at point",
            OperationKind::Adjust => "Adjust",
            OperationKind::Filter => "Filter",
            OperationKind::Style => "Style",
            OperationKind::RemoveBackground => "Remove background",
            OperationKind::Inpaint => "Inpaint mask",
            OperationKind::Upscale => "Upscale",
        }
    }

    fn presets(&self) -> &'static [&'static str] {
        match self {
            OperationKind::Filter => FILTER_PRESETS,
            OperationKind::Adjust => ADJUSTMENT_PRESETS,
            _ => &[],
        }
    }

    fn uses_instruction(&self) -> bool {
        matches!(
            self,
            OperationKind::EditAtPoint
                | OperationKind::Adjust
                | OperationKind::Filter
                | OperationKind::Style
        )
    }
}

/// Form state of the edit panel
#[derive(Resource, Default)]
pub struct EditPanelState {
    pub kind: OperationKind,
    pub prompt: String,
    pub instruction: String,
    pub factor: UpscaleFactor,
    pub mask: Option<Artifact>,
    pub mask_error: Option<String>,
    /// Pending async file dialog for the mask image
    pub pending_mask: Option<Task<Option<PathBuf>>>,
}

impl EditPanelState {
    /// Turn the form into an operation, or say what is missing.
    pub fn build_operation(&self, hotspot: Option<Hotspot>) -> Result<EditOperation, &'static str> {
        let instruction = self.instruction.trim().to_string();
        if self.kind.uses_instruction() && instruction.is_empty() {
            return Err("Describe the change first");
        }

        let operation = match self.kind {
            OperationKind::Generate => {
                let prompt = self.prompt.trim();
                if prompt.is_empty() {
                    return Err("Enter a prompt first");
                }
                EditOperation::GenerateFromText {
                    prompt: prompt.to_string(),
                }
            }
            OperationKind::EditAtPoint => EditOperation::EditAtPoint {
                instruction,
                point: hotspot.ok_or("Click the image to pick a point")?,
            },
            OperationKind::Adjust => EditOperation::GlobalAdjustment { instruction },
            OperationKind::Filter => EditOperation::Filter { instruction },
            OperationKind::Style => EditOperation::Style { instruction },
            OperationKind::RemoveBackground => EditOperation::RemoveBackground,
            OperationKind::Inpaint => EditOperation::InpaintMasked {
                mask: self.mask.clone().ok_or("Choose a mask image")?,
            },
            OperationKind::Upscale => EditOperation::Upscale {
                factor: self.factor,
            },
        };
        Ok(operation)
    }
}

/// Left panel with the operation form and the last error
pub fn edit_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<EditPanelState>,
    mut session: ResMut<EditSession>,
    history: Res<EditHistory>,
    canvas: Res<CanvasState>,
    mut edit_events: MessageWriter<EditRequest>,
    mut retry_events: MessageWriter<RetryEditRequest>,
) -> Result {
    // Poll the mask picker before drawing so the new mask shows this frame
    if let Some(ref mut task) = panel.pending_mask
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        panel.pending_mask = None;
        if let Some(path) = result {
            match Artifact::from_file(&path) {
                Ok(mask) => {
                    panel.mask = Some(mask);
                    panel.mask_error = None;
                }
                Err(e) => panel.mask_error = Some(e.to_string()),
            }
        }
    }

    let mut submit: Option<EditOperation> = None;
    let mut browse_mask = false;
    let mut dismiss = false;

    let has_image = !history.is_empty();
    let busy = session.is_busy();

    egui::SidePanel::left("edit_panel")
        .default_width(280.0)
        .resizable(true)
        .show(contexts.ctx_mut()?, |ui| {
            ui.heading("Edit");
            ui.add_space(8.0);

            egui::ComboBox::from_id_salt("operation_kind")
                .selected_text(panel.kind.display_name())
                .show_ui(ui, |ui| {
                    for kind in OperationKind::all() {
                        ui.selectable_value(&mut panel.kind, *kind, kind.display_name());
                    }
                });

            ui.add_space(8.0);

            match panel.kind {
                OperationKind::Generate => {
                    ui.label("Prompt:");
                    ui.add(
                        egui::TextEdit::multiline(&mut panel.prompt)
                            .desired_rows(3)
                            .hint_text("A lighthouse at dusk, oil painting"),
                    );
                    if has_image {
                        ui.label(
                            egui::RichText::new("Generating starts a new session.")
                                .small()
                                .color(theme::HINT_TEXT),
                        );
                    }
                }
                OperationKind::Inpaint => {
                    ui.label("White areas are regenerated, black areas are kept.");
                    ui.horizontal(|ui| {
                        let label = panel.mask.as_ref().map_or("No mask", |m| m.name());
                        ui.label(label);
                        if ui.button("Choose mask...").clicked() {
                            browse_mask = true;
                        }
                    });
                    if let Some(error) = &panel.mask_error {
                        ui.colored_label(theme::ERROR_TEXT, error);
                    }
                }
                OperationKind::Upscale => {
                    ui.horizontal(|ui| {
                        ui.label("Factor:");
                        for factor in UpscaleFactor::all() {
                            ui.selectable_value(
                                &mut panel.factor,
                                *factor,
                                format!("x{}", factor.factor()),
                            );
                        }
                    });
                }
                OperationKind::RemoveBackground => {
                    ui.label("Replaces the background with transparency.");
                }
                _ => {}
            }

            if panel.kind.uses_instruction() {
                ui.label("Instruction:");
                ui.add(
                    egui::TextEdit::multiline(&mut panel.instruction)
                        .desired_rows(2)
                        .hint_text("Describe the change"),
                );

                let presets = panel.kind.presets();
                if !presets.is_empty() {
                    ui.horizontal_wrapped(|ui| {
                        for preset in presets {
                            if ui.small_button(*preset).clicked() {
                                panel.instruction = preset.to_string();
                            }
                        }
                    });
                }
            }

            if panel.kind == OperationKind::EditAtPoint {
                match canvas.hotspot {
                    Some(point) => ui.label(format!("Point: ({}, {})", point.x, point.y)),
                    None => ui.label(
                        egui::RichText::new("Click the image to pick a point")
                            .color(theme::HINT_TEXT),
                    ),
                };
            }

            ui.add_space(12.0);

            let built = panel.build_operation(canvas.hotspot);
            let needs_image = panel.kind != OperationKind::Generate;
            let enabled = !busy && built.is_ok() && (has_image || !needs_image);

            let response = ui.add_enabled(enabled, egui::Button::new("Apply"));
            let response = match (&built, needs_image && !has_image, busy) {
                (_, _, true) => response.on_disabled_hover_text("An edit is already running"),
                (_, true, _) => response.on_disabled_hover_text("Open or generate an image first"),
                (Err(reason), _, _) => response.on_disabled_hover_text(*reason),
                _ => response,
            };
            if response.clicked()
                && let Ok(operation) = built
            {
                submit = Some(operation);
            }

            if let Some(error) = &session.last_error {
                ui.add_space(12.0);
                ui.separator();
                ui.colored_label(theme::ERROR_TEXT, error);
                ui.horizontal(|ui| {
                    if session.last_failed.is_some()
                        && ui.add_enabled(!busy, egui::Button::new("Retry")).clicked()
                    {
                        retry_events.write(RetryEditRequest);
                    }
                    if ui.button("Dismiss").clicked() {
                        dismiss = true;
                    }
                });
            }
        });

    if let Some(operation) = submit {
        edit_events.write(EditRequest(operation));
    }

    if dismiss {
        session.dismiss_error();
    }

    if browse_mask && panel.pending_mask.is_none() {
        let task_pool = AsyncComputeTaskPool::get();
        panel.pending_mask = Some(task_pool.spawn(async {
            rfd::AsyncFileDialog::new()
                .set_title("Select Mask Image")
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_file()
                .await
                .map(|h| h.path().to_path_buf())
        }));
    }

    Ok(())
}
