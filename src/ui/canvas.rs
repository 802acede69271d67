use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::editing::EditSession;
use crate::history::EditHistory;
use crate::services::imaging::Hotspot;
use crate::theme;

/// Largest zoom applied to small images
const MAX_DISPLAY_SCALE: f32 = 4.0;

/// Texture of the current artifact plus the picked edit point
#[derive(Resource, Default)]
pub struct CanvasState {
    texture: Option<egui::TextureHandle>,
    /// Pixel size of the loaded texture
    image_size: (u32, u32),
    /// History revision the texture was built from
    shown_revision: Option<u64>,
    decode_error: Option<String>,
    /// Point picked by clicking the image, in source pixels
    pub hotspot: Option<Hotspot>,
}

impl CanvasState {
    /// Rebuild the texture when the history has moved since the last frame.
    fn sync(&mut self, ctx: &egui::Context, history: &EditHistory) {
        if self.shown_revision == Some(history.revision()) {
            return;
        }
        self.shown_revision = Some(history.revision());
        self.decode_error = None;

        let Some(current) = history.current() else {
            self.texture = None;
            self.hotspot = None;
            return;
        };

        match current.decode() {
            Ok(image) => {
                let rgba = image.to_rgba8();
                let size = rgba.dimensions();
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [size.0 as usize, size.1 as usize],
                    rgba.as_raw(),
                );
                self.texture = Some(ctx.load_texture(
                    current.name(),
                    color_image,
                    egui::TextureOptions::LINEAR,
                ));
                if self.image_size != size {
                    self.hotspot = None;
                }
                self.image_size = size;
            }
            Err(e) => {
                warn!("Cannot preview {}: {}", current.name(), e);
                self.texture = None;
                self.decode_error = Some(e.to_string());
            }
        }
    }
}

/// Map a position inside the displayed image to a source pixel.
pub fn pixel_at(local: egui::Vec2, display: egui::Vec2, size: (u32, u32)) -> Option<Hotspot> {
    if size.0 == 0 || size.1 == 0 || display.x <= 0.0 || display.y <= 0.0 {
        return None;
    }
    if local.x < 0.0 || local.y < 0.0 || local.x > display.x || local.y > display.y {
        return None;
    }
    let x = (local.x / display.x * size.0 as f32) as u32;
    let y = (local.y / display.y * size.1 as f32) as u32;
    Some(Hotspot {
        x: x.min(size.0 - 1),
        y: y.min(size.1 - 1),
    })
}

/// Scale that fits `size` into `available` without exceeding the max zoom
pub fn fit_scale(size: (u32, u32), available: egui::Vec2) -> f32 {
    if size.0 == 0 || size.1 == 0 {
        return 1.0;
    }
    (available.x / size.0 as f32)
        .min(available.y / size.1 as f32)
        .clamp(0.01, MAX_DISPLAY_SCALE)
}

/// Central panel showing the current artifact
pub fn canvas_ui(
    mut contexts: EguiContexts,
    history: Res<EditHistory>,
    session: Res<EditSession>,
    mut canvas: ResMut<CanvasState>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    canvas.sync(ctx, &history);

    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(theme::CANVAS_BACKGROUND))
        .show(ctx, |ui| {
            if let Some(pending) = &session.pending {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(pending);
                });
            }

            let Some(texture) = canvas.texture.clone() else {
                ui.centered_and_justified(|ui| match &canvas.decode_error {
                    Some(error) => {
                        ui.colored_label(theme::ERROR_TEXT, format!("Cannot display image: {}", error));
                    }
                    None => {
                        ui.label(
                            egui::RichText::new("Open an image or generate one from a prompt")
                                .color(theme::HINT_TEXT),
                        );
                    }
                });
                return;
            };

            let size = canvas.image_size;
            let scale = fit_scale(size, ui.available_size());
            let display = egui::vec2(size.0 as f32 * scale, size.1 as f32 * scale);

            ui.vertical_centered(|ui| {
                let response = ui
                    .add(
                        egui::Image::new((texture.id(), display))
                            .fit_to_exact_size(display)
                            .sense(egui::Sense::click()),
                    )
                    .on_hover_text("Click to pick the edit point");

                if response.clicked()
                    && let Some(pos) = response.interact_pointer_pos()
                {
                    canvas.hotspot = pixel_at(pos - response.rect.min, display, size);
                }

                if let Some(point) = canvas.hotspot {
                    let center = response.rect.min
                        + egui::vec2(
                            (point.x as f32 + 0.5) * scale,
                            (point.y as f32 + 0.5) * scale,
                        );
                    let stroke = egui::Stroke::new(2.0, theme::HOTSPOT_MARKER);
                    ui.painter().circle_stroke(center, 8.0, stroke);
                    ui.painter().line_segment(
                        [center - egui::vec2(12.0, 0.0), center + egui::vec2(12.0, 0.0)],
                        stroke,
                    );
                    ui.painter().line_segment(
                        [center - egui::vec2(0.0, 12.0), center + egui::vec2(0.0, 12.0)],
                        stroke,
                    );
                }

                if let Some(current) = history.current() {
                    ui.label(
                        egui::RichText::new(format!("{} ({}x{})", current.name(), size.0, size.1))
                            .small()
                            .color(theme::HINT_TEXT),
                    );
                }
            });
        });

    Ok(())
}
