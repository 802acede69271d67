//! Unit tests for the form logic behind the panels.

use bevy_egui::egui;

use super::canvas::{fit_scale, pixel_at};
use super::edit_panel::{EditPanelState, OperationKind};
use super::file_menu::export_file_name;
use super::mint_panel::short_address;
use super::settings_dialog::SettingsDialogState;
use crate::artifact::{Artifact, PNG_CONTENT_TYPE};
use crate::editing::EditOperation;
use crate::services::imaging::{Hotspot, UpscaleFactor};

fn panel(kind: OperationKind) -> EditPanelState {
    EditPanelState {
        kind,
        ..Default::default()
    }
}

// Edit panel form

#[test]
fn test_generate_requires_prompt() {
    let mut state = panel(OperationKind::Generate);
    assert!(state.build_operation(None).is_err());

    state.prompt = "  a red fox  ".to_string();
    assert_eq!(
        state.build_operation(None).unwrap(),
        EditOperation::GenerateFromText {
            prompt: "a red fox".to_string()
        }
    );
}

#[test]
fn test_instruction_operations_require_text() {
    for kind in [OperationKind::Adjust, OperationKind::Filter, OperationKind::Style] {
        let mut state = panel(kind);
        state.instruction = "   ".to_string();
        assert!(state.build_operation(None).is_err(), "{:?}", kind);
    }

    let mut state = panel(OperationKind::Filter);
    state.instruction = "Lomo".to_string();
    assert_eq!(
        state.build_operation(None).unwrap(),
        EditOperation::Filter {
            instruction: "Lomo".to_string()
        }
    );
}

#[test]
fn test_edit_at_point_requires_hotspot() {
    let mut state = panel(OperationKind::EditAtPoint);
    state.instruction = "remove the sign".to_string();
    assert!(state.build_operation(None).is_err());

    let point = Hotspot { x: 4, y: 7 };
    assert_eq!(
        state.build_operation(Some(point)).unwrap(),
        EditOperation::EditAtPoint {
            instruction: "remove the sign".to_string(),
            point
        }
    );
}

#[test]
fn test_inpaint_requires_mask() {
    let mut state = panel(OperationKind::Inpaint);
    assert!(state.build_operation(None).is_err());

    let mask = Artifact::new(vec![0u8], PNG_CONTENT_TYPE, "mask.png");
    state.mask = Some(mask.clone());
    assert_eq!(
        state.build_operation(None).unwrap(),
        EditOperation::InpaintMasked { mask }
    );
}

#[test]
fn test_upscale_and_cutout_need_no_input() {
    let mut state = panel(OperationKind::Upscale);
    state.factor = UpscaleFactor::X4;
    assert_eq!(
        state.build_operation(None).unwrap(),
        EditOperation::Upscale {
            factor: UpscaleFactor::X4
        }
    );
    assert_eq!(
        panel(OperationKind::RemoveBackground).build_operation(None).unwrap(),
        EditOperation::RemoveBackground
    );
}

#[test]
fn test_operation_kinds_listed_once() {
    let kinds = OperationKind::all();
    assert_eq!(kinds.len(), 8);
    for (i, a) in kinds.iter().enumerate() {
        for b in &kinds[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

// Canvas geometry

#[test]
fn test_pixel_at_maps_scaled_position() {
    let display = egui::vec2(200.0, 100.0);
    let point = pixel_at(egui::vec2(100.0, 50.0), display, (20, 10)).unwrap();
    assert_eq!(point, Hotspot { x: 10, y: 5 });
}

#[test]
fn test_pixel_at_clamps_far_edge() {
    let display = egui::vec2(200.0, 100.0);
    let point = pixel_at(egui::vec2(200.0, 100.0), display, (20, 10)).unwrap();
    assert_eq!(point, Hotspot { x: 19, y: 9 });
}

#[test]
fn test_pixel_at_outside_image() {
    let display = egui::vec2(200.0, 100.0);
    assert!(pixel_at(egui::vec2(-1.0, 10.0), display, (20, 10)).is_none());
    assert!(pixel_at(egui::vec2(10.0, 101.0), display, (20, 10)).is_none());
    assert!(pixel_at(egui::vec2(1.0, 1.0), display, (0, 0)).is_none());
}

#[test]
fn test_fit_scale() {
    // Limited by height
    assert_eq!(fit_scale((100, 200), egui::vec2(400.0, 200.0)), 1.0);
    // Small images are zoomed but capped
    assert_eq!(fit_scale((10, 10), egui::vec2(1000.0, 1000.0)), 4.0);
    // Large images shrink
    assert_eq!(fit_scale((1000, 500), egui::vec2(500.0, 500.0)), 0.5);
}

// Small helpers

#[test]
fn test_short_address() {
    let address = "0x1234567890abcdef1234567890abcdef12345678";
    assert_eq!(short_address(address), "0x1234...5678");
    assert_eq!(short_address("0xabc"), "0xabc");
}

#[test]
fn test_export_file_name() {
    assert_eq!(export_file_name("edit-20260101-120000-3.png", "image/png"), "edit-20260101-120000-3.png");
    assert_eq!(export_file_name("photo.JPG", "image/jpeg"), "photo.jpg");
    assert_eq!(export_file_name("cutout", "image/webp"), "cutout.webp");
}

#[test]
fn test_settings_validation() {
    let mut state = SettingsDialogState::default();
    assert!(state.validation_error().is_none());

    state.minting.contract_address = "not-an-address".to_string();
    assert!(state.validation_error().is_some());

    state.minting.contract_address = format!("0x{}", "a1".repeat(20));
    assert!(state.validation_error().is_none());

    state.image_service.model = " ".to_string();
    assert!(state.validation_error().is_some());
}
