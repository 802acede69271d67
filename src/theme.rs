//! Centralized color theme for the application.
//!
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

/// Window clear color behind the egui panels
pub const WINDOW_BACKGROUND: Color = Color::srgb(0.09, 0.09, 0.11);

// ============================================================================
// UI Colors (egui)
// ============================================================================

/// Dark backdrop behind the canvas image
pub const CANVAS_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(30, 30, 34);

/// Crosshair marking the selected edit point
pub const HOTSPOT_MARKER: egui::Color32 = egui::Color32::from_rgb(255, 200, 40);

/// Red for error messages
pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(235, 90, 90);

/// Green for successful mints and the connected wallet indicator
pub const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);

/// Grey for help/hint text
pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

/// Highlight for the original (first) history entry
pub const ORIGINAL_ENTRY: egui::Color32 = egui::Color32::from_rgb(120, 170, 230);
