//! Bevy systems for history keyboard shortcuts and navigation requests.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::editing::EditSession;
use crate::error::EditError;

use super::edit_history::EditHistory;
use super::messages::HistoryRequest;

/// System to turn Ctrl+Z / Ctrl+Y / Ctrl+Shift+Z into history requests
pub fn handle_history_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut requests: MessageWriter<HistoryRequest>,
    mut contexts: EguiContexts,
) {
    // Don't steal undo from a focused text field
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);
    let shift = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);

    if !ctrl {
        return;
    }

    let redo_pressed =
        keyboard.just_pressed(KeyCode::KeyY) || (shift && keyboard.just_pressed(KeyCode::KeyZ));

    if redo_pressed {
        requests.write(HistoryRequest::Redo);
    } else if keyboard.just_pressed(KeyCode::KeyZ) {
        requests.write(HistoryRequest::Undo);
    }
}

/// System to apply navigation requests to the history
pub fn apply_history_requests(
    mut events: MessageReader<HistoryRequest>,
    mut history: ResMut<EditHistory>,
    session: Res<EditSession>,
) {
    for request in events.read() {
        match apply_request(&mut history, *request, session.is_busy()) {
            Ok(true) => debug!("Applied {:?}, cursor now {:?}", request, history.cursor()),
            Ok(false) => {}
            Err(EditError::Busy) => warn!("Ignoring {:?} while an edit is in progress", request),
            Err(e) => error!("History request {:?} failed: {}", request, e),
        }
    }
}

/// Apply one request. `Ok(false)` means there was nothing to do.
pub(crate) fn apply_request(
    history: &mut EditHistory,
    request: HistoryRequest,
    busy: bool,
) -> Result<bool, EditError> {
    // An in-flight edit commits onto the entry it started from
    if busy {
        return Err(EditError::Busy);
    }

    let changed = match request {
        HistoryRequest::Seek(index) => {
            let before = history.cursor();
            history.seek(index)?;
            before != history.cursor()
        }
        HistoryRequest::Undo => history.undo(),
        HistoryRequest::Redo => history.redo(),
        HistoryRequest::RevertToOriginal => history.revert_to_original(),
        HistoryRequest::NewSession => {
            let had_entries = !history.is_empty();
            history.reset();
            info!("Started a new editing session");
            had_entries
        }
    };
    Ok(changed)
}
