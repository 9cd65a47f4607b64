use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::runtime::mode::text_input;
use crate::ui::state::overlay::OverlayState;

/// Handles key input while the input dialog is open.
///
/// Every key except `Enter` and `Esc` edits the field.
pub(crate) fn handle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_dialog(),
        KeyCode::Esc => app.overlay.close(),
        _ => {
            if let OverlayState::InputDialog(dialog) = &mut app.overlay {
                text_input::edit(&mut dialog.input, key);
            }
        }
    }
}
