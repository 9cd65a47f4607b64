use crossterm::event::KeyEvent;

use crate::app::App;
use crate::runtime::{EventResult, mode};
use crate::ui::state::focus::Pane;
use crate::ui::state::overlay::OverlayState;

/// Routes a key press to the surface that currently owns the keyboard.
///
/// Precedence: prompt surface, input dialog, context menu, path bar editor,
/// search field, then the focused pane. Text fields consume every key, so
/// global shortcuts never fire while one is focused.
pub(crate) fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    app.notice = None;

    if app.prompts.is_active() {
        mode::confirmation::handle(app, key);

        return EventResult::Continue;
    }

    match app.overlay {
        OverlayState::InputDialog(_) => {
            mode::input_dialog::handle(app, key);

            return EventResult::Continue;
        }
        OverlayState::ContextMenu(_) => {
            mode::context_menu::handle(app, key);

            return EventResult::Continue;
        }
        OverlayState::Closed => {}
    }

    if app.path_bar.is_editing() {
        mode::path_bar::handle(app, key);

        return EventResult::Continue;
    }

    if app.search.is_editing() {
        mode::search::handle(app, key);

        return EventResult::Continue;
    }

    match app.focus {
        Pane::Grid => mode::browse::handle(app, key),
        Pane::Sidebar => mode::sidebar::handle(app, key),
    }
}

/// Inserts pasted text into whichever text field has focus.
pub(crate) fn handle_paste(app: &mut App, text: &str) {
    if let OverlayState::InputDialog(dialog) = &mut app.overlay {
        dialog.input.insert_text(text);
    } else if let Some(input) = app.path_bar.input_mut() {
        input.insert_text(text);
    } else if let Some(input) = app.search.input_mut() {
        input.insert_text(text);
        app.search_edited();
    }
}
