use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;

/// Handles keys on the prompt surface (`y/n/q`, arrows, `h/l`, `Tab`, `Esc`,
/// `Enter`).
///
/// `No` is highlighted by default, so a stray `Enter` never accepts a
/// destructive action.
pub(crate) fn handle(app: &mut App, key: KeyEvent) {
    let Some(pending) = app.prompts.active_mut() else {
        return;
    };

    match key.code {
        KeyCode::Char(character) if character.eq_ignore_ascii_case(&'y') => {
            app.prompts.answer(true);
        }
        KeyCode::Char(character)
            if character.eq_ignore_ascii_case(&'n') || character.eq_ignore_ascii_case(&'q') =>
        {
            app.prompts.answer(false);
        }
        KeyCode::Esc => app.prompts.answer(false),
        KeyCode::Left | KeyCode::Char('h') => pending.selected_yes = true,
        KeyCode::Right | KeyCode::Char('l') => pending.selected_yes = false,
        KeyCode::Tab | KeyCode::BackTab => pending.selected_yes = !pending.selected_yes,
        KeyCode::Enter => {
            let accepted = pending.selected_yes;
            app.prompts.answer(accepted);
        }
        _ => {}
    }
}
