use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::runtime::mode::text_input;

/// Handles key input while the search field has focus.
///
/// Each edit re-runs the search; `Enter` keeps the results and `Esc` drops
/// the filter and reloads the directory.
pub(crate) fn handle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.search.apply(),
        KeyCode::Esc => app.clear_search(),
        _ => {
            let changed = app
                .search
                .input_mut()
                .is_some_and(|input| text_input::edit(input, key));
            if changed {
                app.search_edited();
            }
        }
    }
}
