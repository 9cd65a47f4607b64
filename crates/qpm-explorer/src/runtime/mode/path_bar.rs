use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::runtime::mode::text_input;

/// Handles key input while the path bar is in edit mode.
pub(crate) fn handle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_path(),
        KeyCode::Esc => app.path_bar.revert(),
        _ => {
            if let Some(input) = app.path_bar.input_mut() {
                text_input::edit(input, key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::infra::gateway::MockBackendGateway;
    use crate::ui::state::focus::PathBarState;

    #[test]
    fn test_escape_reverts_without_dispatch() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway.expect_open_folder().never();
        let mut app = App::new(Arc::new(gateway));
        app.path_bar.begin_edit("/home");
        handle(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));

        // Act
        handle(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));

        // Assert
        assert_eq!(app.path_bar, PathBarState::Breadcrumbs);
        assert_eq!(app.coordinator.current_generation(), 0);
    }

    #[test]
    fn test_blank_submission_reverts_without_dispatch() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway.expect_open_folder().never();
        let mut app = App::new(Arc::new(gateway));
        app.path_bar.begin_edit(" ");

        // Act
        handle(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        // Assert
        assert!(!app.path_bar.is_editing());
        assert_eq!(app.coordinator.current_generation(), 0);
    }
}
