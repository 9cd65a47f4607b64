use crossterm::event::{KeyCode, KeyEvent};

use crate::app::App;
use crate::ui::state::overlay::OverlayState;

/// Handles key input while a context menu is open.
pub(crate) fn handle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
            if let OverlayState::ContextMenu(menu) = &mut app.overlay {
                menu.select_next();
            }
        }
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => {
            if let OverlayState::ContextMenu(menu) = &mut app.overlay {
                menu.select_previous();
            }
        }
        KeyCode::Enter => app.activate_menu_selection(),
        KeyCode::Esc | KeyCode::Char('q' | 'm') => app.overlay.close(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::infra::gateway::MockBackendGateway;
    use crate::ui::state::overlay::{DialogAction, InputDialogState, MenuPosition};

    #[test]
    fn test_enter_on_background_menu_opens_new_folder_dialog() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway.expect_create_folder().never();
        let mut app = crate::app::App::new(Arc::new(gateway));
        app.open_context_menu(MenuPosition::default(), None);

        // Act
        handle(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        // Assert
        assert!(matches!(
            &app.overlay,
            OverlayState::InputDialog(InputDialogState {
                action: DialogAction::CreateFolder,
                ..
            })
        ));
    }

    #[test]
    fn test_escape_closes_menu() {
        // Arrange
        let mut app = crate::app::App::new(Arc::new(MockBackendGateway::new()));
        app.open_context_menu(MenuPosition::default(), None);

        // Act
        handle(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));

        // Assert
        assert_eq!(app.overlay, OverlayState::Closed);
    }

    #[test]
    fn test_down_moves_highlight() {
        // Arrange
        let mut app = crate::app::App::new(Arc::new(MockBackendGateway::new()));
        app.open_context_menu(MenuPosition::default(), None);

        // Act
        handle(&mut app, KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));

        // Assert
        assert!(matches!(&app.overlay, OverlayState::ContextMenu(menu) if menu.selected == 1));
    }
}
