use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::app::command::Command;
use crate::runtime::EventResult;
use crate::runtime::mode::browse::{command_for_key, is_quit_key};
use crate::ui::state::focus::Pane;

/// Handles key input while the sidebar has focus.
///
/// Selection-dependent grid commands (open, rename, delete) are not
/// forwarded; directory-level shortcuts still work.
pub(crate) fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    if is_quit_key(key) {
        return EventResult::Quit;
    }

    let is_plain = !key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('j') | KeyCode::Down if is_plain => app.sidebar.select_next(),
        KeyCode::Char('k') | KeyCode::Up if is_plain => app.sidebar.select_previous(),
        KeyCode::Enter => {
            app.open_sidebar_selection();
            app.focus = Pane::Grid;
        }
        KeyCode::Char('x') if is_plain => app.remove_selected_favorite(),
        KeyCode::Esc => app.focus = Pane::Grid,
        _ => {
            if let Some(command) = command_for_key(key)
                && is_directory_command(command)
            {
                app.execute(command);
            }
        }
    }

    EventResult::Continue
}

fn is_directory_command(command: Command) -> bool {
    matches!(
        command,
        Command::Back
            | Command::Up
            | Command::Home
            | Command::Refresh
            | Command::NewFolder
            | Command::NewFile
            | Command::EditPath
            | Command::Search
            | Command::ToggleSidebar
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use super::*;
    use crate::app::AppEvent;
    use crate::domain::view::{ExplorerView, Favorite, SystemPath};
    use crate::infra::gateway::MockBackendGateway;

    fn view() -> ExplorerView {
        ExplorerView {
            current_path: "/".to_string(),
            items: Vec::new(),
            can_go_back: false,
            can_go_forward: false,
            can_go_up: false,
        }
    }

    fn app_with_sidebar(gateway: MockBackendGateway) -> App {
        let mut app = App::new(Arc::new(gateway));
        app.apply_app_events(AppEvent::SystemPathsLoaded(Ok(vec![SystemPath {
            label: "Home".to_string(),
            path: "/home/user".to_string(),
            icon: "home".to_string(),
        }])));
        app.apply_app_events(AppEvent::FavoritesLoaded(Ok(vec![Favorite {
            id: 7,
            path: "/srv/projects".to_string(),
            label: "projects".to_string(),
            icon: "folder".to_string(),
        }])));
        app.focus = Pane::Sidebar;

        app
    }

    #[tokio::test]
    async fn test_enter_opens_selected_location_and_returns_focus() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway
            .expect_open_folder()
            .with(eq("/srv/projects".to_string()))
            .times(1)
            .returning(|_| Box::pin(async { Ok(view()) }));
        let mut app = app_with_sidebar(gateway);
        handle(&mut app, KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE));

        // Act
        handle(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        // Assert
        assert_eq!(app.focus, Pane::Grid);
    }

    #[test]
    fn test_x_on_system_path_does_nothing() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway.expect_remove_favorite().never();
        let mut app = app_with_sidebar(gateway);

        // Act
        handle(&mut app, KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));

        // Assert
        assert!(!app.prompts.is_active());
    }

    #[test]
    fn test_delete_key_is_not_forwarded_to_grid() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway.expect_delete_item().never();
        let mut app = app_with_sidebar(gateway);

        // Act
        let result = handle(&mut app, KeyEvent::new(KeyCode::Char('d'), KeyModifiers::NONE));

        // Assert
        assert_eq!(result, EventResult::Continue);
        assert_eq!(app.focus, Pane::Sidebar);
    }

    #[test]
    fn test_tab_returns_focus_to_grid() {
        // Arrange
        let mut app = app_with_sidebar(MockBackendGateway::new());

        // Act
        handle(&mut app, KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));

        // Assert
        assert_eq!(app.focus, Pane::Grid);
    }
}
