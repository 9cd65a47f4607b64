use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::app::command::Command;
use crate::runtime::EventResult;
use crate::ui::layout;
use crate::ui::state::focus::SearchState;

/// Handles key input while the file grid has focus.
pub(crate) fn handle(app: &mut App, key: KeyEvent) -> EventResult {
    if is_quit_key(key) {
        return EventResult::Quit;
    }

    let item_count = app.snapshot().map_or(0, |snapshot| snapshot.items.len());

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let Some(command) = command_for_key(key) {
            app.execute(command);
        }

        return EventResult::Continue;
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.grid.select_next(item_count),
        KeyCode::Char('k') | KeyCode::Up => app.grid.select_previous(item_count),
        KeyCode::Char('m') => open_menu_for_selection(app),
        KeyCode::Esc if matches!(app.search, SearchState::Applied { .. }) => app.clear_search(),
        _ => {
            if let Some(command) = command_for_key(key) {
                app.execute(command);
            }
        }
    }

    EventResult::Continue
}

/// Maps a key to its global shortcut.
///
/// Crossterm reports `Ctrl+Shift+N` either as an uppercase `N` or as `n` with
/// the shift modifier, so both spellings open the new-folder dialog.
pub(crate) fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('N') => Some(Command::NewFolder),
            KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(Command::NewFolder)
            }
            KeyCode::Char('n') => Some(Command::NewFile),
            KeyCode::Char('r') => Some(Command::Refresh),
            KeyCode::Char('l') => Some(Command::EditPath),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Some(Command::Open),
        KeyCode::Backspace => Some(Command::Back),
        KeyCode::Char('u') => Some(Command::Up),
        KeyCode::Char('H') => Some(Command::Home),
        KeyCode::F(5) => Some(Command::Refresh),
        KeyCode::Char('d') | KeyCode::Delete => Some(Command::Delete),
        KeyCode::Char('r') | KeyCode::F(2) => Some(Command::Rename),
        KeyCode::Char('/') => Some(Command::Search),
        KeyCode::Tab => Some(Command::ToggleSidebar),
        _ => None,
    }
}

/// Returns whether `key` exits the app (`q` or `Ctrl+C`).
pub(crate) fn is_quit_key(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') => !key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Opens the context menu next to the selected row.
fn open_menu_for_selection(app: &mut App) {
    let screen = layout::ScreenLayout::new(app.viewport);
    let position = layout::grid_row_anchor(
        screen.grid,
        app.grid.offset(),
        app.grid.selected().unwrap_or_default(),
    );
    let target = app.selected_entry();

    app.open_context_menu(position, target);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use super::*;
    use crate::domain::view::{ExplorerView, FileNode};
    use crate::infra::gateway::MockBackendGateway;
    use crate::ui::state::overlay::{ContextMenuState, OverlayState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view() -> ExplorerView {
        ExplorerView {
            current_path: "/srv".to_string(),
            items: vec![
                FileNode {
                    name: "data".to_string(),
                    is_dir: true,
                    size: 0,
                },
                FileNode {
                    name: "readme".to_string(),
                    is_dir: false,
                    size: 7,
                },
            ],
            can_go_back: true,
            can_go_forward: false,
            can_go_up: true,
        }
    }

    async fn app_with_view(mut gateway: MockBackendGateway) -> App {
        gateway
            .expect_get_current_view()
            .times(1..)
            .returning(|| Box::pin(async { Ok(view()) }));
        let mut app = App::new(Arc::new(gateway));
        let _ = app.coordinator.refresh().await;
        app.process_pending_app_events();

        app
    }

    #[test]
    fn test_command_for_key_maps_ctrl_shift_n_spellings() {
        // Arrange
        let upper = KeyEvent::new(
            KeyCode::Char('N'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        let lower = KeyEvent::new(
            KeyCode::Char('n'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );

        // Act / Assert
        assert_eq!(command_for_key(upper), Some(Command::NewFolder));
        assert_eq!(command_for_key(lower), Some(Command::NewFolder));
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            Some(Command::NewFile)
        );
    }

    #[test]
    fn test_command_for_key_maps_refresh_keys() {
        // Arrange / Act / Assert
        assert_eq!(command_for_key(key(KeyCode::F(5))), Some(Command::Refresh));
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Command::Refresh)
        );
        assert_eq!(command_for_key(key(KeyCode::Char('r'))), Some(Command::Rename));
    }

    #[test]
    fn test_is_quit_key() {
        // Arrange / Act / Assert
        assert!(is_quit_key(key(KeyCode::Char('q'))));
        assert!(is_quit_key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!is_quit_key(key(KeyCode::Char('c'))));
    }

    #[tokio::test]
    async fn test_enter_opens_selected_directory() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway
            .expect_open_folder()
            .with(eq("data".to_string()))
            .times(1)
            .returning(|_| Box::pin(async { Ok(view()) }));
        let mut app = app_with_view(gateway).await;

        // Act
        let result = handle(&mut app, key(KeyCode::Enter));

        // Assert
        assert_eq!(result, EventResult::Continue);
        assert_eq!(app.coordinator.current_generation(), 2);
    }

    #[tokio::test]
    async fn test_m_opens_context_menu_for_selection() {
        // Arrange
        let mut app = app_with_view(MockBackendGateway::new()).await;
        app.viewport = ratatui::layout::Rect::new(0, 0, 100, 30);
        handle(&mut app, key(KeyCode::Down));

        // Act
        handle(&mut app, key(KeyCode::Char('m')));

        // Assert
        assert!(matches!(
            &app.overlay,
            OverlayState::ContextMenu(ContextMenuState {
                target: Some(FileNode { name, .. }),
                ..
            }) if name == "readme"
        ));
    }

    #[tokio::test]
    async fn test_escape_clears_applied_search_and_refreshes() {
        // Arrange
        let mut app = app_with_view(MockBackendGateway::new()).await;
        app.search = SearchState::Applied {
            query: "read".to_string(),
        };

        // Act
        handle(&mut app, key(KeyCode::Esc));

        // Assert
        assert_eq!(app.search, SearchState::Inactive);
        assert_eq!(app.coordinator.current_generation(), 2);
    }

    #[tokio::test]
    async fn test_q_quits() {
        // Arrange
        let mut app = app_with_view(MockBackendGateway::new()).await;

        // Act
        let result = handle(&mut app, key(KeyCode::Char('q')));

        // Assert
        assert_eq!(result, EventResult::Quit);
    }
}
