use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;
use tracing::debug;

use crate::app::App;
use crate::app::command::Command;
use crate::ui::components::path_bar;
use crate::ui::layout::{self, ScreenLayout};
use crate::ui::state::focus::Pane;
use crate::ui::state::overlay::{MenuPosition, OverlayState};

/// Routes a pointer event using the geometry of the last drawn frame.
///
/// A pending prompt owns all input, so pointer events are ignored until it is
/// answered.
pub(crate) fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    if app.prompts.is_active() {
        return;
    }

    let screen = ScreenLayout::new(app.viewport);
    let position = Position::new(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_left_click(app, &screen, position),
        MouseEventKind::Down(MouseButton::Right) => handle_right_click(app, &screen, position),
        MouseEventKind::ScrollDown => scroll(app, true),
        MouseEventKind::ScrollUp => scroll(app, false),
        _ => {}
    }
}

fn handle_left_click(app: &mut App, screen: &ScreenLayout, position: Position) {
    match &mut app.overlay {
        OverlayState::ContextMenu(menu) => {
            let options = menu.options();
            let menu_area = layout::context_menu_area(menu.position, options.len(), app.viewport);
            match layout::context_menu_option_at(menu_area, position.x, position.y) {
                Some(index) if index < options.len() => {
                    menu.selected = index;
                    app.activate_menu_selection();
                }
                _ => app.overlay.close(),
            }

            return;
        }
        OverlayState::InputDialog(_) => {
            if !layout::input_dialog_area(app.viewport).contains(position) {
                debug!("input dialog dismissed by a click outside");
                app.overlay.close();
            }

            return;
        }
        OverlayState::Closed => {}
    }

    if !blur_text_fields(app, screen, position) {
        return;
    }

    if screen.grid.contains(position) {
        select_grid_row(app, screen, position);
    } else if screen.path_bar.contains(position) {
        click_path_bar(app, screen, position);
    } else if screen.sidebar.contains(position) {
        click_sidebar(app, screen, position);
    }
}

/// Opens a context menu for the row under the pointer, or for the directory
/// background when no row is hit.
fn handle_right_click(app: &mut App, screen: &ScreenLayout, position: Position) {
    if app.overlay.is_dialog_open() {
        if !layout::input_dialog_area(app.viewport).contains(position) {
            debug!("input dialog dismissed by a right click outside");
            app.overlay.close();
        }

        return;
    }
    if !screen.grid.contains(position) {
        if let OverlayState::ContextMenu(_) = app.overlay {
            app.overlay.close();
        }

        return;
    }

    blur_text_fields(app, screen, position);
    let mut target = None;
    if let Some(index) = row_index_at(app, screen, position)
        && let Some(snapshot) = app.snapshot()
    {
        app.grid.select(index, snapshot.items.len());
        target = snapshot.items.get(index).cloned();
    }
    app.focus = Pane::Grid;
    app.open_context_menu(
        MenuPosition {
            x: position.x,
            y: position.y,
        },
        target,
    );
}

/// Leaves path-bar edit mode or the search field when the pointer lands
/// outside them.
///
/// Returns whether the click should still be handled by the region under it.
fn blur_text_fields(app: &mut App, screen: &ScreenLayout, position: Position) -> bool {
    if app.path_bar.is_editing() {
        if screen.path_bar.contains(position) {
            return false;
        }

        app.path_bar.revert();
    }

    if app.search.is_editing() {
        if screen.status_line.contains(position) {
            return false;
        }

        app.search.apply();
    }

    true
}

fn row_index_at(app: &App, screen: &ScreenLayout, position: Position) -> Option<usize> {
    let index = layout::grid_row_at(screen.grid, app.grid.offset(), position.y)?;
    let item_count = app.snapshot().map_or(0, |snapshot| snapshot.items.len());

    (index < item_count).then_some(index)
}

fn select_grid_row(app: &mut App, screen: &ScreenLayout, position: Position) {
    app.focus = Pane::Grid;

    if let Some(index) = row_index_at(app, screen, position)
        && let Some(snapshot) = app.snapshot()
    {
        app.grid.select(index, snapshot.items.len());
    }
}

/// Opens the breadcrumb under the pointer; anywhere else on the bar starts
/// editing the path.
fn click_path_bar(app: &mut App, screen: &ScreenLayout, position: Position) {
    let breadcrumb = app
        .snapshot()
        .and_then(|snapshot| path_bar::breadcrumb_at(&snapshot, screen.path_bar, position.x));

    match breadcrumb {
        Some(path) if position.y == layout::inner(screen.path_bar).y => app.open_path(&path),
        _ => app.execute(Command::EditPath),
    }
}

fn click_sidebar(app: &mut App, screen: &ScreenLayout, position: Position) {
    let Some(index) = layout::sidebar_row_at(screen.sidebar, app.sidebar.selected, position.y)
    else {
        return;
    };
    if index >= app.sidebar.len() {
        return;
    }

    app.focus = Pane::Sidebar;
    app.sidebar.selected = index;
    app.open_sidebar_selection();
}

fn scroll(app: &mut App, down: bool) {
    if app.overlay.is_open() || app.has_text_focus() {
        return;
    }

    let item_count = app.snapshot().map_or(0, |snapshot| snapshot.items.len());
    if down {
        app.grid.select_next(item_count);
    } else {
        app.grid.select_previous(item_count);
    }
}
