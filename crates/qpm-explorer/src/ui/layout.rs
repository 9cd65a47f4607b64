//! Screen geometry shared by the renderer and mouse hit-testing.

use ratatui::layout::{Constraint, Layout, Margin, Rect};

use crate::ui::state::overlay::MenuPosition;

/// Height of the bordered path bar, including borders.
pub const PATH_BAR_HEIGHT: u16 = 3;
/// Width of the sidebar column, including borders.
pub const SIDEBAR_WIDTH: u16 = 24;
/// Width of an open context menu, including borders.
pub const CONTEXT_MENU_WIDTH: u16 = 22;
/// Columns taken by the grid's row highlight symbol.
pub const GRID_HIGHLIGHT_WIDTH: u16 = 3;

const DIALOG_HEIGHT: u16 = 3;
const DIALOG_WIDTH_PERCENT: u16 = 50;
const MIN_DIALOG_WIDTH: u16 = 30;
/// Top border plus the header row.
const GRID_HEADER_ROWS: u16 = 2;

/// Regions of one frame.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScreenLayout {
    pub grid: Rect,
    pub path_bar: Rect,
    pub sidebar: Rect,
    pub status_line: Rect,
}

impl ScreenLayout {
    /// Splits `area` into path bar, sidebar, file grid and status line.
    pub fn new(area: Rect) -> Self {
        let [path_bar, body, status_line] = Layout::vertical([
            Constraint::Length(PATH_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);
        let [sidebar, grid] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
                .areas(body);

        Self {
            grid,
            path_bar,
            sidebar,
            status_line,
        }
    }
}

/// Returns the area inside a one-cell border.
pub fn inner(area: Rect) -> Rect {
    area.inner(Margin::new(1, 1))
}

/// Returns the item index rendered on terminal row `row`, given the table's
/// scroll `offset`.
///
/// Returns `None` for the border and header rows.
pub fn grid_row_at(grid: Rect, offset: usize, row: u16) -> Option<usize> {
    let first_row = grid.y.saturating_add(GRID_HEADER_ROWS);
    let last_row = grid.bottom().saturating_sub(1);
    if row < first_row || row >= last_row {
        return None;
    }

    Some(offset + usize::from(row - first_row))
}

/// Returns the anchor cell for a keyboard-opened context menu on item `index`.
pub fn grid_row_anchor(grid: Rect, offset: usize, index: usize) -> MenuPosition {
    let visible_index = u16::try_from(index.saturating_sub(offset)).unwrap_or(u16::MAX);
    let last_row = grid.bottom().saturating_sub(2).max(grid.y);
    let y = grid
        .y
        .saturating_add(GRID_HEADER_ROWS)
        .saturating_add(visible_index)
        .min(last_row);

    MenuPosition {
        x: grid.x.saturating_add(1 + GRID_HIGHLIGHT_WIDTH),
        y,
    }
}

/// Places a context menu with `option_count` entries at `position`, shifted
/// so it stays inside `area`.
pub fn context_menu_area(position: MenuPosition, option_count: usize, area: Rect) -> Rect {
    let width = CONTEXT_MENU_WIDTH.min(area.width);
    let height = u16::try_from(option_count)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height);
    let x = position
        .x
        .min(area.right().saturating_sub(width))
        .max(area.x);
    let y = position
        .y
        .min(area.bottom().saturating_sub(height))
        .max(area.y);

    Rect::new(x, y, width, height)
}

/// Returns the menu entry under (`column`, `row`) inside `menu_area`.
pub fn context_menu_option_at(menu_area: Rect, column: u16, row: u16) -> Option<usize> {
    let entries = inner(menu_area);
    if !entries.contains((column, row).into()) {
        return None;
    }

    Some(usize::from(row - entries.y))
}

/// Centers the single-line input dialog in `area`.
pub fn input_dialog_area(area: Rect) -> Rect {
    let scaled_width = u32::from(area.width) * u32::from(DIALOG_WIDTH_PERCENT) / 100;
    let width = u16::try_from(scaled_width)
        .unwrap_or(u16::MAX)
        .max(MIN_DIALOG_WIDTH)
        .min(area.width);
    let height = DIALOG_HEIGHT.min(area.height);

    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

/// Returns the first visible sidebar entry so that `selected` stays on screen.
pub fn sidebar_offset(selected: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }

    selected.saturating_sub(visible_rows - 1)
}

/// Returns the sidebar entry index rendered on terminal row `row`.
pub fn sidebar_row_at(sidebar: Rect, selected: usize, row: u16) -> Option<usize> {
    let entries = inner(sidebar);
    if row < entries.y || row >= entries.bottom() {
        return None;
    }

    let offset = sidebar_offset(selected, usize::from(entries.height));

    Some(offset + usize::from(row - entries.y))
}
