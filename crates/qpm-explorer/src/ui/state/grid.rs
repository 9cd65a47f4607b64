//! Selection state of the file grid.

use ratatui::widgets::TableState;

use crate::domain::view::{ExplorerView, FileNode};

/// Table selection tied to the directory it was made in.
#[derive(Debug, Default)]
pub struct GridState {
    pub table_state: TableState,
    path: Option<String>,
}

impl GridState {
    /// Reconciles the selection with a freshly committed snapshot.
    ///
    /// Entering another directory selects its first entry; staying in the same
    /// directory keeps the selection, clamped to the new item count.
    pub fn sync(&mut self, view: &ExplorerView) {
        let item_count = view.items.len();
        if self.path.as_deref() != Some(view.current_path.as_str()) {
            self.path = Some(view.current_path.clone());
            self.table_state = TableState::default();
            self.table_state.select((item_count > 0).then_some(0));

            return;
        }

        let selected = match self.table_state.selected() {
            _ if item_count == 0 => None,
            Some(index) => Some(index.min(item_count - 1)),
            None => Some(0),
        };
        self.table_state.select(selected);
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Returns the selected entry of `view`.
    pub fn selected_entry<'a>(&self, view: &'a ExplorerView) -> Option<&'a FileNode> {
        self.table_state
            .selected()
            .and_then(|index| view.items.get(index))
    }

    pub fn select(&mut self, index: usize, item_count: usize) {
        if index < item_count {
            self.table_state.select(Some(index));
        }
    }

    pub fn select_next(&mut self, item_count: usize) {
        if item_count == 0 {
            return;
        }

        let next = self
            .table_state
            .selected()
            .map_or(0, |index| (index + 1).min(item_count - 1));
        self.table_state.select(Some(next));
    }

    pub fn select_previous(&mut self, item_count: usize) {
        if item_count == 0 {
            return;
        }

        let previous = self
            .table_state
            .selected()
            .map_or(0, |index| index.saturating_sub(1));
        self.table_state.select(Some(previous));
    }

    /// Returns the index of the first visible row.
    pub fn offset(&self) -> usize {
        self.table_state.offset()
    }
}
