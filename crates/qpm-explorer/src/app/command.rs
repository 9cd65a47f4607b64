//! User commands shared by keyboard shortcuts and context menu entries.

use tokio::task::JoinHandle;
use tracing::debug;

use crate::app::{App, DispatchResult, sidebar};
use crate::domain::view::FileNode;
use crate::infra::prompt::ConfirmRequest;
use crate::ui::state::focus::Pane;
use crate::ui::state::overlay::{DialogAction, MenuPosition};

/// Path opened by the home command.
pub const HOME_PATH: &str = "/";

/// One user intent, independent of how it was triggered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    /// Opens the selected directory.
    Open,
    Back,
    Up,
    Home,
    Refresh,
    NewFolder,
    NewFile,
    Rename,
    Delete,
    AddFavorite,
    EditPath,
    Search,
    ToggleSidebar,
}

impl App {
    /// Runs `command` against the current selection.
    ///
    /// Ignored while a text field has focus so that typed characters never
    /// trigger shortcuts.
    pub fn execute(&mut self, command: Command) {
        if self.has_text_focus() {
            debug!(?command, "ignoring command while a text field has focus");

            return;
        }

        match command {
            Command::Open => self.open_selected(),
            Command::Back => self.go_back(),
            Command::Up => self.go_up(),
            Command::Home => self.open_path(HOME_PATH),
            Command::Refresh => {
                self.coordinator.refresh();
            }
            Command::NewFolder => {
                self.overlay
                    .open_input_dialog("New Folder", "", DialogAction::CreateFolder);
            }
            Command::NewFile => {
                self.overlay
                    .open_input_dialog("New File", "", DialogAction::CreateFile);
            }
            Command::Rename => self.open_rename_dialog(),
            Command::Delete => {
                self.request_delete();
            }
            Command::AddFavorite => self.add_selected_favorite(),
            Command::EditPath => self.begin_path_edit(),
            Command::Search => self.begin_search(),
            Command::ToggleSidebar => self.focus = self.focus.toggled(),
        }
    }

    /// Opens the context menu for the selected entry at `position`.
    pub fn open_context_menu(&mut self, position: MenuPosition, target: Option<FileNode>) {
        if !self.overlay.open_context_menu(position, target) {
            debug!("context menu refused while the input dialog is open");
        }
    }

    /// Runs the highlighted context menu entry and closes the menu.
    pub fn activate_menu_selection(&mut self) {
        let Some((option, target)) = self.overlay.take_menu_selection() else {
            return;
        };

        if let Some(target) = target
            && let Some(snapshot) = self.snapshot()
            && let Some(index) = snapshot.items.iter().position(|item| *item == target)
        {
            self.grid.select(index, snapshot.items.len());
        }

        self.execute(option.command);
    }

    /// Confirms the input dialog and dispatches its action.
    ///
    /// A blank value keeps the dialog open. The overlay is closed before the
    /// backend call resolves.
    pub fn submit_dialog(&mut self) {
        let Some((action, value)) = self.overlay.submit_dialog() else {
            debug!("ignoring blank dialog submission");

            return;
        };

        let dispatched = match action {
            DialogAction::CreateFolder => self.coordinator.create_folder(&value),
            DialogAction::CreateFile => self.coordinator.create_file(&value),
            DialogAction::Rename { old_name } => self.coordinator.rename_item(&old_name, &value),
        };
        if let Err(error) = dispatched {
            debug!(%error, "dialog submission was not dispatched");
        }
    }

    /// Opens the path typed into the path bar editor.
    ///
    /// Blank input reverts to breadcrumbs without dispatching.
    pub fn submit_path(&mut self) {
        if let Some(path) = self.path_bar.submit() {
            self.open_path(&path);
        }
    }

    /// Re-runs the search with the current field contents.
    pub fn search_edited(&mut self) {
        if let Some(query) = self.search.query() {
            self.coordinator.search(query);
        }
    }

    /// Drops the search filter and reloads the directory.
    pub fn clear_search(&mut self) {
        self.search.clear();
        self.coordinator.refresh();
    }

    /// Opens `path` from the path bar, breadcrumbs or sidebar.
    pub fn open_path(&mut self, path: &str) {
        if let Err(error) = self.coordinator.open_path(path) {
            debug!(%error, "ignoring blank path");
        }
    }

    /// Asks for confirmation and deletes the selected entry.
    ///
    /// Returns the workflow handle, resolving to the dispatch result when the
    /// user accepted.
    pub fn request_delete(&mut self) -> Option<JoinHandle<Option<DispatchResult>>> {
        let entry = self.selected_entry()?;
        let prompt = self.services().prompt();
        let coordinator = self.coordinator.clone();

        Some(tokio::spawn(async move {
            let request = ConfirmRequest::new(
                "Confirm Delete",
                format!("Are you sure you want to delete \"{}\"?", entry.name),
            );
            if !prompt.confirm(request).await {
                return None;
            }

            let handle = coordinator.delete_item(&entry.name).ok()?;

            handle.await.ok()
        }))
    }

    /// Removes the favorite selected in the sidebar after confirmation.
    pub fn remove_selected_favorite(&mut self) {
        let Some(sidebar::SidebarEntry::Favorite(favorite)) = self.sidebar.selected_entry() else {
            return;
        };

        sidebar::remove_favorite(self.services(), favorite.clone());
    }

    /// Opens the location selected in the sidebar.
    pub fn open_sidebar_selection(&mut self) {
        let Some(path) = self
            .sidebar
            .selected_entry()
            .map(|entry| entry.path().to_string())
        else {
            return;
        };

        self.open_path(&path);
    }

    fn open_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        if !entry.is_dir {
            debug!(name = %entry.name, "only directories can be opened");

            return;
        }

        if let Err(error) = self.coordinator.open_folder(&entry.name) {
            debug!(%error, "ignoring open request");
        }
    }

    fn go_back(&mut self) {
        if self.snapshot().is_some_and(|snapshot| snapshot.can_go_back) {
            self.coordinator.go_back();
        }
    }

    fn go_up(&mut self) {
        let Some(snapshot) = self.snapshot() else {
            return;
        };
        if !snapshot.can_go_up {
            return;
        }

        if let Some(parent) = snapshot.parent_path() {
            self.coordinator.go_up(parent);
        }
    }

    fn open_rename_dialog(&mut self) {
        if let Some(entry) = self.selected_entry() {
            self.overlay.open_input_dialog(
                "Rename",
                entry.name.clone(),
                DialogAction::Rename {
                    old_name: entry.name,
                },
            );
        }
    }

    fn add_selected_favorite(&mut self) {
        let Some(snapshot) = self.snapshot() else {
            return;
        };
        let Some(entry) = self.grid.selected_entry(&snapshot) else {
            return;
        };
        if !entry.is_dir {
            return;
        }

        sidebar::add_favorite(
            self.services(),
            snapshot.child_path(&entry.name),
            entry.name.clone(),
        );
    }

    fn begin_path_edit(&mut self) {
        let current_path = self
            .snapshot()
            .map(|snapshot| snapshot.current_path.clone())
            .unwrap_or_default();
        self.focus = Pane::Grid;
        self.path_bar.begin_edit(&current_path);
    }

    fn begin_search(&mut self) {
        self.focus = Pane::Grid;
        self.search.begin();
    }
}
