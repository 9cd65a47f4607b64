//! Transient overlay state: context menu or input dialog, never both.

use crate::app::command::Command;
use crate::domain::input::InputState;
use crate::domain::view::FileNode;

/// Terminal cell where a context menu was requested.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MenuPosition {
    pub x: u16,
    pub y: u16,
}

/// One selectable context menu entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MenuOption {
    pub command: Command,
    pub label: &'static str,
}

/// Open context menu anchored at a pointer position.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContextMenuState {
    pub position: MenuPosition,
    pub selected: usize,
    /// Entry the menu acts on, `None` for the directory background.
    pub target: Option<FileNode>,
}

impl ContextMenuState {
    /// Returns the entries offered for the current target.
    pub fn options(&self) -> Vec<MenuOption> {
        menu_options(self.target.as_ref())
    }

    /// Returns the highlighted entry.
    pub fn selected_option(&self) -> Option<MenuOption> {
        self.options().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let option_count = self.options().len();
        if option_count > 0 {
            self.selected = (self.selected + 1) % option_count;
        }
    }

    pub fn select_previous(&mut self) {
        let option_count = self.options().len();
        if option_count > 0 {
            self.selected = (self.selected + option_count - 1) % option_count;
        }
    }
}

/// What a confirmed input dialog triggers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DialogAction {
    CreateFolder,
    CreateFile,
    Rename { old_name: String },
}

/// Open single-line text prompt.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputDialogState {
    pub action: DialogAction,
    pub input: InputState,
    pub title: String,
}

/// Exactly one of: nothing open, a context menu, or an input dialog.
///
/// Transitions:
/// - `Closed -> ContextMenu -> Closed`
/// - `Closed | ContextMenu -> InputDialog -> Closed`
///
/// An open input dialog is modal, so a context menu request is refused while
/// one is showing. Submitting a dialog closes the overlay before the triggered
/// backend call resolves.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum OverlayState {
    #[default]
    Closed,
    ContextMenu(ContextMenuState),
    InputDialog(InputDialogState),
}

impl OverlayState {
    /// Opens (or repositions) a context menu.
    ///
    /// Returns `false` when an input dialog is open and the request is
    /// refused.
    pub fn open_context_menu(&mut self, position: MenuPosition, target: Option<FileNode>) -> bool {
        if matches!(self, Self::InputDialog(_)) {
            return false;
        }

        *self = Self::ContextMenu(ContextMenuState {
            position,
            selected: 0,
            target,
        });

        true
    }

    /// Opens an input dialog, replacing any open context menu.
    pub fn open_input_dialog(
        &mut self,
        title: impl Into<String>,
        default_value: impl Into<String>,
        action: DialogAction,
    ) {
        *self = Self::InputDialog(InputDialogState {
            action,
            input: InputState::with_text(default_value),
            title: title.into(),
        });
    }

    /// Returns to [`OverlayState::Closed`].
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Returns whether an overlay is showing.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Returns whether the input dialog owns keyboard focus.
    pub fn is_dialog_open(&self) -> bool {
        matches!(self, Self::InputDialog(_))
    }

    /// Confirms the open input dialog.
    ///
    /// Returns the action and trimmed value and closes the overlay. Returns
    /// `None` and keeps the dialog open when the trimmed value is empty or no
    /// dialog is open.
    pub fn submit_dialog(&mut self) -> Option<(DialogAction, String)> {
        let Self::InputDialog(dialog) = self else {
            return None;
        };

        let value = dialog.input.trimmed().to_string();
        if value.is_empty() {
            return None;
        }

        let action = dialog.action.clone();
        self.close();

        Some((action, value))
    }

    /// Closes the open context menu and returns its target and highlighted
    /// entry.
    pub fn take_menu_selection(&mut self) -> Option<(MenuOption, Option<FileNode>)> {
        let Self::ContextMenu(menu) = self else {
            return None;
        };

        let option = menu.selected_option()?;
        let target = menu.target.take();
        self.close();

        Some((option, target))
    }
}

/// Builds the context menu entries for `target`.
///
/// Entries offer `Open` and `Add to Favorites` only for directories.
pub fn menu_options(target: Option<&FileNode>) -> Vec<MenuOption> {
    let Some(target) = target else {
        return vec![
            MenuOption {
                command: Command::NewFolder,
                label: "New Folder",
            },
            MenuOption {
                command: Command::NewFile,
                label: "New File",
            },
            MenuOption {
                command: Command::Refresh,
                label: "Refresh",
            },
        ];
    };

    let mut options = Vec::with_capacity(4);
    if target.is_dir {
        options.push(MenuOption {
            command: Command::Open,
            label: "Open",
        });
    }
    options.push(MenuOption {
        command: Command::Rename,
        label: "Rename",
    });
    options.push(MenuOption {
        command: Command::Delete,
        label: "Delete",
    });
    if target.is_dir {
        options.push(MenuOption {
            command: Command::AddFavorite,
            label: "Add to Favorites",
        });
    }

    options
}
