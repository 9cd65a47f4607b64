//! Keyboard focus targets outside the overlay: panes and text fields.

use crate::domain::input::InputState;

/// Pane receiving navigation keys when no text field is focused.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Pane {
    #[default]
    Grid,
    Sidebar,
}

impl Pane {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::Sidebar,
            Self::Sidebar => Self::Grid,
        }
    }
}

/// Path bar display mode.
///
/// Leaving [`PathBarState::Editing`] without submitting always reverts to the
/// breadcrumbs of the current snapshot; typed text is never kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum PathBarState {
    #[default]
    Breadcrumbs,
    Editing(InputState),
}

impl PathBarState {
    /// Enters edit mode seeded with `current_path`.
    pub fn begin_edit(&mut self, current_path: &str) {
        *self = Self::Editing(InputState::with_text(current_path));
    }

    /// Leaves edit mode, discarding typed text.
    pub fn revert(&mut self) {
        *self = Self::Breadcrumbs;
    }

    /// Leaves edit mode and returns the trimmed path to open.
    ///
    /// Returns `None` when nothing but whitespace was typed.
    pub fn submit(&mut self) -> Option<String> {
        let Self::Editing(input) = self else {
            return None;
        };

        let path = input.trimmed().to_string();
        self.revert();

        (!path.is_empty()).then_some(path)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn input_mut(&mut self) -> Option<&mut InputState> {
        match self {
            Self::Editing(input) => Some(input),
            Self::Breadcrumbs => None,
        }
    }
}

/// Search field lifecycle.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum SearchState {
    #[default]
    Inactive,
    /// The field has focus; every edit re-runs the search.
    Editing(InputState),
    /// Focus left the field but its results stay listed.
    Applied { query: String },
}

impl SearchState {
    pub fn begin(&mut self) {
        let query = match self {
            Self::Applied { query } => query.clone(),
            Self::Inactive | Self::Editing(_) => String::new(),
        };

        *self = Self::Editing(InputState::with_text(query));
    }

    /// Keeps the current results and releases focus.
    pub fn apply(&mut self) {
        let Self::Editing(input) = self else {
            return;
        };

        let query = input.trimmed().to_string();
        *self = if query.is_empty() {
            Self::Inactive
        } else {
            Self::Applied { query }
        };
    }

    pub fn clear(&mut self) {
        *self = Self::Inactive;
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    /// Returns the query currently filtering the view.
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Inactive => None,
            Self::Editing(input) => Some(input.text()),
            Self::Applied { query } => Some(query.as_str()),
        }
    }

    pub fn input_mut(&mut self) -> Option<&mut InputState> {
        match self {
            Self::Editing(input) => Some(input),
            Self::Inactive | Self::Applied { .. } => None,
        }
    }
}
