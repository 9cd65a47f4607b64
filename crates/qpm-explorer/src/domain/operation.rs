//! Navigation and mutation intents dispatched through the coordinator.
//!
//! Constructors validate name arguments so that an empty or unchanged name is
//! rejected before any backend call is made.

use std::fmt;

use crate::domain::error::ValidationError;

/// Broad category of a [`PendingOperation`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationKind {
    Navigate,
    CreateFolder,
    CreateFile,
    Delete,
    Rename,
    Search,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Navigate => "navigate",
            Self::CreateFolder => "create-folder",
            Self::CreateFile => "create-file",
            Self::Delete => "delete",
            Self::Rename => "rename",
            Self::Search => "search",
        };

        f.write_str(label)
    }
}

/// One request that replaces the current snapshot when it succeeds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PendingOperation {
    /// Re-reads the current directory.
    Refresh,
    /// Opens a child directory of the current snapshot.
    OpenFolder { name: String },
    /// Opens an absolute (or backend-resolved) path.
    OpenPath { path: String },
    /// Asks the backend to step back.
    GoBack,
    /// Opens the parent directory of the current snapshot.
    GoUp { parent: String },
    CreateFolder { name: String },
    CreateFile { name: String },
    Delete { name: String },
    Rename { old_name: String, new_name: String },
    /// Filters the current directory; an empty query lists everything.
    Search { query: String },
}

impl PendingOperation {
    /// Builds an open-folder request for a child entry.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] when `name` is blank.
    pub fn open_folder(name: &str) -> Result<Self, ValidationError> {
        Ok(Self::OpenFolder {
            name: required(name, "folder name")?,
        })
    }

    /// Builds a navigation request for a typed or clicked path.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] when `path` is blank.
    pub fn open_path(path: &str) -> Result<Self, ValidationError> {
        Ok(Self::OpenPath {
            path: required(path, "path")?,
        })
    }

    /// Builds a create-folder request.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] when `name` is blank.
    pub fn create_folder(name: &str) -> Result<Self, ValidationError> {
        Ok(Self::CreateFolder {
            name: required(name, "folder name")?,
        })
    }

    /// Builds a create-file request.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] when `name` is blank.
    pub fn create_file(name: &str) -> Result<Self, ValidationError> {
        Ok(Self::CreateFile {
            name: required(name, "file name")?,
        })
    }

    /// Builds a delete request.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] when `name` is blank.
    pub fn delete(name: &str) -> Result<Self, ValidationError> {
        Ok(Self::Delete {
            name: required(name, "item name")?,
        })
    }

    /// Builds a rename request.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyName`] when either name is blank and
    /// [`ValidationError::UnchangedName`] when the new name equals the old
    /// one.
    pub fn rename(old_name: &str, new_name: &str) -> Result<Self, ValidationError> {
        let old_name = required(old_name, "current name")?;
        let new_name = required(new_name, "new name")?;
        if old_name == new_name {
            return Err(ValidationError::UnchangedName { name: old_name });
        }

        Ok(Self::Rename { old_name, new_name })
    }

    /// Builds a search request. Surrounding whitespace is dropped.
    pub fn search(query: &str) -> Self {
        Self::Search {
            query: query.trim().to_string(),
        }
    }

    /// Returns the operation category.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Refresh
            | Self::OpenFolder { .. }
            | Self::OpenPath { .. }
            | Self::GoBack
            | Self::GoUp { .. } => OperationKind::Navigate,
            Self::CreateFolder { .. } => OperationKind::CreateFolder,
            Self::CreateFile { .. } => OperationKind::CreateFile,
            Self::Delete { .. } => OperationKind::Delete,
            Self::Rename { .. } => OperationKind::Rename,
            Self::Search { .. } => OperationKind::Search,
        }
    }

    /// Returns the names or paths this operation targets.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Self::Refresh | Self::GoBack => Vec::new(),
            Self::OpenFolder { name }
            | Self::CreateFolder { name }
            | Self::CreateFile { name }
            | Self::Delete { name } => vec![name.as_str()],
            Self::OpenPath { path } => vec![path.as_str()],
            Self::GoUp { parent } => vec![parent.as_str()],
            Self::Rename { old_name, new_name } => vec![old_name.as_str(), new_name.as_str()],
            Self::Search { query } => vec![query.as_str()],
        }
    }

    /// Returns the verb phrase used in failure notices (`Failed to <verb>`).
    pub fn failure_verb(&self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::OpenFolder { .. } | Self::OpenPath { .. } => "open folder",
            Self::GoBack => "go back",
            Self::GoUp { .. } => "go up",
            Self::CreateFolder { .. } => "create folder",
            Self::CreateFile { .. } => "create file",
            Self::Delete { .. } => "delete",
            Self::Rename { .. } => "rename",
            Self::Search { .. } => "search",
        }
    }
}

/// Trims `value` and rejects it when nothing is left.
fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName { field });
    }

    Ok(trimmed.to_string())
}
