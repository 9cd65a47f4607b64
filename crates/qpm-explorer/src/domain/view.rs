//! Backend-owned view and reference-data shapes.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// One file or directory inside a directory snapshot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FileNode {
    pub name: String,
    pub is_dir: bool,
    /// Byte size; only meaningful when `is_dir` is `false`.
    #[serde(default)]
    pub size: u64,
}

impl FileNode {
    /// Returns a human-readable size label, empty for directories.
    pub fn size_label(&self) -> String {
        if self.is_dir {
            return String::new();
        }

        format_size(self.size)
    }
}

/// Authoritative snapshot of the directory the user currently sees.
///
/// Snapshots are never edited in place. A newer snapshot always replaces the
/// previous one wholesale.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ExplorerView {
    pub current_path: String,
    pub items: Vec<FileNode>,
    #[serde(default)]
    pub can_go_back: bool,
    #[serde(default)]
    pub can_go_forward: bool,
    #[serde(default)]
    pub can_go_up: bool,
}

impl ExplorerView {
    /// Returns the entry named `name`, if present.
    pub fn entry(&self, name: &str) -> Option<&FileNode> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Returns the parent directory of `current_path`.
    ///
    /// Returns `None` at the filesystem root.
    pub fn parent_path(&self) -> Option<String> {
        Path::new(&self.current_path)
            .parent()
            .map(|parent| parent.to_string_lossy().to_string())
    }

    /// Returns the absolute path of the child entry `name`.
    pub fn child_path(&self, name: &str) -> String {
        Path::new(&self.current_path)
            .join(name)
            .to_string_lossy()
            .to_string()
    }

    /// Splits `current_path` into breadcrumb segments.
    ///
    /// Each segment pairs the display label with the absolute path it
    /// navigates to.
    pub fn breadcrumbs(&self) -> Vec<(String, String)> {
        let parts: Vec<&str> = self
            .current_path
            .split('/')
            .filter(|part| !part.is_empty())
            .collect();

        parts
            .iter()
            .enumerate()
            .map(|(index, part)| ((*part).to_string(), format!("/{}", parts[..=index].join("/"))))
            .collect()
    }
}

/// Well-known OS location shown in the sidebar.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SystemPath {
    pub label: String,
    pub path: String,
    pub icon: String,
}

/// User-pinned location persisted by the backend.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Favorite {
    /// Backend identity used for removal.
    pub id: i64,
    pub path: String,
    pub label: String,
    pub icon: String,
}

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary-scaled units (`1.5 KB`).
pub fn format_size(size: u64) -> String {
    if size < 1024 {
        return format!("{size} B");
    }

    #[allow(clippy::cast_precision_loss)]
    let mut value = size as f64;
    let mut unit_index = 0;
    while value >= 1024.0 && unit_index < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit_index += 1;
    }

    format!("{value:.1} {}", SIZE_UNITS[unit_index])
}
