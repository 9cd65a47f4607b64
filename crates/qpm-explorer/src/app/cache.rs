//! Single-slot cache of the latest directory snapshot.

use std::sync::Arc;

use crate::domain::error::ExplorerError;
use crate::domain::view::ExplorerView;

/// Request status of the cached view.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ViewStatus {
    #[default]
    Idle,
    Loading,
    Error(ExplorerError),
}

/// Read-only copy of the cache contents handed to renderers.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CachedView {
    pub snapshot: Option<Arc<ExplorerView>>,
    pub status: ViewStatus,
}

impl CachedView {
    /// Returns whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.status, ViewStatus::Loading)
    }

    /// Returns the last failure, if the latest request failed.
    pub fn error(&self) -> Option<&ExplorerError> {
        match &self.status {
            ViewStatus::Error(error) => Some(error),
            ViewStatus::Idle | ViewStatus::Loading => None,
        }
    }
}

/// Holds the last good snapshot and the status of the latest request.
///
/// Status transitions never touch the snapshot: a failed refresh keeps the
/// previous snapshot visible and only reports the failure through
/// [`ViewStatus::Error`]. [`ViewCache::replace`] is the only way snapshot
/// content changes.
#[derive(Debug, Default)]
pub struct ViewCache {
    snapshot: Option<Arc<ExplorerView>>,
    status: ViewStatus,
}

impl ViewCache {
    /// Creates an empty cache with no snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot and status.
    pub fn get(&self) -> CachedView {
        CachedView {
            snapshot: self.snapshot.clone(),
            status: self.status.clone(),
        }
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Option<Arc<ExplorerView>> {
        self.snapshot.clone()
    }

    /// Returns the current status.
    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Swaps in `snapshot` and marks the cache idle.
    pub fn replace(&mut self, snapshot: ExplorerView) {
        self.snapshot = Some(Arc::new(snapshot));
        self.status = ViewStatus::Idle;
    }

    /// Marks a request as in flight.
    pub fn mark_loading(&mut self) {
        self.status = ViewStatus::Loading;
    }

    /// Records a failed request, keeping the last good snapshot.
    pub fn mark_error(&mut self, error: ExplorerError) {
        self.status = ViewStatus::Error(error);
    }
}
