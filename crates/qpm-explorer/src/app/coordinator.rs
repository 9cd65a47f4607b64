//! Generation-guarded dispatch of navigation and mutation requests.
//!
//! Every dispatch takes the next value of a monotonically increasing
//! generation counter. When the backend answers, the result is committed to
//! the [`ViewCache`] only if no newer dispatch happened in the meantime, so
//! the visible snapshot always belongs to the most recently *dispatched*
//! operation, never to the one that merely finished last. Superseded results
//! are dropped rather than aborted in transit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::AppEvent;
use crate::app::cache::{CachedView, ViewCache};
use crate::domain::error::{ExplorerError, ValidationError};
use crate::domain::operation::PendingOperation;
use crate::domain::view::ExplorerView;
use crate::infra::gateway::{BackendGateway, GatewayError, GatewayFuture};

/// How a settled dispatch affected the cache.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommitOutcome {
    /// The result was the latest dispatch and now drives the view.
    Committed,
    /// A newer dispatch superseded this one; its result was discarded.
    Superseded,
}

/// Result delivered by a dispatch handle.
///
/// `Err` is only produced for failures of the current generation.
pub type DispatchResult = Result<CommitOutcome, ExplorerError>;

/// Sole writer of the [`ViewCache`].
#[derive(Clone)]
pub struct MutationCoordinator {
    cache: Arc<Mutex<ViewCache>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    gateway: Arc<dyn BackendGateway>,
    generation: Arc<AtomicU64>,
}

impl MutationCoordinator {
    /// Creates a coordinator with an empty cache.
    pub fn new(
        gateway: Arc<dyn BackendGateway>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            cache: Arc::new(Mutex::new(ViewCache::new())),
            event_tx,
            gateway,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns a read-only copy of the cache.
    pub fn view(&self) -> CachedView {
        self.lock_cache().get()
    }

    /// Returns the current snapshot, if one was ever received.
    pub fn snapshot(&self) -> Option<Arc<ExplorerView>> {
        self.lock_cache().snapshot()
    }

    /// Returns the generation of the most recent dispatch.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Re-reads the current directory.
    pub fn refresh(&self) -> JoinHandle<DispatchResult> {
        self.dispatch(PendingOperation::Refresh)
    }

    /// Steps back through the backend-owned history.
    pub fn go_back(&self) -> JoinHandle<DispatchResult> {
        self.dispatch(PendingOperation::GoBack)
    }

    /// Opens `parent`, the parent directory of the current snapshot.
    pub fn go_up(&self, parent: String) -> JoinHandle<DispatchResult> {
        self.dispatch(PendingOperation::GoUp { parent })
    }

    /// Opens `name` inside the current directory.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for a blank name without calling the
    /// backend.
    pub fn open_folder(&self, name: &str) -> Result<JoinHandle<DispatchResult>, ValidationError> {
        Ok(self.dispatch(PendingOperation::open_folder(name)?))
    }

    /// Opens an absolute `path`.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for a blank path.
    pub fn open_path(&self, path: &str) -> Result<JoinHandle<DispatchResult>, ValidationError> {
        Ok(self.dispatch(PendingOperation::open_path(path)?))
    }

    /// Creates a directory in the current directory.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for a blank name.
    pub fn create_folder(&self, name: &str) -> Result<JoinHandle<DispatchResult>, ValidationError> {
        Ok(self.dispatch(PendingOperation::create_folder(name)?))
    }

    /// Creates an empty file in the current directory.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for a blank name.
    pub fn create_file(&self, name: &str) -> Result<JoinHandle<DispatchResult>, ValidationError> {
        Ok(self.dispatch(PendingOperation::create_file(name)?))
    }

    /// Deletes `name` from the current directory.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for a blank name.
    pub fn delete_item(&self, name: &str) -> Result<JoinHandle<DispatchResult>, ValidationError> {
        Ok(self.dispatch(PendingOperation::delete(name)?))
    }

    /// Renames `old_name` to `new_name`.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for a blank or unchanged new name.
    pub fn rename_item(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> Result<JoinHandle<DispatchResult>, ValidationError> {
        Ok(self.dispatch(PendingOperation::rename(old_name, new_name)?))
    }

    /// Filters the current directory by `query`; an empty query lists all.
    pub fn search(&self, query: &str) -> JoinHandle<DispatchResult> {
        self.dispatch(PendingOperation::search(query))
    }

    /// Starts one gateway call for `operation` and commits its result when it
    /// is still the latest dispatch.
    ///
    /// The gateway call is made before spawning, and gateways issue a request
    /// when called, so the backend receives calls in dispatch order. Only the
    /// wait for completion runs on a spawned task.
    /// Once settled, an [`AppEvent::OperationSettled`] is emitted.
    pub fn dispatch(&self, operation: PendingOperation) -> JoinHandle<DispatchResult> {
        let generation = {
            let mut cache = self.lock_cache();
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            cache.mark_loading();

            generation
        };
        info!(
            generation,
            kind = %operation.kind(),
            targets = ?operation.targets(),
            "dispatching explorer operation"
        );

        let call = call_gateway(self.gateway.as_ref(), &operation);
        let coordinator = self.clone();

        tokio::spawn(async move {
            let result = call.await;
            let outcome = coordinator.commit(generation, result);
            let _ = coordinator
                .event_tx
                .send(AppEvent::OperationSettled {
                    operation,
                    outcome: outcome.clone(),
                });

            outcome
        })
    }

    /// Applies a settled result under the cache lock.
    fn commit(
        &self,
        generation: u64,
        result: Result<ExplorerView, GatewayError>,
    ) -> DispatchResult {
        let mut cache = self.lock_cache();
        let is_current = self.generation.load(Ordering::SeqCst) == generation;

        match (result, is_current) {
            (Ok(view), true) => {
                debug!(generation, path = %view.current_path, "committing snapshot");
                cache.replace(view);

                Ok(CommitOutcome::Committed)
            }
            (Err(error), true) => {
                let error = ExplorerError::from(error);
                warn!(generation, %error, "explorer operation failed");
                cache.mark_error(error.clone());

                Err(error)
            }
            (Ok(_), false) => {
                debug!(generation, "discarding superseded snapshot");

                Ok(CommitOutcome::Superseded)
            }
            (Err(error), false) => {
                debug!(generation, %error, "discarding superseded failure");

                Ok(CommitOutcome::Superseded)
            }
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, ViewCache> {
        self.cache
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Maps one operation onto its backend command.
fn call_gateway(
    gateway: &dyn BackendGateway,
    operation: &PendingOperation,
) -> GatewayFuture<Result<ExplorerView, GatewayError>> {
    match operation.clone() {
        PendingOperation::Refresh => gateway.get_current_view(),
        PendingOperation::OpenFolder { name } => gateway.open_folder(name),
        PendingOperation::OpenPath { path } | PendingOperation::GoUp { parent: path } => {
            gateway.open_folder(path)
        }
        PendingOperation::GoBack => gateway.go_back(),
        PendingOperation::CreateFolder { name } => gateway.create_folder(name),
        PendingOperation::CreateFile { name } => gateway.create_file(name),
        PendingOperation::Delete { name } => gateway.delete_item(name),
        PendingOperation::Rename { old_name, new_name } => {
            gateway.rename_item(old_name, new_name)
        }
        PendingOperation::Search { query } => gateway.search_files(query),
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use tokio::sync::oneshot;

    use super::*;
    use crate::app::cache::ViewStatus;
    use crate::domain::error::{BackendError, TransportError};
    use crate::domain::view::FileNode;
    use crate::infra::gateway::MockBackendGateway;

    fn view(path: &str, names: &[&str]) -> ExplorerView {
        ExplorerView {
            current_path: path.to_string(),
            items: names
                .iter()
                .map(|name| FileNode {
                    name: (*name).to_string(),
                    is_dir: false,
                    size: 1,
                })
                .collect(),
            can_go_back: true,
            can_go_forward: false,
            can_go_up: true,
        }
    }

    fn coordinator(
        gateway: MockBackendGateway,
    ) -> (MutationCoordinator, mpsc::UnboundedReceiver<AppEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        (MutationCoordinator::new(Arc::new(gateway), event_tx), event_rx)
    }

    fn current_path(coordinator: &MutationCoordinator) -> Option<String> {
        coordinator
            .snapshot()
            .map(|snapshot| snapshot.current_path.clone())
    }

    #[tokio::test]
    async fn test_refresh_commits_snapshot() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway
            .expect_get_current_view()
            .times(1)
            .returning(|| Box::pin(async { Ok(view("/home", &["a.txt"])) }));
        let (coordinator, mut event_rx) = coordinator(gateway);

        // Act
        let outcome = coordinator.refresh().await.expect("dispatch task panicked");

        // Assert
        assert_eq!(outcome, Ok(CommitOutcome::Committed));
        assert_eq!(current_path(&coordinator), Some("/home".to_string()));
        assert_eq!(coordinator.view().status, ViewStatus::Idle);
        assert!(matches!(
            event_rx.try_recv(),
            Ok(AppEvent::OperationSettled {
                operation: PendingOperation::Refresh,
                outcome: Ok(CommitOutcome::Committed),
            })
        ));
    }

    #[tokio::test]
    async fn test_latest_dispatch_wins_when_earlier_call_finishes_last() {
        // Arrange
        let (a_tx, a_rx) = oneshot::channel::<ExplorerView>();
        let (b_tx, b_rx) = oneshot::channel::<ExplorerView>();
        let mut gateway = MockBackendGateway::new();
        gateway
            .expect_open_folder()
            .with(eq("a".to_string()))
            .times(1)
            .return_once(move |_| {
                Box::pin(async move {
                    a_rx.await
                        .map_err(|_| GatewayError::from(TransportError::Io("dropped".to_string())))
                })
            });
        gateway
            .expect_open_folder()
            .with(eq("b".to_string()))
            .times(1)
            .return_once(move |_| {
                Box::pin(async move {
                    b_rx.await
                        .map_err(|_| GatewayError::from(TransportError::Io("dropped".to_string())))
                })
            });
        let (coordinator, _event_rx) = coordinator(gateway);

        // Act
        let first = coordinator.open_folder("a").expect("valid name");
        let second = coordinator.open_folder("b").expect("valid name");
        b_tx.send(view("/b", &["from-b"])).expect("receiver dropped");
        let second_outcome = second.await.expect("dispatch task panicked");
        a_tx.send(view("/a", &["from-a"])).expect("receiver dropped");
        let first_outcome = first.await.expect("dispatch task panicked");

        // Assert
        assert_eq!(second_outcome, Ok(CommitOutcome::Committed));
        assert_eq!(first_outcome, Ok(CommitOutcome::Superseded));
        assert_eq!(current_path(&coordinator), Some("/b".to_string()));
        assert_eq!(coordinator.view().status, ViewStatus::Idle);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_previous_snapshot_and_marks_error() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway
            .expect_get_current_view()
            .times(1)
            .returning(|| Box::pin(async { Ok(view("/home", &["a.txt"])) }));
        gateway
            .expect_delete_item()
            .with(eq("missing.txt".to_string()))
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Err(GatewayError::from(BackendError {
                        code: 2,
                        message: "No such file or directory (os error 2)".to_string(),
                    }))
                })
            });
        let (coordinator, _event_rx) = coordinator(gateway);
        coordinator.refresh().await.expect("dispatch task panicked").expect("refresh failed");
        let before = coordinator.snapshot();

        // Act
        let outcome = coordinator
            .delete_item("missing.txt")
            .expect("valid name")
            .await
            .expect("dispatch task panicked");

        // Assert
        assert!(matches!(outcome, Err(ExplorerError::Backend(_))));
        assert_eq!(coordinator.snapshot(), before);
        assert!(matches!(
            coordinator.view().status,
            ViewStatus::Error(ExplorerError::Backend(BackendError { code: 2, .. }))
        ));
    }

    #[tokio::test]
    async fn test_superseded_failure_is_swallowed() {
        // Arrange
        let (slow_tx, slow_rx) = oneshot::channel::<()>();
        let mut gateway = MockBackendGateway::new();
        gateway.expect_go_back().times(1).return_once(move || {
            Box::pin(async move {
                let _ = slow_rx.await;

                Err(GatewayError::from(TransportError::Io("broken pipe".to_string())))
            })
        });
        gateway
            .expect_get_current_view()
            .times(1)
            .returning(|| Box::pin(async { Ok(view("/fresh", &[])) }));
        let (coordinator, _event_rx) = coordinator(gateway);

        // Act
        let stale = coordinator.go_back();
        let fresh = coordinator.refresh().await.expect("dispatch task panicked");
        slow_tx.send(()).expect("receiver dropped");
        let stale = stale.await.expect("dispatch task panicked");

        // Assert
        assert_eq!(fresh, Ok(CommitOutcome::Committed));
        assert_eq!(stale, Ok(CommitOutcome::Superseded));
        assert_eq!(coordinator.view().status, ViewStatus::Idle);
        assert_eq!(current_path(&coordinator), Some("/fresh".to_string()));
    }

    #[tokio::test]
    async fn test_first_load_failure_leaves_cache_empty() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway.expect_get_current_view().times(1).returning(|| {
            Box::pin(async {
                Err(GatewayError::from(TransportError::Unavailable(
                    "backend has exited".to_string(),
                )))
            })
        });
        let (coordinator, _event_rx) = coordinator(gateway);

        // Act
        let outcome = coordinator.refresh().await.expect("dispatch task panicked");

        // Assert
        assert!(matches!(outcome, Err(ExplorerError::Transport(_))));
        assert!(coordinator.snapshot().is_none());
        assert!(coordinator.view().error().is_some());
    }

    #[tokio::test]
    async fn test_repeated_refresh_takes_new_generation_each_time() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway
            .expect_get_current_view()
            .times(2)
            .returning(|| Box::pin(async { Ok(view("/home", &[])) }));
        let (coordinator, _event_rx) = coordinator(gateway);

        // Act
        let first = coordinator.refresh();
        let second = coordinator.refresh();
        let first = first.await.expect("dispatch task panicked");
        let second = second.await.expect("dispatch task panicked");

        // Assert
        assert_eq!(coordinator.current_generation(), 2);
        assert_eq!(first, Ok(CommitOutcome::Superseded));
        assert_eq!(second, Ok(CommitOutcome::Committed));
    }

    #[tokio::test]
    async fn test_dispatch_marks_loading_until_settled() {
        // Arrange
        let (release_tx, release_rx) = oneshot::channel::<()>();
        let mut gateway = MockBackendGateway::new();
        gateway.expect_go_back().times(1).return_once(move || {
            Box::pin(async move {
                let _ = release_rx.await;

                Ok(view("/", &[]))
            })
        });
        let (coordinator, _event_rx) = coordinator(gateway);

        // Act
        let handle = coordinator.go_back();
        let loading = coordinator.view().is_loading();
        release_tx.send(()).expect("receiver dropped");
        handle.await.expect("dispatch task panicked").expect("go back failed");

        // Assert
        assert!(loading);
        assert!(!coordinator.view().is_loading());
    }

    #[tokio::test]
    async fn test_go_up_and_rename_use_matching_backend_commands() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway
            .expect_open_folder()
            .with(eq("/home".to_string()))
            .times(1)
            .returning(|_| Box::pin(async { Ok(view("/home", &[])) }));
        gateway
            .expect_rename_item()
            .with(eq("a.txt".to_string()), eq("b.txt".to_string()))
            .times(1)
            .returning(|_, _| Box::pin(async { Ok(view("/home", &["b.txt"])) }));
        let (coordinator, _event_rx) = coordinator(gateway);

        // Act
        coordinator
            .go_up("/home".to_string())
            .await
            .expect("dispatch task panicked")
            .expect("go up failed");
        coordinator
            .rename_item("a.txt", "b.txt")
            .expect("valid rename")
            .await
            .expect("dispatch task panicked")
            .expect("rename failed");

        // Assert
        let snapshot = coordinator.snapshot().expect("missing snapshot");
        assert!(snapshot.entry("b.txt").is_some());
    }
}
