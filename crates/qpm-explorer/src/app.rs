//! App-layer composition root and shared state container.
//!
//! This module wires the view cache, mutation coordinator and transient UI
//! state, and exposes [`App`] used by runtime mode handlers.

use std::sync::Arc;

use ratatui::layout::Rect;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::error::ExplorerError;
use crate::domain::operation::{OperationKind, PendingOperation};
use crate::domain::view::{ExplorerView, Favorite, FileNode, SystemPath};
use crate::infra::gateway::BackendGateway;
use crate::infra::prompt::{ConfirmRequest, Notice, UserPrompt};
use crate::ui::state::focus::{Pane, PathBarState, SearchState};
use crate::ui::state::grid::GridState;
use crate::ui::state::overlay::OverlayState;

pub mod cache;
pub mod command;
pub mod coordinator;
pub mod prompt;
mod service;
pub mod sidebar;

pub use coordinator::{CommitOutcome, DispatchResult, MutationCoordinator};
pub use prompt::{EventPrompt, PendingConfirm, PromptQueue};
pub use service::AppServices;
pub use sidebar::SidebarState;

/// Internal app events emitted by background workflows.
///
/// Producers should emit events only; state mutation is centralized in
/// [`App::apply_app_events`].
#[derive(Debug)]
pub enum AppEvent {
    /// A coordinator dispatch finished, whether committed or superseded.
    OperationSettled {
        operation: PendingOperation,
        outcome: DispatchResult,
    },
    SystemPathsLoaded(Result<Vec<SystemPath>, ExplorerError>),
    FavoritesLoaded(Result<Vec<Favorite>, ExplorerError>),
    /// A workflow waits for a yes/no answer on `reply`.
    ConfirmRequested {
        reply: oneshot::Sender<bool>,
        request: ConfirmRequest,
    },
    Notice(Notice),
}

/// Client state of the file browser.
pub struct App {
    pub coordinator: MutationCoordinator,
    pub focus: Pane,
    pub grid: GridState,
    /// Latest status line message, cleared by the next key press.
    pub notice: Option<Notice>,
    pub overlay: OverlayState,
    pub path_bar: PathBarState,
    pub prompts: PromptQueue,
    pub search: SearchState,
    pub sidebar: SidebarState,
    /// Frame area of the last draw, used for pointer hit-testing.
    pub viewport: Rect,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    services: AppServices,
}

impl App {
    /// Creates an app whose confirmations and notices are shown by the
    /// terminal runtime.
    pub fn new(gateway: Arc<dyn BackendGateway>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let prompt = Arc::new(EventPrompt::new(event_tx.clone()));

        Self::with_channel(gateway, prompt, event_tx, event_rx)
    }

    /// Creates an app with an explicit prompt implementation.
    pub fn new_with_prompt(gateway: Arc<dyn BackendGateway>, prompt: Arc<dyn UserPrompt>) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Self::with_channel(gateway, prompt, event_tx, event_rx)
    }

    fn with_channel(
        gateway: Arc<dyn BackendGateway>,
        prompt: Arc<dyn UserPrompt>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> Self {
        let coordinator = MutationCoordinator::new(Arc::clone(&gateway), event_tx.clone());

        Self {
            coordinator,
            focus: Pane::default(),
            grid: GridState::default(),
            notice: None,
            overlay: OverlayState::default(),
            path_bar: PathBarState::default(),
            prompts: PromptQueue::default(),
            search: SearchState::default(),
            sidebar: SidebarState::default(),
            viewport: Rect::default(),
            event_rx,
            services: AppServices::new(event_tx, gateway, prompt),
        }
    }

    /// Loads the initial directory and the sidebar locations.
    pub fn start(&self) {
        self.coordinator.refresh();
        sidebar::load_system_paths(&self.services);
        sidebar::load_favorites(&self.services);
    }

    /// Returns the current snapshot, if one was ever received.
    pub fn snapshot(&self) -> Option<Arc<ExplorerView>> {
        self.coordinator.snapshot()
    }

    /// Returns the grid entry under the selection.
    pub fn selected_entry(&self) -> Option<FileNode> {
        let snapshot = self.snapshot()?;

        self.grid.selected_entry(&snapshot).cloned()
    }

    /// Returns whether keystrokes belong to a text field.
    ///
    /// Global shortcuts are ignored while the input dialog, the path bar
    /// editor or the search field is focused.
    pub fn has_text_focus(&self) -> bool {
        self.overlay.is_dialog_open() || self.path_bar.is_editing() || self.search.is_editing()
    }

    /// Reconciles grid selection with the cached snapshot.
    pub fn sync_grid(&mut self) {
        if let Some(snapshot) = self.snapshot() {
            self.grid.sync(&snapshot);
        }
    }

    pub(crate) fn services(&self) -> &AppServices {
        &self.services
    }

    /// Applies one or more queued app events through a single reducer path.
    pub(crate) fn apply_app_events(&mut self, first_event: AppEvent) {
        self.apply_app_event(first_event);
        while let Ok(event) = self.event_rx.try_recv() {
            self.apply_app_event(event);
        }
    }

    /// Processes currently queued app events without waiting.
    pub(crate) fn process_pending_app_events(&mut self) {
        let Ok(first_event) = self.event_rx.try_recv() else {
            return;
        };

        self.apply_app_events(first_event);
    }

    /// Waits for the next internal app event.
    pub(crate) async fn next_app_event(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    fn apply_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::OperationSettled { operation, outcome } => {
                self.apply_settled_operation(&operation, outcome);
            }
            AppEvent::SystemPathsLoaded(Ok(system_paths)) => {
                self.sidebar.set_system_paths(system_paths);
            }
            AppEvent::FavoritesLoaded(Ok(favorites)) => {
                self.sidebar.set_favorites(favorites);
            }
            AppEvent::SystemPathsLoaded(Err(error)) => {
                warn!(%error, "failed to load system paths");
                self.notice = Some(Notice::error(format!(
                    "Failed to load system paths: {error}"
                )));
            }
            AppEvent::FavoritesLoaded(Err(error)) => {
                warn!(%error, "failed to load favorites");
                self.notice = Some(Notice::error(format!("Failed to load favorites: {error}")));
            }
            AppEvent::ConfirmRequested { reply, request } => {
                self.prompts.push(request, reply);
            }
            AppEvent::Notice(notice) => {
                self.notice = Some(notice);
            }
        }
    }

    fn apply_settled_operation(&mut self, operation: &PendingOperation, outcome: DispatchResult) {
        match outcome {
            Ok(CommitOutcome::Committed) => {
                if operation.kind() == OperationKind::Navigate
                    && !self.search.is_editing()
                    && !matches!(operation, PendingOperation::Refresh)
                {
                    self.search.clear();
                }
                self.sync_grid();
            }
            Ok(CommitOutcome::Superseded) => {
                debug!(kind = %operation.kind(), "operation superseded");
            }
            Err(error) => {
                self.services.prompt().notify(Notice::error(format!(
                    "Failed to {}: {error}",
                    operation.failure_verb()
                )));
            }
        }
    }
}
