//! Shared app dependency container for background workflows.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::AppEvent;
use crate::infra::gateway::BackendGateway;
use crate::infra::prompt::UserPrompt;

/// Shared app dependencies used by spawned workflows.
#[derive(Clone)]
pub struct AppServices {
    event_tx: mpsc::UnboundedSender<AppEvent>,
    gateway: Arc<dyn BackendGateway>,
    prompt: Arc<dyn UserPrompt>,
}

impl AppServices {
    pub(crate) fn new(
        event_tx: mpsc::UnboundedSender<AppEvent>,
        gateway: Arc<dyn BackendGateway>,
        prompt: Arc<dyn UserPrompt>,
    ) -> Self {
        Self {
            event_tx,
            gateway,
            prompt,
        }
    }

    /// Enqueues an app event onto the internal event bus.
    pub(crate) fn emit_app_event(&self, event: AppEvent) {
        let _ = self.event_tx.send(event);
    }

    /// Returns the shared backend gateway.
    pub(crate) fn gateway(&self) -> Arc<dyn BackendGateway> {
        Arc::clone(&self.gateway)
    }

    /// Returns the confirm/notify capability.
    pub(crate) fn prompt(&self) -> Arc<dyn UserPrompt> {
        Arc::clone(&self.prompt)
    }
}
