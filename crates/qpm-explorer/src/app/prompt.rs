//! Terminal implementation of [`UserPrompt`] routed through the app event bus.

use std::collections::VecDeque;

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::app::AppEvent;
use crate::infra::prompt::{ConfirmRequest, Notice, PromptFuture, UserPrompt};

/// Prompt that asks the event loop to show confirmations and notices.
///
/// A confirmation whose reply channel is dropped resolves to `false`.
pub struct EventPrompt {
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventPrompt {
    pub(crate) fn new(event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { event_tx }
    }
}

impl UserPrompt for EventPrompt {
    fn confirm(&self, request: ConfirmRequest) -> PromptFuture<bool> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let sent = self
            .event_tx
            .send(AppEvent::ConfirmRequested {
                reply: reply_tx,
                request,
            })
            .is_ok();

        Box::pin(async move {
            if !sent {
                debug!("confirmation requested after the event loop stopped");

                return false;
            }

            reply_rx.await.unwrap_or(false)
        })
    }

    fn notify(&self, notice: Notice) {
        let _ = self.event_tx.send(AppEvent::Notice(notice));
    }
}

/// Confirmation waiting for a yes/no answer on the prompt surface.
#[derive(Debug)]
pub struct PendingConfirm {
    pub request: ConfirmRequest,
    pub selected_yes: bool,
    reply: oneshot::Sender<bool>,
}

/// FIFO of confirmations; only the front one is shown.
#[derive(Debug, Default)]
pub struct PromptQueue {
    pending: VecDeque<PendingConfirm>,
}

impl PromptQueue {
    pub fn push(&mut self, request: ConfirmRequest, reply: oneshot::Sender<bool>) {
        self.pending.push_back(PendingConfirm {
            request,
            selected_yes: false,
            reply,
        });
    }

    /// Returns the confirmation currently shown.
    pub fn active(&self) -> Option<&PendingConfirm> {
        self.pending.front()
    }

    pub fn active_mut(&mut self) -> Option<&mut PendingConfirm> {
        self.pending.front_mut()
    }

    pub fn is_active(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Answers the shown confirmation and advances to the next one.
    pub fn answer(&mut self, accepted: bool) {
        if let Some(pending) = self.pending.pop_front() {
            let _ = pending.reply.send(accepted);
        }
    }
}
