//! Host-provided modal prompts used by app workflows.

use std::future::Future;
use std::pin::Pin;

/// Boxed async result used by [`UserPrompt`] trait methods.
pub type PromptFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Yes/no question shown before destructive actions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfirmRequest {
    pub question: String,
    pub title: String,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            title: title.into(),
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line message surfaced to the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Modal confirm and notification capability.
///
/// Text entry is served by the input dialog overlay rather than this trait,
/// so workflows only ever ask for confirmation or report an outcome.
#[cfg_attr(test, mockall::automock)]
pub trait UserPrompt: Send + Sync {
    /// Resolves to `true` only when the user explicitly accepts.
    fn confirm(&self, request: ConfirmRequest) -> PromptFuture<bool>;

    /// Shows `notice` without waiting for acknowledgement.
    fn notify(&self, notice: Notice);
}
