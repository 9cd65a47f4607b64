//! Typed call boundary to the external explorer backend.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::domain::error::{BackendError, ExplorerError, TransportError};
use crate::domain::view::{ExplorerView, Favorite, SystemPath};

/// Wire names of the backend commands.
pub mod command {
    pub const GET_CURRENT_VIEW: &str = "get_current_view";
    pub const OPEN_FOLDER: &str = "open_folder";
    pub const GO_BACK: &str = "go_back";
    pub const DELETE_ITEM: &str = "delete_item";
    pub const CREATE_FOLDER: &str = "create_folder";
    pub const CREATE_FILE: &str = "create_file";
    pub const RENAME_ITEM: &str = "rename_item";
    pub const SEARCH_FILES: &str = "search_files";
    pub const GET_SYSTEM_PATHS: &str = "get_system_paths";
    pub const GET_ALL_FAVORITES: &str = "get_all_favorites";
    pub const ADD_FAVORITE: &str = "add_new_favorite";
    pub const REMOVE_FAVORITE: &str = "remove_existing_favorite";
}

/// Boxed async result used by [`BackendGateway`] trait methods.
pub type GatewayFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Failure of a single gateway call.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GatewayError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<GatewayError> for ExplorerError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Backend(error) => Self::Backend(error),
            GatewayError::Transport(error) => Self::Transport(error),
        }
    }
}

/// One method per backend command.
///
/// Navigation and mutation commands resolve to a complete [`ExplorerView`].
/// Implementations never retry: a failed call surfaces immediately. A request
/// is issued when its method is called, not when the returned future is first
/// polled, so calls reach the backend in call order. Production
/// uses [`crate::infra::rpc::RpcGateway`], while tests inject
/// `MockBackendGateway`.
#[cfg_attr(test, mockall::automock)]
pub trait BackendGateway: Send + Sync {
    /// Reads the directory the backend currently points at.
    fn get_current_view(&self) -> GatewayFuture<Result<ExplorerView, GatewayError>>;

    /// Opens `name`, a child of the current directory or an absolute path.
    fn open_folder(&self, name: String) -> GatewayFuture<Result<ExplorerView, GatewayError>>;

    /// Steps back using the backend-owned navigation state.
    fn go_back(&self) -> GatewayFuture<Result<ExplorerView, GatewayError>>;

    /// Deletes the entry `name` from the current directory.
    fn delete_item(&self, name: String) -> GatewayFuture<Result<ExplorerView, GatewayError>>;

    /// Creates a directory `name` in the current directory.
    fn create_folder(&self, name: String) -> GatewayFuture<Result<ExplorerView, GatewayError>>;

    /// Creates an empty file `name` in the current directory.
    fn create_file(&self, name: String) -> GatewayFuture<Result<ExplorerView, GatewayError>>;

    /// Renames `old_name` to `new_name` in the current directory.
    fn rename_item(
        &self,
        old_name: String,
        new_name: String,
    ) -> GatewayFuture<Result<ExplorerView, GatewayError>>;

    /// Filters the current directory by `query`.
    fn search_files(&self, query: String) -> GatewayFuture<Result<ExplorerView, GatewayError>>;

    /// Lists well-known OS locations.
    fn get_system_paths(&self) -> GatewayFuture<Result<Vec<SystemPath>, GatewayError>>;

    /// Lists persisted favorites.
    fn get_all_favorites(&self) -> GatewayFuture<Result<Vec<Favorite>, GatewayError>>;

    /// Persists a new favorite.
    fn add_favorite(
        &self,
        path: String,
        label: String,
        icon: String,
    ) -> GatewayFuture<Result<(), GatewayError>>;

    /// Removes the favorite with backend identity `id`.
    fn remove_favorite(&self, id: i64) -> GatewayFuture<Result<(), GatewayError>>;
}
