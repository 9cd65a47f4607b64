//! Sidebar data (system locations and favorites) and its workflows.

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::app::AppEvent;
use crate::app::service::AppServices;
use crate::domain::error::ExplorerError;
use crate::domain::view::{Favorite, SystemPath};
use crate::infra::prompt::{ConfirmRequest, Notice};

/// Icon name stored with favorites created from the grid.
pub const FAVORITE_ICON: &str = "folder";

/// One selectable sidebar row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SidebarEntry<'a> {
    System(&'a SystemPath),
    Favorite(&'a Favorite),
}

impl SidebarEntry<'_> {
    pub fn path(&self) -> &str {
        match self {
            Self::System(system_path) => &system_path.path,
            Self::Favorite(favorite) => &favorite.path,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::System(system_path) => &system_path.label,
            Self::Favorite(favorite) => &favorite.label,
        }
    }
}

/// Locations listed in the sidebar, system paths first.
#[derive(Debug, Default)]
pub struct SidebarState {
    pub favorites: Vec<Favorite>,
    pub selected: usize,
    pub system_paths: Vec<SystemPath>,
}

impl SidebarState {
    pub fn set_system_paths(&mut self, system_paths: Vec<SystemPath>) {
        self.system_paths = system_paths;
        self.clamp_selection();
    }

    pub fn set_favorites(&mut self, favorites: Vec<Favorite>) {
        self.favorites = favorites;
        self.clamp_selection();
    }

    pub fn len(&self) -> usize {
        self.system_paths.len() + self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the row at `index`, counting system paths first.
    pub fn entry(&self, index: usize) -> Option<SidebarEntry<'_>> {
        if let Some(system_path) = self.system_paths.get(index) {
            return Some(SidebarEntry::System(system_path));
        }

        self.favorites
            .get(index - self.system_paths.len())
            .map(SidebarEntry::Favorite)
    }

    pub fn selected_entry(&self) -> Option<SidebarEntry<'_>> {
        self.entry(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.len().saturating_sub(1));
    }
}

/// Loads system paths in the background and reports them as an app event.
pub(crate) fn load_system_paths(services: &AppServices) -> JoinHandle<()> {
    let call = services.gateway().get_system_paths();
    let services = services.clone();

    tokio::spawn(async move {
        let result = call.await.map_err(ExplorerError::from);
        services.emit_app_event(AppEvent::SystemPathsLoaded(result));
    })
}

/// Loads favorites in the background and reports them as an app event.
pub(crate) fn load_favorites(services: &AppServices) -> JoinHandle<()> {
    let call = services.gateway().get_all_favorites();
    let services = services.clone();

    tokio::spawn(async move {
        let result = call.await.map_err(ExplorerError::from);
        services.emit_app_event(AppEvent::FavoritesLoaded(result));
    })
}

/// Persists a favorite for `path`, then reloads the favorites list.
pub(crate) fn add_favorite(services: &AppServices, path: String, label: String) -> JoinHandle<()> {
    let call = services
        .gateway()
        .add_favorite(path.clone(), label.clone(), FAVORITE_ICON.to_string());
    let services = services.clone();

    tokio::spawn(async move {
        match call.await {
            Ok(()) => {
                info!(%path, "added favorite");
                services
                    .prompt()
                    .notify(Notice::info(format!("Added \"{label}\" to favorites")));
                let _ = load_favorites(&services).await;
            }
            Err(error) => {
                let error = ExplorerError::from(error);
                warn!(%path, %error, "failed to add favorite");
                services
                    .prompt()
                    .notify(Notice::error(format!("Failed to add favorite: {error}")));
            }
        }
    })
}

/// Asks for confirmation, removes `favorite`, then reloads the favorites
/// list.
pub(crate) fn remove_favorite(services: &AppServices, favorite: Favorite) -> JoinHandle<()> {
    let services = services.clone();

    tokio::spawn(async move {
        let request = ConfirmRequest::new(
            "Remove Favorite",
            format!("Remove \"{}\" from favorites?", favorite.label),
        );
        if !services.prompt().confirm(request).await {
            return;
        }

        match services.gateway().remove_favorite(favorite.id).await {
            Ok(()) => {
                info!(id = favorite.id, "removed favorite");
                let _ = load_favorites(&services).await;
            }
            Err(error) => {
                let error = ExplorerError::from(error);
                warn!(id = favorite.id, %error, "failed to remove favorite");
                services
                    .prompt()
                    .notify(Notice::error(format!("Failed to remove favorite: {error}")));
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;
    use tokio::sync::mpsc;

    use super::*;
    use crate::domain::error::BackendError;
    use crate::infra::gateway::{GatewayError, MockBackendGateway};
    use crate::infra::prompt::{MockUserPrompt, NoticeKind};

    fn favorite(id: i64, label: &str) -> Favorite {
        Favorite {
            id,
            path: format!("/home/user/{label}"),
            label: label.to_string(),
            icon: FAVORITE_ICON.to_string(),
        }
    }

    fn system_path(label: &str) -> SystemPath {
        SystemPath {
            label: label.to_string(),
            path: format!("/{label}"),
            icon: "home".to_string(),
        }
    }

    fn services(
        gateway: MockBackendGateway,
        prompt: MockUserPrompt,
    ) -> (AppServices, mpsc::UnboundedReceiver<AppEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        (
            AppServices::new(event_tx, Arc::new(gateway), Arc::new(prompt)),
            event_rx,
        )
    }

    #[test]
    fn test_entry_lists_system_paths_before_favorites() {
        // Arrange
        let mut sidebar = SidebarState::default();
        sidebar.set_system_paths(vec![system_path("home")]);
        sidebar.set_favorites(vec![favorite(4, "docs")]);

        // Act
        let first = sidebar.entry(0);
        let second = sidebar.entry(1);
        let third = sidebar.entry(2);

        // Assert
        assert!(matches!(first, Some(SidebarEntry::System(_))));
        assert!(matches!(
            second,
            Some(SidebarEntry::Favorite(Favorite { id: 4, .. }))
        ));
        assert_eq!(third, None);
    }

    #[test]
    fn test_set_favorites_clamps_selection() {
        // Arrange
        let mut sidebar = SidebarState::default();
        sidebar.set_favorites(vec![favorite(1, "a"), favorite(2, "b")]);
        sidebar.select_next();

        // Act
        sidebar.set_favorites(vec![favorite(1, "a")]);

        // Assert
        assert_eq!(sidebar.selected, 0);
        assert_eq!(
            sidebar.selected_entry().map(|entry| entry.label().to_string()),
            Some("a".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_favorite_notifies_and_reloads() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway
            .expect_add_favorite()
            .with(
                eq("/home/user/docs".to_string()),
                eq("docs".to_string()),
                eq(FAVORITE_ICON.to_string()),
            )
            .times(1)
            .returning(|_, _, _| Box::pin(async { Ok(()) }));
        gateway
            .expect_get_all_favorites()
            .times(1)
            .returning(|| Box::pin(async { Ok(vec![favorite(9, "docs")]) }));
        let mut prompt = MockUserPrompt::new();
        prompt
            .expect_notify()
            .withf(|notice| notice.kind == NoticeKind::Info && notice.message.contains("docs"))
            .times(1)
            .return_const(());
        let (services, mut event_rx) = services(gateway, prompt);

        // Act
        add_favorite(&services, "/home/user/docs".to_string(), "docs".to_string())
            .await
            .expect("workflow panicked");

        // Assert
        assert!(matches!(
            event_rx.try_recv(),
            Ok(AppEvent::FavoritesLoaded(Ok(favorites))) if favorites.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_add_favorite_failure_notifies_error() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway.expect_add_favorite().times(1).returning(|_, _, _| {
            Box::pin(async { Err(GatewayError::from(BackendError::new("database is locked"))) })
        });
        gateway.expect_get_all_favorites().never();
        let mut prompt = MockUserPrompt::new();
        prompt
            .expect_notify()
            .withf(|notice| {
                notice.kind == NoticeKind::Error
                    && notice.message == "Failed to add favorite: database is locked"
            })
            .times(1)
            .return_const(());
        let (services, _event_rx) = services(gateway, prompt);

        // Act / Assert
        add_favorite(&services, "/tmp".to_string(), "tmp".to_string())
            .await
            .expect("workflow panicked");
    }

    #[tokio::test]
    async fn test_remove_favorite_skips_backend_when_declined() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway.expect_remove_favorite().never();
        let mut prompt = MockUserPrompt::new();
        prompt
            .expect_confirm()
            .times(1)
            .returning(|_| Box::pin(async { false }));
        let (services, mut event_rx) = services(gateway, prompt);

        // Act
        remove_favorite(&services, favorite(3, "music"))
            .await
            .expect("workflow panicked");

        // Assert
        assert!(event_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_remove_favorite_removes_by_id_after_confirm() {
        // Arrange
        let mut gateway = MockBackendGateway::new();
        gateway
            .expect_remove_favorite()
            .with(eq(3))
            .times(1)
            .returning(|_| Box::pin(async { Ok(()) }));
        gateway
            .expect_get_all_favorites()
            .times(1)
            .returning(|| Box::pin(async { Ok(Vec::new()) }));
        let mut prompt = MockUserPrompt::new();
        prompt
            .expect_confirm()
            .withf(|request| request.question == "Remove \"music\" from favorites?")
            .times(1)
            .returning(|_| Box::pin(async { true }));
        let (services, mut event_rx) = services(gateway, prompt);

        // Act
        remove_favorite(&services, favorite(3, "music"))
            .await
            .expect("workflow panicked");

        // Assert
        assert!(matches!(
            event_rx.try_recv(),
            Ok(AppEvent::FavoritesLoaded(Ok(favorites))) if favorites.is_empty()
        ));
    }
}
