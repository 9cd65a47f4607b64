use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::widgets::TableState;

use crate::app::PendingConfirm;
use crate::app::cache::CachedView;
use crate::app::sidebar::SidebarState;
use crate::infra::prompt::Notice;
use crate::ui::components::confirmation_overlay::ConfirmationOverlay;
use crate::ui::components::context_menu::ContextMenu;
use crate::ui::components::input_dialog::InputDialog;
use crate::ui::components::path_bar::PathBar;
use crate::ui::components::sidebar::Sidebar;
use crate::ui::components::status_bar::StatusBar;
use crate::ui::layout::ScreenLayout;
use crate::ui::pages::explorer::ExplorerPage;
use crate::ui::state::focus::{Pane, PathBarState, SearchState};
use crate::ui::state::overlay::OverlayState;

/// A trait for UI pages that keep widget state across frames.
pub trait Page {
    /// Renders a page in the provided frame and area.
    fn render(&mut self, f: &mut Frame, area: Rect);
}

/// A trait for UI components that enforces a standard rendering interface.
pub trait Component {
    /// Renders a component in the provided frame and area.
    fn render(&self, f: &mut Frame, area: Rect);
}

/// Data required to draw a single UI frame.
pub struct RenderContext<'a> {
    pub focus: Pane,
    pub grid_state: &'a mut TableState,
    pub notice: Option<&'a Notice>,
    pub overlay: &'a OverlayState,
    pub path_bar: &'a PathBarState,
    pub prompt: Option<&'a PendingConfirm>,
    pub search: &'a SearchState,
    pub sidebar: &'a SidebarState,
    pub view: &'a CachedView,
}

/// Renders a complete frame: path bar, sidebar, file grid, status line and
/// whichever overlay is open on top.
pub fn render(f: &mut Frame, context: RenderContext<'_>) {
    let area = f.area();
    let screen = ScreenLayout::new(area);
    let snapshot = context.view.snapshot.as_deref();

    PathBar::new(snapshot, context.path_bar).render(f, screen.path_bar);
    Sidebar::new(context.sidebar, context.focus == Pane::Sidebar).render(f, screen.sidebar);
    ExplorerPage::new(context.view, context.grid_state)
        .focused(context.focus == Pane::Grid)
        .render(f, screen.grid);
    StatusBar::new(snapshot, context.search)
        .notice(context.notice)
        .render(f, screen.status_line);

    match context.overlay {
        OverlayState::Closed => {}
        OverlayState::ContextMenu(menu) => ContextMenu::new(menu).render(f, area),
        OverlayState::InputDialog(dialog) => InputDialog::new(dialog).render(f, area),
    }

    if let Some(pending) = context.prompt {
        ConfirmationOverlay::new(&pending.request.title, &pending.request.question)
            .selected_yes(pending.selected_yes)
            .render(f, area);
    }
}
