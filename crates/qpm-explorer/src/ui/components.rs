//! Stateless widgets drawn from borrowed app state.

pub mod confirmation_overlay;
pub mod context_menu;
pub mod input_dialog;
pub mod path_bar;
pub mod sidebar;
pub mod status_bar;
