//! Focus-specific key handling modules.

pub(crate) mod browse;
pub(crate) mod confirmation;
pub(crate) mod context_menu;
pub(crate) mod input_dialog;
pub(crate) mod path_bar;
pub(crate) mod search;
pub(crate) mod sidebar;
pub(crate) mod text_input;
