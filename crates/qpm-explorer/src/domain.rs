//! Domain types shared by the gateway, the app layer, and the UI.

pub mod error;
/// Single-line text editing used by the dialog, path bar, and search field.
pub mod input;
pub mod operation;
pub mod view;
