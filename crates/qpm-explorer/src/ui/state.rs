pub mod focus;
pub mod grid;
pub mod overlay;
