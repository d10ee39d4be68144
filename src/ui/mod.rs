//! Menu screens and DOM overlay markup
//!
//! Pure state and strings; the browser glue in `main.rs` only applies them.

pub mod menu;
pub mod overlay;

pub use menu::{MainOption, Menu, MenuScreen, MenuSelection};
