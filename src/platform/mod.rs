//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to game keys)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod input;
pub mod storage;

pub use input::Key;
pub use storage::{MemoryStorage, Storage};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
