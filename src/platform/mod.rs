//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Key/value storage (LocalStorage on web, in-memory on native)
//! - JS host bindings for the editor (web only)

pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use storage::{KeyValueStore, MemoryStorage};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
