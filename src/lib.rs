//! Todo Shell - browser bootstrap for a compiled todo front-end
//!
//! Core modules:
//! - `storage`: key-value persistence behind a swappable adapter
//! - `state`: the opaque persisted state and its JSON round-trip
//! - `signal`: the app's outbound save-state channel
//! - `app`: capability boundary to the compiled application
//! - `bootstrap`: the restore → start → subscribe sequence
//! - `service_worker`: offline-caching opt-out

pub mod app;
pub mod bootstrap;
pub mod service_worker;
pub mod signal;
pub mod state;
pub mod storage;

pub use bootstrap::{BootError, Bootstrap};
pub use state::PersistedState;
pub use storage::{MemoryStorage, StorageAdapter};

/// Wiring constants
pub mod consts {
    /// LocalStorage slot holding the serialized app state
    pub const STORAGE_KEY: &str = "elm-todo-save";
    /// Document element the application attaches to
    pub const MOUNT_ID: &str = "root";
}
