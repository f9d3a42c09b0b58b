//! Deciding when to refresh the workspace status.

mod controller;
mod watcher;

pub use controller::{RefreshController, RefreshSettings, RefreshTrigger, DEFAULT_QUIET_WINDOW};
pub use watcher::{watch_paths, ChangeWatcher};
