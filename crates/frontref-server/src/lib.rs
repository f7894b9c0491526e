//! Preview server for frontref documentation.
//!
//! Renders catalog pages on request and pushes reload messages to open pages
//! whenever the catalog or the stylesheets change.

pub mod reload;
pub mod server;
pub mod watcher;

pub use reload::{reload_client_script, ReloadHub, ReloadMessage};
pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
