//! Development server with live reload for vitrine demo pages.
//!
//! Renders demo pages on request so fixture and page edits show up
//! immediately, and pushes reload notifications over a WebSocket.

pub mod livereload;
pub mod server;
pub mod watcher;

pub use livereload::{ReloadHub, ReloadMessage};
pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
