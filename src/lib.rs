//! Client layer for the Executive Secretary AI backend.
//!
//! Provides the HTTP gateway (`api`), the session and its persistence
//! (`session`, `storage`), the session manager (`auth`), user feedback
//! widgets (`ui`), and the `app` context that wires them together.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod session;
pub mod storage;
pub mod ui;

#[cfg(test)]
mod testing;

pub use app::App;
pub use config::ClientConfig;
