//! Tauri command handlers, grouped by surface. Each command is a thin shim:
//! validate input, hit the API or the workspace state, return a serializable
//! result.

pub mod auth;
pub mod clips;
pub mod editor;
pub mod ideas;
pub mod settings;
pub mod system;
pub mod workspace;
