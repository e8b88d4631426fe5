//! Keysend - keyboard shortcuts for a game send pane
//!
//! This crate provides key broadcasting with editable-element filtering,
//! settings-aware shortcut bindings, and the send-targeting controller
//! that those shortcuts drive.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod emitter;
pub mod keys;
pub mod scenario;
pub mod send;
pub mod settings;
pub mod tracing;

// Re-export commonly used types
pub use config::KeysendConfig;
pub use emitter::{Emitter, Subscription};
pub use keys::{CanonicalKey, KeyBroadcaster, ShortcutBinding};
pub use send::{CursorMode, SendController, SendPane};
pub use settings::Settings;
