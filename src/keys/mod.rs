//! Keyboard shortcut dispatch
//!
//! This module turns native key events into a filtered publish/subscribe
//! stream that many independent consumers can bind to:
//! - Suppresses keys typed into text fields (range sliders excepted)
//! - Normalizes key labels to a [`CanonicalKey`]
//! - Publishes on separate key-down and key-up channels
//! - Fires [`ShortcutBinding`] callbacks on key-up, gated by a setting
//!
//! # Architecture
//!
//! ```text
//! winit::Key → RawKeyEvent → should_ignore() → KeyBroadcaster → ShortcutBinding → callback
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let keys = KeyBroadcaster::new();
//! keys.start();
//!
//! let _toggle = ShortcutBinding::key_up(&keys, "q", || println!("toggle"), &settings);
//! keys.handle_key_up(&RawKeyEvent::on_document("Q"));
//! ```

mod binding;
mod broadcaster;
mod filter;
mod types;
mod winit_adapter;

pub use binding::{KeyHeld, ShortcutBinding};
pub use broadcaster::KeyBroadcaster;
pub use filter::should_ignore;
pub use types::{CanonicalKey, ElementTag, EventTarget, KeyKind, RawKeyEvent, SpecialKey};
pub use winit_adapter::{key_kind, raw_event_from_winit, raw_key_from_winit};

#[cfg(test)]
mod tests;
