//! Process-wide key-down / key-up broadcast channels
//!
//! The host forwards every native key event to [`KeyBroadcaster::handle`].
//! Events pass the [`should_ignore`](super::filter::should_ignore) filter,
//! are normalized to a [`CanonicalKey`], and are published on exactly one
//! channel. Nothing is published until [`KeyBroadcaster::start`] attaches the
//! broadcaster to the host input stream.

use std::cell::Cell;
use std::rc::Rc;

use crate::emitter::Emitter;

use super::filter::should_ignore;
use super::types::{CanonicalKey, KeyKind, RawKeyEvent};

/// Key event bus shared by every shortcut consumer
///
/// Cloning yields another handle to the same channels.
#[derive(Clone, Debug, Default)]
pub struct KeyBroadcaster {
    key_down: Emitter<CanonicalKey>,
    key_up: Emitter<CanonicalKey>,
    listening: Rc<Cell<bool>>,
}

impl KeyBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach to the host key stream. Returns false if already attached.
    pub fn start(&self) -> bool {
        if self.listening.get() {
            tracing::debug!("key broadcaster already listening, ignoring start");
            return false;
        }
        self.listening.set(true);
        tracing::info!("key broadcaster listening");
        true
    }

    /// Detach from the host key stream. Returns false if not attached.
    pub fn stop(&self) -> bool {
        if !self.listening.get() {
            return false;
        }
        self.listening.set(false);
        tracing::info!("key broadcaster stopped");
        true
    }

    pub fn is_listening(&self) -> bool {
        self.listening.get()
    }

    /// Channel carrying every accepted key-down
    pub fn key_down(&self) -> &Emitter<CanonicalKey> {
        &self.key_down
    }

    /// Channel carrying every accepted key-up
    pub fn key_up(&self) -> &Emitter<CanonicalKey> {
        &self.key_up
    }

    /// Feed one native key event. Returns true if it was published.
    pub fn handle(&self, kind: KeyKind, event: &RawKeyEvent) -> bool {
        if !self.listening.get() {
            return false;
        }
        if should_ignore(event) {
            tracing::trace!(key = %event.key, "key suppressed by focused input");
            return false;
        }

        let key = event.canonical_key();
        tracing::debug!(?kind, key = key.as_str(), "key");
        match kind {
            KeyKind::Down => self.key_down.publish(key),
            KeyKind::Up => self.key_up.publish(key),
        }
        true
    }

    pub fn handle_key_down(&self, event: &RawKeyEvent) -> bool {
        self.handle(KeyKind::Down, event)
    }

    pub fn handle_key_up(&self, event: &RawKeyEvent) -> bool {
        self.handle(KeyKind::Up, event)
    }
}
