//! Live application settings shared by handle
//!
//! Unlike [`KeysendConfig`](crate::config::KeysendConfig), which is the
//! on-disk snapshot, these values can be flipped at runtime and every holder
//! of a [`BooleanSetting`] sees the change on its next read.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::KeysendConfig;

/// Boolean settings known to the shortcut layer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Setting {
    /// Suppress every built-in keyboard shortcut
    DisableDefaultShortcuts,
}

/// Shared, mutable boolean flag
#[derive(Clone, Debug, Default)]
pub struct BooleanSetting(Rc<Cell<bool>>);

impl BooleanSetting {
    pub fn new(value: bool) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    #[inline]
    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, value: bool) {
        self.0.set(value);
    }
}

/// Settings store
#[derive(Clone, Debug, Default)]
pub struct Settings {
    disable_default_shortcuts: BooleanSetting,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &KeysendConfig) -> Self {
        Self {
            disable_default_shortcuts: BooleanSetting::new(config.disable_default_shortcuts),
        }
    }

    /// Handle to a boolean setting
    pub fn boolean(&self, setting: Setting) -> BooleanSetting {
        match setting {
            Setting::DisableDefaultShortcuts => self.disable_default_shortcuts.clone(),
        }
    }

    pub fn shortcuts_disabled(&self) -> bool {
        self.disable_default_shortcuts.get()
    }

    pub fn set_shortcuts_disabled(&self, disabled: bool) {
        tracing::debug!(disabled, "default shortcuts toggled");
        self.disable_default_shortcuts.set(disabled);
    }
}
