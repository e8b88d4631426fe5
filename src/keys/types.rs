//! Core types for key dispatch: SpecialKey, CanonicalKey, RawKeyEvent

use std::fmt;

use serde::{Deserialize, Serialize};

/// Named keys that keep their own identity instead of being lower-cased
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Space,
    Tab,
    Escape,
    Control,
    Shift,
}

impl SpecialKey {
    pub const ALL: [SpecialKey; 5] = [
        SpecialKey::Space,
        SpecialKey::Tab,
        SpecialKey::Escape,
        SpecialKey::Control,
        SpecialKey::Shift,
    ];

    /// Canonical string for this key
    pub const fn as_str(self) -> &'static str {
        match self {
            SpecialKey::Space => " ",
            SpecialKey::Tab => "tab",
            SpecialKey::Escape => "escape",
            SpecialKey::Control => "control",
            SpecialKey::Shift => "shift",
        }
    }

    /// Match a raw host key label exactly against the enumeration
    pub fn from_raw(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }
}

impl fmt::Display for SpecialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecialKey::Space => write!(f, "Space"),
            SpecialKey::Tab => write!(f, "Tab"),
            SpecialKey::Escape => write!(f, "Escape"),
            SpecialKey::Control => write!(f, "Control"),
            SpecialKey::Shift => write!(f, "Shift"),
        }
    }
}

/// Normalized identity of a physical key press
///
/// Special keys keep their enumerated form; every other label is lower-cased,
/// so `"Q"` and `"q"` are the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Normalize a raw host key label
    pub fn normalize(raw: &str) -> Self {
        match SpecialKey::from_raw(raw) {
            Some(special) => Self(special.as_str().to_string()),
            None => Self(raw.to_lowercase()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The special key this represents, if any
    pub fn special(&self) -> Option<SpecialKey> {
        SpecialKey::from_raw(&self.0)
    }
}

impl From<SpecialKey> for CanonicalKey {
    fn from(key: SpecialKey) -> Self {
        Self(key.as_str().to_string())
    }
}

impl From<&str> for CanonicalKey {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<String> for CanonicalKey {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<CanonicalKey> for String {
    fn from(key: CanonicalKey) -> Self {
        key.0
    }
}

impl PartialEq<str> for CanonicalKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.special() {
            Some(special) => write!(f, "{}", special),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Which broadcast channel an event belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    Down,
    Up,
}

/// Kind of UI element that had focus when a key event fired
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementTag {
    Input,
    TextArea,
    #[default]
    Other,
}

/// Focused element of a raw key event
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTarget {
    #[serde(default)]
    pub tag: ElementTag,
    /// Value of the element's `type` attribute, when it has one
    #[serde(default, rename = "type")]
    pub input_type: Option<String>,
}

impl EventTarget {
    /// No focused control (keys go to the document)
    pub fn document() -> Self {
        Self::default()
    }

    /// An `<input>` element with an optional `type` attribute
    pub fn input(input_type: Option<&str>) -> Self {
        Self {
            tag: ElementTag::Input,
            input_type: input_type.map(str::to_string),
        }
    }

    pub fn text_input() -> Self {
        Self::input(Some("text"))
    }

    /// A percentage slider
    pub fn range_input() -> Self {
        Self::input(Some("range"))
    }

    pub fn text_area() -> Self {
        Self {
            tag: ElementTag::TextArea,
            input_type: None,
        }
    }
}

/// A key event as delivered by the host, before normalization
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawKeyEvent {
    /// Host key label, e.g. `"Q"`, `"Escape"`, `" "`
    pub key: String,
    pub target: EventTarget,
}

impl RawKeyEvent {
    pub fn new(key: impl Into<String>, target: EventTarget) -> Self {
        Self {
            key: key.into(),
            target,
        }
    }

    /// An event with nothing focused
    pub fn on_document(key: impl Into<String>) -> Self {
        Self::new(key, EventTarget::document())
    }

    pub fn canonical_key(&self) -> CanonicalKey {
        CanonicalKey::normalize(&self.key)
    }
}
