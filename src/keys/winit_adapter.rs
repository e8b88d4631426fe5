//! Adapter from winit keyboard events to raw key labels

use winit::event::ElementState;
use winit::keyboard::{Key, KeyCode as WinitKeyCode, NamedKey, PhysicalKey};

use super::types::{EventTarget, KeyKind, RawKeyEvent};

/// Convert a winit key into the host label the broadcaster normalizes
///
/// Returns None for keys no shortcut can name.
pub fn raw_key_from_winit(logical_key: &Key, physical_key: PhysicalKey) -> Option<String> {
    let label = match logical_key {
        Key::Named(named) => match named {
            NamedKey::Space => Some(" "),
            NamedKey::Tab => Some("Tab"),
            NamedKey::Escape => Some("Escape"),
            NamedKey::Control => Some("Control"),
            NamedKey::Shift => Some("Shift"),
            NamedKey::Enter => Some("Enter"),
            NamedKey::Backspace => Some("Backspace"),
            NamedKey::Delete => Some("Delete"),
            NamedKey::ArrowUp => Some("ArrowUp"),
            NamedKey::ArrowDown => Some("ArrowDown"),
            NamedKey::ArrowLeft => Some("ArrowLeft"),
            NamedKey::ArrowRight => Some("ArrowRight"),
            _ => None,
        }
        .map(str::to_string),

        Key::Character(s) if !s.is_empty() => Some(s.to_string()),

        _ => None,
    };

    // Numpad keys sometimes arrive without a logical character
    label.or_else(|| match physical_key {
        PhysicalKey::Code(code) => match code {
            WinitKeyCode::Numpad0 => Some("0"),
            WinitKeyCode::Numpad1 => Some("1"),
            WinitKeyCode::Numpad2 => Some("2"),
            WinitKeyCode::Numpad3 => Some("3"),
            WinitKeyCode::Numpad4 => Some("4"),
            WinitKeyCode::Numpad5 => Some("5"),
            WinitKeyCode::Numpad6 => Some("6"),
            WinitKeyCode::Numpad7 => Some("7"),
            WinitKeyCode::Numpad8 => Some("8"),
            WinitKeyCode::Numpad9 => Some("9"),
            WinitKeyCode::NumpadAdd => Some("+"),
            WinitKeyCode::NumpadSubtract => Some("-"),
            _ => None,
        }
        .map(str::to_string),
        PhysicalKey::Unidentified(_) => None,
    })
}

/// Build a [`RawKeyEvent`] from winit key data and the focused element
pub fn raw_event_from_winit(
    logical_key: &Key,
    physical_key: PhysicalKey,
    target: EventTarget,
) -> Option<RawKeyEvent> {
    raw_key_from_winit(logical_key, physical_key).map(|key| RawKeyEvent::new(key, target))
}

/// Which broadcast channel a winit element state belongs on
pub fn key_kind(state: ElementState) -> KeyKind {
    match state {
        ElementState::Pressed => KeyKind::Down,
        ElementState::Released => KeyKind::Up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::types::CanonicalKey;

    #[test]
    fn test_character_key() {
        let raw = raw_key_from_winit(
            &Key::Character("Q".into()),
            PhysicalKey::Code(WinitKeyCode::KeyQ),
        );
        assert_eq!(raw.as_deref(), Some("Q"));
        assert_eq!(CanonicalKey::from(raw.unwrap()).as_str(), "q");
    }

    #[test]
    fn test_shifted_digit_keeps_symbol() {
        let raw = raw_key_from_winit(
            &Key::Character("!".into()),
            PhysicalKey::Code(WinitKeyCode::Digit1),
        );
        assert_eq!(raw.as_deref(), Some("!"));
    }

    #[test]
    fn test_named_keys_normalize_to_special() {
        let escape = raw_key_from_winit(
            &Key::Named(NamedKey::Escape),
            PhysicalKey::Code(WinitKeyCode::Escape),
        )
        .expect("should map");
        assert_eq!(CanonicalKey::from(escape).as_str(), "escape");

        let space = raw_key_from_winit(
            &Key::Named(NamedKey::Space),
            PhysicalKey::Code(WinitKeyCode::Space),
        )
        .expect("should map");
        assert_eq!(space, " ");
    }

    #[test]
    fn test_numpad_fallback() {
        let raw = raw_key_from_winit(
            &Key::Named(NamedKey::F24),
            PhysicalKey::Code(WinitKeyCode::NumpadAdd),
        );
        assert_eq!(raw.as_deref(), Some("+"));
    }

    #[test]
    fn test_unmapped_key() {
        let raw = raw_key_from_winit(
            &Key::Named(NamedKey::F24),
            PhysicalKey::Code(WinitKeyCode::F24),
        );
        assert!(raw.is_none());
    }

    #[test]
    fn test_event_and_kind() {
        let event = raw_event_from_winit(
            &Key::Character("5".into()),
            PhysicalKey::Code(WinitKeyCode::Digit5),
            EventTarget::range_input(),
        )
        .expect("should map");
        assert_eq!(event.key, "5");
        assert_eq!(event.target, EventTarget::range_input());

        assert_eq!(key_kind(ElementState::Pressed), KeyKind::Down);
        assert_eq!(key_kind(ElementState::Released), KeyKind::Up);
    }
}
