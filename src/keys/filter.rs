//! Suppression of shortcut keys while the user is typing

use super::types::{ElementTag, RawKeyEvent};

/// Input `type` that still lets shortcuts through (percentage sliders)
const PASSTHROUGH_INPUT_TYPE: &str = "range";

/// Returns true when `event` should not reach any shortcut.
///
/// Text inputs swallow keys so typing never triggers a binding. Range inputs
/// are the exception. Text areas always swallow.
pub fn should_ignore(event: &RawKeyEvent) -> bool {
    match event.target.tag {
        ElementTag::Input => event.target.input_type.as_deref() != Some(PASSTHROUGH_INPUT_TYPE),
        ElementTag::TextArea => true,
        ElementTag::Other => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::types::EventTarget;

    #[test]
    fn test_document_not_ignored() {
        assert!(!should_ignore(&RawKeyEvent::on_document("q")));
    }

    #[test]
    fn test_text_input_ignored() {
        assert!(should_ignore(&RawKeyEvent::new("q", EventTarget::text_input())));
    }

    #[test]
    fn test_untyped_input_ignored() {
        assert!(should_ignore(&RawKeyEvent::new("q", EventTarget::input(None))));
    }

    #[test]
    fn test_range_input_passes_through() {
        assert!(!should_ignore(&RawKeyEvent::new("5", EventTarget::range_input())));
    }

    #[test]
    fn test_text_area_always_ignored() {
        let mut target = EventTarget::text_area();
        target.input_type = Some("range".to_string());
        assert!(should_ignore(&RawKeyEvent::new("q", target)));
    }
}
