//! Integration tests for the key dispatch pipeline

use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::settings::Settings;

fn started() -> KeyBroadcaster {
    let keys = KeyBroadcaster::new();
    keys.start();
    keys
}

fn log_binding(
    keys: &KeyBroadcaster,
    key: &str,
    tag: &'static str,
    log: &Rc<RefCell<Vec<&'static str>>>,
    settings: &Settings,
) -> ShortcutBinding {
    let log = Rc::clone(log);
    ShortcutBinding::key_up(keys, key, move || log.borrow_mut().push(tag), settings)
}

#[test]
fn test_full_pipeline_with_mixed_targets() {
    let keys = started();
    let settings = Settings::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let _q = log_binding(&keys, "q", "q", &log, &settings);
    let _esc = log_binding(&keys, SpecialKey::Escape.as_str(), "esc", &log, &settings);

    keys.handle_key_up(&RawKeyEvent::new("Q", EventTarget::text_input()));
    keys.handle_key_up(&RawKeyEvent::new("Q", EventTarget::text_area()));
    keys.handle_key_up(&RawKeyEvent::new("Q", EventTarget::range_input()));
    keys.handle_key_up(&RawKeyEvent::on_document("Escape"));

    assert_eq!(*log.borrow(), vec!["q", "esc"]);
}

#[test]
fn test_key_repeat_fires_once_per_release() {
    let keys = started();
    let settings = Settings::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let _plus = log_binding(&keys, "+", "plus", &log, &settings);

    // Auto-repeat produces many downs and a single up
    for _ in 0..5 {
        keys.handle_key_down(&RawKeyEvent::on_document("+"));
    }
    keys.handle_key_up(&RawKeyEvent::on_document("+"));

    assert_eq!(*log.borrow(), vec!["plus"]);
}

#[test]
fn test_binding_removed_inside_callback_stops_firing() {
    let keys = started();
    let settings = Settings::new();
    let slot: Rc<RefCell<Option<ShortcutBinding>>> = Rc::new(RefCell::new(None));
    let fired = Rc::new(RefCell::new(0));

    let binding = {
        let slot = Rc::clone(&slot);
        let fired = Rc::clone(&fired);
        ShortcutBinding::key_up(
            &keys,
            "x",
            move || {
                *fired.borrow_mut() += 1;
                // Tear down our own binding; the current delivery completes
                slot.borrow_mut().take();
            },
            &settings,
        )
    };
    *slot.borrow_mut() = Some(binding);

    keys.handle_key_up(&RawKeyEvent::on_document("x"));
    keys.handle_key_up(&RawKeyEvent::on_document("x"));

    assert_eq!(*fired.borrow(), 1);
    assert_eq!(keys.key_up().listener_count(), 0);
}

#[test]
fn test_stop_then_start_resumes_delivery() {
    let keys = started();
    let settings = Settings::new();
    let log = Rc::new(RefCell::new(Vec::new()));
    let _a = log_binding(&keys, "a", "a", &log, &settings);

    keys.stop();
    keys.handle_key_up(&RawKeyEvent::on_document("a"));
    keys.start();
    keys.handle_key_up(&RawKeyEvent::on_document("a"));

    assert_eq!(*log.borrow(), vec!["a"]);
}

#[test]
fn test_held_indicator_tracks_special_key() {
    let keys = started();
    let held = KeyHeld::track(&keys, Some(SpecialKey::Shift.into()));

    keys.handle_key_down(&RawKeyEvent::on_document("Shift"));
    assert!(held.is_down());
    keys.handle_key_up(&RawKeyEvent::on_document("Shift"));
    assert!(!held.is_down());
}
