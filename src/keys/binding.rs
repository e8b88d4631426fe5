//! Key-up shortcut bindings and held-key tracking

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::emitter::Subscription;
use crate::settings::{BooleanSetting, Setting, Settings};

use super::broadcaster::KeyBroadcaster;
use super::types::CanonicalKey;

/// A callback fired when one key is released
///
/// The "disable default shortcuts" setting is read on every delivery, so
/// flipping it takes effect immediately without rebinding. Several bindings
/// may share a key; each fires, in the order it was bound.
///
/// Dropping the binding unsubscribes it.
pub struct ShortcutBinding {
    broadcaster: KeyBroadcaster,
    key: CanonicalKey,
    on_up: Rc<dyn Fn()>,
    disabled: BooleanSetting,
    subscription: Option<Subscription>,
}

impl ShortcutBinding {
    /// Bind `on_up` to releases of `key`
    pub fn key_up(
        broadcaster: &KeyBroadcaster,
        key: impl Into<CanonicalKey>,
        on_up: impl Fn() + 'static,
        settings: &Settings,
    ) -> Self {
        let mut binding = Self {
            broadcaster: broadcaster.clone(),
            key: key.into(),
            on_up: Rc::new(on_up),
            disabled: settings.boolean(Setting::DisableDefaultShortcuts),
            subscription: None,
        };
        binding.refresh();
        binding
    }

    pub fn key(&self) -> &CanonicalKey {
        &self.key
    }

    /// Whether the binding currently listens for key-ups
    pub fn is_bound(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    /// Move the binding to another key
    pub fn rebind_key(&mut self, key: impl Into<CanonicalKey>) {
        let key = key.into();
        if key == self.key && self.is_bound() {
            return;
        }
        self.key = key;
        self.refresh();
    }

    /// Replace the callback
    pub fn rebind_callback(&mut self, on_up: impl Fn() + 'static) {
        self.on_up = Rc::new(on_up);
        self.refresh();
    }

    /// Read the disabled flag from another settings store
    pub fn rebind_settings(&mut self, settings: &Settings) {
        self.disabled = settings.boolean(Setting::DisableDefaultShortcuts);
        self.refresh();
    }

    /// Drop the current subscription and subscribe again with the current
    /// key, callback and flag.
    pub fn refresh(&mut self) {
        // Old subscription goes first so a key never fires twice.
        if let Some(previous) = self.subscription.take() {
            previous.unsubscribe();
        }

        let key = self.key.clone();
        let on_up = Rc::clone(&self.on_up);
        let disabled = self.disabled.clone();
        self.subscription = Some(self.broadcaster.key_up().subscribe(move |released| {
            if *released == key && !disabled.get() {
                on_up();
            }
        }));
    }

    /// Stop listening until the next `refresh`
    pub fn unbind(&mut self) {
        if let Some(previous) = self.subscription.take() {
            previous.unsubscribe();
        }
    }
}

impl fmt::Debug for ShortcutBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutBinding")
            .field("key", &self.key)
            .field("bound", &self.is_bound())
            .finish()
    }
}

/// Tracks whether a key is currently held down
///
/// Useful for pressed-button affordances next to a shortcut hint.
#[derive(Debug)]
pub struct KeyHeld {
    down: Rc<Cell<bool>>,
    _subscriptions: Vec<Subscription>,
}

impl KeyHeld {
    /// Track `key`; `None` tracks nothing and never reports held.
    pub fn track(broadcaster: &KeyBroadcaster, key: Option<CanonicalKey>) -> Self {
        let down = Rc::new(Cell::new(false));
        let Some(key) = key else {
            return Self {
                down,
                _subscriptions: Vec::new(),
            };
        };

        let on_down = {
            let down = Rc::clone(&down);
            let key = key.clone();
            broadcaster.key_down().subscribe(move |pressed| {
                if *pressed == key {
                    down.set(true);
                }
            })
        };
        let on_up = {
            let down = Rc::clone(&down);
            broadcaster.key_up().subscribe(move |released| {
                if *released == key {
                    down.set(false);
                }
            })
        };

        Self {
            down,
            _subscriptions: vec![on_down, on_up],
        }
    }

    pub fn is_down(&self) -> bool {
        self.down.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::types::{EventTarget, RawKeyEvent};
    use std::cell::RefCell;

    fn started() -> KeyBroadcaster {
        let bus = KeyBroadcaster::new();
        bus.start();
        bus
    }

    fn counter() -> (Rc<Cell<u32>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = Rc::clone(&count);
        (count, move || handle.set(handle.get() + 1))
    }

    fn release(bus: &KeyBroadcaster, key: &str) {
        bus.handle_key_up(&RawKeyEvent::on_document(key));
    }

    #[test]
    fn test_fires_only_for_its_key() {
        let bus = started();
        let (count, on_up) = counter();
        let _binding = ShortcutBinding::key_up(&bus, "q", on_up, &Settings::new());

        release(&bus, "w");
        release(&bus, "Q");

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_key_down_does_not_fire() {
        let bus = started();
        let (count, on_up) = counter();
        let _binding = ShortcutBinding::key_up(&bus, "q", on_up, &Settings::new());

        bus.handle_key_down(&RawKeyEvent::on_document("q"));

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_disabled_flag_checked_per_event() {
        let bus = started();
        let settings = Settings::new();
        let (count, on_up) = counter();
        let _binding = ShortcutBinding::key_up(&bus, "q", on_up, &settings);

        settings.set_shortcuts_disabled(true);
        release(&bus, "q");
        assert_eq!(count.get(), 0);

        settings.set_shortcuts_disabled(false);
        release(&bus, "q");
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_same_key_bindings_fire_in_order() {
        let bus = started();
        let settings = Settings::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = {
            let order = Rc::clone(&order);
            ShortcutBinding::key_up(&bus, "a", move || order.borrow_mut().push(1), &settings)
        };
        let second = {
            let order = Rc::clone(&order);
            ShortcutBinding::key_up(&bus, "a", move || order.borrow_mut().push(2), &settings)
        };

        release(&bus, "a");

        assert_eq!(*order.borrow(), vec![1, 2]);
        drop((first, second));
    }

    #[test]
    fn test_rebind_key_does_not_double_fire() {
        let bus = started();
        let (count, on_up) = counter();
        let mut binding = ShortcutBinding::key_up(&bus, "q", on_up, &Settings::new());

        binding.rebind_key("e");
        binding.refresh();
        assert_eq!(bus.key_up().listener_count(), 1);

        release(&bus, "q");
        release(&bus, "e");

        assert_eq!(count.get(), 1);
        assert_eq!(binding.key().as_str(), "e");
    }

    #[test]
    fn test_rebind_callback_replaces_old() {
        let bus = started();
        let (old_count, old) = counter();
        let (new_count, new) = counter();
        let mut binding = ShortcutBinding::key_up(&bus, "q", old, &Settings::new());

        binding.rebind_callback(new);
        release(&bus, "q");

        assert_eq!(old_count.get(), 0);
        assert_eq!(new_count.get(), 1);
    }

    #[test]
    fn test_rebind_settings_switches_flag_source() {
        let bus = started();
        let first = Settings::new();
        let second = Settings::new();
        second.set_shortcuts_disabled(true);
        let (count, on_up) = counter();
        let mut binding = ShortcutBinding::key_up(&bus, "q", on_up, &first);

        binding.rebind_settings(&second);
        release(&bus, "q");

        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_drop_and_unbind() {
        let bus = started();
        let (count, on_up) = counter();
        let mut binding = ShortcutBinding::key_up(&bus, "q", on_up, &Settings::new());

        binding.unbind();
        assert!(!binding.is_bound());
        release(&bus, "q");

        binding.refresh();
        release(&bus, "q");
        drop(binding);
        release(&bus, "q");

        assert_eq!(count.get(), 1);
        assert_eq!(bus.key_up().listener_count(), 0);
    }

    #[test]
    fn test_typing_in_text_input_suppresses() {
        let bus = started();
        let (count, on_up) = counter();
        let _binding = ShortcutBinding::key_up(&bus, "5", on_up, &Settings::new());

        bus.handle_key_up(&RawKeyEvent::new("5", EventTarget::text_input()));
        bus.handle_key_up(&RawKeyEvent::new("5", EventTarget::range_input()));

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_key_held() {
        let bus = started();
        let held = KeyHeld::track(&bus, Some("q".into()));
        assert!(!held.is_down());

        bus.handle_key_down(&RawKeyEvent::on_document("Q"));
        assert!(held.is_down());

        bus.handle_key_up(&RawKeyEvent::on_document("w"));
        assert!(held.is_down());

        bus.handle_key_up(&RawKeyEvent::on_document("q"));
        assert!(!held.is_down());
    }

    #[test]
    fn test_key_held_without_key() {
        let bus = started();
        let held = KeyHeld::track(&bus, None);
        bus.handle_key_down(&RawKeyEvent::on_document("q"));
        assert!(!held.is_down());
        assert_eq!(bus.key_down().listener_count(), 0);
    }
}
