//! Synchronous publish/subscribe channel
//!
//! `Emitter<T>` is a cheap, clonable handle to a list of listeners. Every
//! `publish` runs each listener on the caller's stack, in the order the
//! listeners subscribed, before returning.
//!
//! ```text
//! publish(value) ──► snapshot listeners ──► listener 1 ──► listener 2 ──► ...
//! ```
//!
//! Listeners may subscribe or unsubscribe from inside a callback:
//! - a listener added during a dispatch first sees the *next* value
//! - a listener removed during a dispatch is skipped if it has not run yet
//!
//! Everything here is single-threaded (`Rc`/`Cell`), matching the host UI loop.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<dyn Fn(&T)>;

struct Listener<T> {
    id: u64,
    active: Rc<Cell<bool>>,
    callback: Callback<T>,
}

struct Inner<T> {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<Listener<T>>>,
}

/// Handle to a synchronous broadcast channel
pub struct Emitter<T> {
    inner: Rc<Inner<T>>,
}

impl<T: 'static> Emitter<T> {
    /// Create an emitter with no listeners
    pub fn new() -> Self {
        Self {
            inner: Rc::new(Inner {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a listener. It stays registered until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let active = Rc::new(Cell::new(true));
        self.inner.listeners.borrow_mut().push(Listener {
            id,
            active: Rc::clone(&active),
            callback: Rc::new(callback),
        });

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            active,
            detach: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.listeners.borrow_mut().retain(|l| l.id != id);
                }
            })),
        }
    }

    /// Deliver `value` to every current listener
    pub fn publish(&self, value: T) {
        // Snapshot first so callbacks are free to (un)subscribe.
        let snapshot: Vec<(Rc<Cell<bool>>, Callback<T>)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|l| (Rc::clone(&l.active), Rc::clone(&l.callback)))
            .collect();

        for (active, callback) in snapshot {
            if active.get() {
                callback(&value);
            }
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// A registered listener; dropping it unsubscribes
#[must_use = "dropping a Subscription unsubscribes the listener immediately"]
pub struct Subscription {
    active: Rc<Cell<bool>>,
    detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the listener. A callback that is already running completes.
    pub fn unsubscribe(mut self) {
        self.detach_now();
    }

    /// Whether the listener will receive future values
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    fn detach_now(&mut self) {
        self.active.set(false);
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.active.get())
            .finish()
    }
}
