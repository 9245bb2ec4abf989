//! Listener registration with scoped unsubscription.
//!
//! A [`Signal`] holds a list of listeners. [`Signal::subscribe`] returns a
//! [`Subscription`] handle; dropping the handle (or calling
//! [`Subscription::unsubscribe`]) removes the listener. Dispatch works on a
//! snapshot of the listener list, so listeners may subscribe, unsubscribe or
//! emit other signals while being called. A value emitted on a signal that
//! is already dispatching is queued and delivered after the current value
//! reached every listener, so no listener misses it.
//!
//! # Example
//!
//! ```
//! # use std::{cell::Cell, rc::Rc};
//! # use vantage_core::signal::Signal;
//! let signal = Signal::<u32>::new();
//! let total = Rc::new(Cell::new(0));
//!
//! let subscription = signal.subscribe({
//!     let total = Rc::clone(&total);
//!     move |value| total.set(total.get() + value)
//! });
//!
//! signal.emit(&2);
//! drop(subscription);
//! signal.emit(&40);
//!
//! assert_eq!(total.get(), 2);
//! ```

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fmt,
    rc::{Rc, Weak},
};

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Registry<T> {
    next_key: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    dispatching: Cell<bool>,
    pending: RefCell<VecDeque<T>>,
}

impl<T> Registry<T> {
    fn remove(&self, key: u64) {
        self.listeners
            .borrow_mut()
            .retain(|(listener_key, _)| *listener_key != key);
    }
}

/// A single-threaded event hook.
pub struct Signal<T: 'static> {
    registry: Rc<Registry<T>>,
}

impl<T: 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(Registry {
                next_key: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
                dispatching: Cell::new(false),
                pending: RefCell::new(VecDeque::new()),
            }),
        }
    }

    /// Registers `listener` and returns the handle that keeps it registered.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription {
        let key = self.registry.next_key.get();
        self.registry.next_key.set(key + 1);

        let listener: Listener<T> = Rc::new(RefCell::new(listener));
        self.registry.listeners.borrow_mut().push((key, listener));

        let registry: Weak<Registry<T>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.remove(key);
                }
            })),
        }
    }

    /// Calls every listener registered at the time of the call.
    ///
    /// Values emitted from inside a listener are queued and delivered in
    /// order once the outer dispatch is done.
    pub fn emit(&self, value: &T)
    where
        T: Clone,
    {
        let registry = &self.registry;
        if registry.dispatching.replace(true) {
            log::trace!(queued = registry.pending.borrow().len() + 1; "Queueing re-entrant emit");
            registry.pending.borrow_mut().push_back(value.clone());
            return;
        }

        self.dispatch(value);
        loop {
            let next = registry.pending.borrow_mut().pop_front();
            let Some(next) = next else {
                break;
            };
            self.dispatch(&next);
        }
        registry.dispatching.set(false);
    }

    fn dispatch(&self, value: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = self.registry.listeners.borrow().clone();
        for (key, listener) in snapshot {
            if !self.is_registered(key) {
                continue;
            }
            let Ok(mut callback) = listener.try_borrow_mut() else {
                log::trace!(listener_key = key; "Skipping running listener");
                continue;
            };
            (&mut *callback)(value);
        }
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.listeners.borrow().len()
    }

    fn is_registered(&self, key: u64) -> bool {
        self.registry
            .listeners
            .borrow()
            .iter()
            .any(|(listener_key, _)| *listener_key == key)
    }
}

impl<T: 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle returned by [`Signal::subscribe`].
///
/// The listener stays registered for as long as the handle lives.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unregisters the listener now instead of at drop.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
