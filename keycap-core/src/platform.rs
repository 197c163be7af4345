//! Window and document event targets for hosts without a DOM.
//!
//! Listeners are acquired with [`EventBus::subscribe`] and released when the
//! returned [`Subscription`] is dropped. Dispatch is synchronous and serial,
//! the way a page's event loop delivers events.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::event::RawKeyEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformEvent {
    KeyDown(RawKeyEvent),
    KeyUp(RawKeyEvent),
    ContextMenu,
    FullscreenChange(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Window,
    Document,
}

/// What a listener asks of the platform after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    PreventDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatched {
    pub listeners: usize,
    pub default_prevented: bool,
}

type Handler = Rc<RefCell<dyn FnMut(&PlatformEvent) -> Dispatch>>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    // Keyed by id so iteration follows registration order.
    entries: BTreeMap<u64, (Target, Handler)>,
}

#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Listeners>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` on `target`. The listener lives as long as the
    /// returned subscription.
    #[must_use = "dropping the subscription removes the listener"]
    pub fn subscribe<F>(&self, target: Target, handler: F) -> Subscription
    where
        F: FnMut(&PlatformEvent) -> Dispatch + 'static,
    {
        let mut listeners = self.inner.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        let handler: Handler = Rc::new(RefCell::new(handler));
        listeners.entries.insert(id, (target, handler));
        Subscription {
            id,
            bus: Rc::downgrade(&self.inner),
        }
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Delivers `event` to document listeners, then window listeners.
    ///
    /// A listener removed by an earlier listener of the same dispatch is
    /// skipped. Not re-entrant: a listener must not dispatch on the bus that
    /// is calling it, or the listener's `RefCell` borrow panics.
    pub fn dispatch(&self, event: &PlatformEvent) -> Dispatched {
        let mut dispatched = Dispatched::default();
        for target in [Target::Document, Target::Window] {
            let snapshot: Vec<(u64, Handler)> = self
                .inner
                .borrow()
                .entries
                .iter()
                .filter(|(_, (t, _))| *t == target)
                .map(|(id, (_, handler))| (*id, handler.clone()))
                .collect();
            for (id, handler) in snapshot {
                if !self.inner.borrow().entries.contains_key(&id) {
                    continue;
                }
                dispatched.listeners += 1;
                if (&mut *handler.borrow_mut())(event) == Dispatch::PreventDefault {
                    dispatched.default_prevented = true;
                }
            }
        }
        dispatched
    }
}

/// Handle to a registered listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            // The handler may own other subscriptions, so it is dropped
            // after the borrow is released.
            let removed = bus.borrow_mut().entries.remove(&self.id);
            drop(removed);
        }
    }
}
