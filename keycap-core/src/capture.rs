use std::cell::RefCell;
use std::rc::Rc;

use crate::keys;
use crate::platform::{Dispatch, EventBus, PlatformEvent, Subscription, Target};
use crate::session::{Session, SessionState};

/// A live capture. Listeners stay attached until the handle is dropped or
/// [`CaptureHandle::deactivate`] is called.
pub struct CaptureHandle {
    session: Rc<RefCell<Session>>,
    subscriptions: Vec<Subscription>,
}

/// Starts capturing combinations from `bus`.
///
/// `on_combination` receives every completed combination as display labels,
/// modifiers first. Key events and the context menu have their default
/// action suppressed while the capture is live, and Alt presses are
/// intercepted at the document so the platform is less likely to open its
/// menu bar. Some OS shortcuts can't be intercepted at all.
pub fn activate<F>(bus: &EventBus, on_combination: F) -> CaptureHandle
where
    F: FnMut(Vec<String>) + 'static,
{
    let session = Rc::new(RefCell::new(Session::new()));
    session.borrow_mut().activate();
    let on_combination = Rc::new(RefCell::new(on_combination));

    let window_session = session.clone();
    let window = bus.subscribe(Target::Window, move |event| {
        let outcome = match event {
            PlatformEvent::KeyDown(raw) => window_session.borrow_mut().key_down(raw),
            PlatformEvent::KeyUp(raw) => window_session.borrow_mut().key_up(raw),
            PlatformEvent::ContextMenu => return Dispatch::PreventDefault,
            PlatformEvent::FullscreenChange(_) => return Dispatch::Continue,
        };
        if let Some(combination) = outcome.emitted {
            tracing::debug!("Captured {:?}", combination);
            (&mut *on_combination.borrow_mut())(combination);
        }
        if outcome.prevent_default {
            Dispatch::PreventDefault
        } else {
            Dispatch::Continue
        }
    });

    let alt_guard = bus.subscribe(Target::Document, |event| match event {
        PlatformEvent::KeyDown(raw) if raw.alt_key || keys::normalize_key_token(&raw.key) == keys::ALT => {
            Dispatch::PreventDefault
        }
        _ => Dispatch::Continue,
    });

    tracing::debug!("Keyboard capture active");
    CaptureHandle {
        session,
        subscriptions: vec![alt_guard, window],
    }
}

impl CaptureHandle {
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.borrow().state()
    }

    #[must_use]
    pub fn held(&self) -> Vec<String> {
        self.session.borrow().held().to_vec()
    }

    /// Detaches every listener and discards the session state.
    pub fn deactivate(self) {
        drop(self);
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.subscriptions.clear();
        self.session.borrow_mut().deactivate();
        tracing::debug!("Keyboard capture released");
    }
}
