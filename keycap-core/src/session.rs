use crate::event::{RawKeyEvent, interpret_raw_event};
use crate::keys::{self, WIN};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Not listening.
    Inactive,
    /// Listening, nothing held.
    Idle,
    /// Keys held, nothing emitted for this hold yet.
    Held,
    /// A combination was emitted, waiting for release.
    Submitted,
}

/// Result of feeding one key event to a [`Session`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyOutcome {
    /// The platform's default action for the event must be suppressed.
    pub prevent_default: bool,
    /// Combination completed by this event, in display order.
    pub emitted: Option<Vec<String>>,
}

impl KeyOutcome {
    fn captured(emitted: Option<Vec<String>>) -> Self {
        Self {
            prevent_default: true,
            emitted,
        }
    }
}

/// Aggregates held keys into combinations.
///
/// A combination is emitted on the key-down that adds a non-modifier, or on
/// the first key-up of a hold otherwise. Emissions are deduplicated by
/// signature until every key is released, so one hold emits a signature at
/// most once.
#[derive(Debug, Default)]
pub struct Session {
    active: bool,
    held: Vec<String>,
    last_submitted: Option<String>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.reset();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.reset();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        match (self.active, self.held.is_empty(), &self.last_submitted) {
            (false, _, _) => SessionState::Inactive,
            (true, true, _) => SessionState::Idle,
            (true, false, None) => SessionState::Held,
            (true, false, Some(_)) => SessionState::Submitted,
        }
    }

    /// Currently held keys, in press order.
    #[must_use]
    pub fn held(&self) -> &[String] {
        &self.held
    }

    pub fn key_down(&mut self, event: &RawKeyEvent) -> KeyOutcome {
        if !self.active {
            return KeyOutcome::default();
        }
        let Some(raw) = interpret_raw_event(event) else {
            return KeyOutcome::captured(None);
        };
        if self.is_uncapturable(&raw, event) {
            tracing::trace!("Ignoring OS level shortcut: {}", raw);
            return KeyOutcome::captured(None);
        }

        let label = keys::display_key_token(&raw);
        // Only a newly added key can complete a combination on key-down.
        if self.held.contains(&label) {
            return KeyOutcome::captured(None);
        }
        self.held.push(label.clone());
        if keys::is_modifier_token(&label) {
            return KeyOutcome::captured(None);
        }
        KeyOutcome::captured(self.submit())
    }

    pub fn key_up(&mut self, _event: &RawKeyEvent) -> KeyOutcome {
        if !self.active {
            return KeyOutcome::default();
        }
        // Modifier-only combinations never pass through the key-down path.
        let emitted = if self.held.is_empty() {
            None
        } else {
            self.submit()
        };
        self.reset();
        KeyOutcome::captured(emitted)
    }

    /// Meta/Win and Alt+Tab belong to the OS and can't be reliably taken
    /// over by a page.
    fn is_uncapturable(&self, raw: &str, event: &RawKeyEvent) -> bool {
        let token = keys::normalize_key_token(raw);
        if token == WIN || event.meta_key {
            return true;
        }
        let alt_held = event.alt_key || self.held.iter().any(|l| keys::normalize_key_token(l) == keys::ALT);
        token == "TAB" && alt_held
    }

    fn submit(&mut self) -> Option<Vec<String>> {
        let signature = keys::normalize_combo_signature(&self.held);
        if signature.is_empty() || self.last_submitted.as_deref() == Some(signature.as_str()) {
            return None;
        }
        tracing::debug!("Submitting combination {}", signature);
        self.last_submitted = Some(signature);
        Some(keys::order_combination(&self.held))
    }

    fn reset(&mut self) {
        self.held.clear();
        self.last_submitted = None;
    }
}
