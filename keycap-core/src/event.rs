use serde::{Deserialize, Serialize};

/// A key event as the platform reports it.
///
/// `key` is the semantic value (may depend on Shift and layout), `code` is
/// the physical position (`KeyA`, `Digit4`, `NumpadAdd`, ...).
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawKeyEvent {
    pub key: String,
    pub code: String,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub meta_key: bool,
    pub repeat: bool,
}

impl RawKeyEvent {
    pub fn new<K: ToString, C: ToString>(key: K, code: C) -> Self {
        Self {
            key: key.to_string(),
            code: code.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// Picks the best raw key string for an event, or `None` when the event
/// must be ignored.
///
/// Letters and digits come from the physical code so Shift and layout do
/// not change them. Equal and Minus keep the typed character, since the
/// code alone can't tell `=` from `+` or `-` from `_`.
#[must_use]
pub fn interpret_raw_event(event: &RawKeyEvent) -> Option<String> {
    if event.repeat {
        return None;
    }
    let code = event.code.as_str();

    let letter = code.strip_prefix("Key").filter(|l| is_single(l, |c| c.is_ascii_alphabetic()));
    let digit = code.strip_prefix("Digit").filter(|d| is_single(d, |c| c.is_ascii_digit()));
    if let Some(position) = letter.or(digit) {
        return Some(position.to_owned());
    }

    if let Some(numpad) = code.strip_prefix("Numpad") {
        let raw = match numpad {
            "Add" => "+",
            "Subtract" => "-",
            "Multiply" => "*",
            "Divide" => "/",
            "Decimal" => ".",
            "Enter" => "Enter",
            other => other,
        };
        return Some(raw.to_owned());
    }

    if let Some(direction) = code.strip_prefix("Arrow") {
        return Some(direction.to_owned());
    }

    if code == "Space" || event.key == " " {
        return Some("Space".to_owned());
    }

    if (code == "Equal" || code == "Minus") && !event.key.is_empty() {
        return Some(event.key.clone());
    }

    if event.key.is_empty() {
        None
    } else {
        Some(event.key.clone())
    }
}

fn is_single(s: &str, pred: impl Fn(char) -> bool) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if pred(c))
}
