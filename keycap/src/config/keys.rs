use serde::{Deserialize, Serialize};

/// How a shortcut's keys are written in the config.
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq, Clone)]
pub enum Keys {
    /// `"Ctrl+Shift+T"`
    Combo(String),
    /// `["Ctrl", "Shift", "T"]`
    Keys(Vec<String>),
}

impl Keys {
    pub fn labels(&self) -> Vec<String> {
        match self {
            Keys::Combo(combo) => keycap_core::keys::parse_combo(combo),
            Keys::Keys(keys) => keys
                .iter()
                .filter(|key| !keycap_core::keys::normalize_key_token(key).is_empty())
                .map(|key| keycap_core::keys::display_key_token(key))
                .collect(),
        }
    }
}
