use crate::errors::{KeycapError, Result};
use keycap_core::config::Shortcut as core_shortcut;
use keycap_core::keys::{self, ALT, WIN};
use serde::{Deserialize, Serialize};

use super::keys::Keys;

pub type Shortcuts = Vec<Shortcut>;

#[derive(Debug, PartialEq, Clone, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    pub name: String,
    pub keys: Keys,
}

impl TryFrom<Shortcut> for core_shortcut {
    type Error = KeycapError;

    fn try_from(shortcut: Shortcut) -> Result<Self> {
        if shortcut.name.trim().is_empty() {
            return Err(KeycapError::NameNotFound);
        }
        let labels = shortcut.keys.labels();
        if labels.is_empty() {
            return Err(KeycapError::KeysNotFound);
        }
        let tokens: Vec<String> = labels.iter().map(|l| keys::normalize_key_token(l)).collect();
        if tokens.iter().any(|token| token == WIN) {
            return Err(KeycapError::UncapturableKey("Win".to_owned()));
        }
        if tokens.iter().any(|token| token == ALT) && tokens.iter().any(|token| token == "TAB") {
            return Err(KeycapError::UncapturableKey("Alt+Tab".to_owned()));
        }
        Ok(core_shortcut {
            name: shortcut.name,
            keys: keys::order_combination(&labels),
        })
    }
}
