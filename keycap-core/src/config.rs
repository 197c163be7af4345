use serde::{Deserialize, Serialize};

use crate::keys;

/// One entry of the shortcut dataset.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Shortcut {
    pub name: String,
    /// Display labels, e.g. `["Ctrl", "C"]`.
    pub keys: Vec<String>,
}

impl Shortcut {
    pub fn new<T: ToString>(name: T, labels: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keys: labels.iter().map(|label| keys::display_key_token(label)).collect(),
        }
    }

    #[must_use]
    pub fn signature(&self) -> String {
        keys::normalize_combo_signature(&self.keys)
    }

    /// Whether a captured combination is this shortcut.
    #[must_use]
    pub fn matches(&self, combination: &[String]) -> bool {
        let signature = self.signature();
        !signature.is_empty() && signature == keys::normalize_combo_signature(combination)
    }
}

pub trait Config {
    fn shortcuts(&self) -> Vec<Shortcut>;
}
