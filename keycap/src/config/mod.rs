pub mod keys;
pub mod shortcut;

use crate::errors::{KeycapError, Result};

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use xdg::BaseDirectories;

use self::shortcut::Shortcuts;

#[derive(Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Config {
    shortcuts: Shortcuts,
}

impl keycap_core::config::Config for Config {
    fn shortcuts(&self) -> Vec<keycap_core::config::Shortcut> {
        self.shortcuts
            .iter()
            .filter_map(|shortcut| match keycap_core::config::Shortcut::try_from(shortcut.clone()) {
                Ok(shortcut) => Some(shortcut),
                Err(err) => {
                    tracing::error!("Invalid shortcut: {}\n{:?}", err, shortcut);
                    None
                }
            })
            .collect()
    }
}

impl TryFrom<String> for Config {
    type Error = KeycapError;
    /// # Errors
    ///
    /// Errors when the contents are not a RON encoded config, or when not a
    /// single shortcut in it can be practiced.
    fn try_from(contents: String) -> Result<Self> {
        let config: Config = ron::from_str(&contents)?;
        if keycap_core::config::Config::shortcuts(&config).is_empty() {
            return Err(KeycapError::NoShortcuts);
        }
        Ok(config)
    }
}

/// # Errors
///
/// This errors, when no Config is found at the path
pub fn load() -> Result<Config> {
    let path = BaseDirectories::with_prefix(keycap_core::KEYCAP_DIR_NAME);
    let file_name = path.place_config_file("config.ron")?;
    if Path::new(&file_name).exists() {
        let contents = fs::read_to_string(file_name)?;
        return Config::try_from(contents);
    }
    Err(KeycapError::NoConfigFound)
}
