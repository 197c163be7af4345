use thiserror::Error;

macro_rules! return_on_error {
    ($a: expr) => {
        match $a {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("Returning due to error: {}", KeycapError::from(err));
                return;
            }
        }
    };
}

macro_rules! exit_on_error {
    ($a: expr) => {
        match $a {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("Exiting due to error: {}", KeycapError::from(err));
                std::process::exit(1);
            }
        }
    };
}

pub(crate) use exit_on_error;
pub(crate) use return_on_error;

pub type Result<T> = std::result::Result<T, KeycapError>;

#[derive(Debug, Error)]
pub enum KeycapError {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),
    #[error("RON error: {0}.")]
    RonError(#[from] ron::error::SpannedError),

    #[error("No keys given for shortcut.")]
    KeysNotFound,
    #[error("{0} can't be captured, the OS keeps it for itself.")]
    UncapturableKey(String),
    #[error("Shortcut name is empty.")]
    NameNotFound,
    #[error("No config file found.")]
    NoConfigFound,
    #[error("Config has no usable shortcuts.")]
    NoShortcuts,
}
