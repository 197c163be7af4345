use thiserror::Error;

macro_rules! r#return {
    ($a: expr) => {
        match $a {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("{}", KeycapError::from(err));
                return;
            }
        }
    };
}

macro_rules! log {
    ($a: expr) => {
        match $a {
            Ok(value) => value,
            Err(err) => tracing::error!("{}", KeycapError::from(err)),
        }
    };
}

macro_rules! exit {
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

pub(crate) use exit;
pub(crate) use log;
pub(crate) use r#return;

pub type Result<T> = std::result::Result<T, KeycapError>;
pub type Error = std::result::Result<(), KeycapError>;

#[derive(Debug, Error)]
pub enum KeycapError {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),
    #[error("Nix errno: {0}.")]
    NixErrno(#[from] nix::errno::Errno),
    #[error("RON error: {0}.")]
    RonError(#[from] ron::error::SpannedError),

    #[error("Fullscreen request was denied: {0}.")]
    FullscreenDenied(String),
    #[error("Capture is already active.")]
    CaptureActive,
    #[error("No shortcuts to practice.")]
    NoShortcuts,
}
