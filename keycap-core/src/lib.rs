
pub mod capture;
pub mod config;
pub mod errors;
pub mod event;
pub mod fullscreen;
pub mod ipc;
pub mod keys;
pub mod platform;
pub mod session;
pub mod worker;

/// The directory name for xdg
pub const KEYCAP_DIR_NAME: &str = "keycap";
