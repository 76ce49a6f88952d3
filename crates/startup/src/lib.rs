//! Run-at-login registration for Cormorant.
//!
//! Reflects the "start at login" configuration flag into the per-user
//! Windows Run key. The launch command is rebuilt from the current
//! executable on every enable, so a moved installation heals itself the
//! next time the user toggles the setting.
//!
//! Registry failures are logged and reported as `false` — they must never
//! take the host process down. The configuration flag can therefore drift
//! from the actual registry state; the settings UI re-reads
//! [`is_registered`] to surface that.

pub mod command;

#[cfg(windows)]
mod registry;
#[cfg(not(windows))]
#[path = "registry_other.rs"]
mod registry;

pub use command::LaunchSpec;
pub use cormorant_state::PRODUCT;
pub use registry::{apply_startup, is_registered};

/// Per-user autostart key, relative to HKEY_CURRENT_USER.
pub const RUN_KEY: &str = r"Software\Microsoft\Windows\CurrentVersion\Run";

/// Errors from autostart registration.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("could not resolve current executable: {0}")]
    CurrentExe(#[source] std::io::Error),

    #[error("could not open registry key {key}: {source}")]
    OpenKey {
        key: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write registry value {name}: {source}")]
    SetValue {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("could not delete registry value {name}: {source}")]
    DeleteValue {
        name: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("auto-start registration is not supported on this platform")]
    Unsupported,
}
