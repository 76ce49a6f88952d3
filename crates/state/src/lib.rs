//! Process-wide mutable state shared between the tray and the host loop.
//!
//! The host control loop polls [`AppState::take_signal`] to decide the next
//! lifecycle action; tray menu callbacks raise signals and flip flags. All
//! access is plain atomics — the tray callbacks run one at a time on the
//! tray thread, and the host loop is the only other reader.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

/// Product display name, also used as the registry value name.
pub const PRODUCT: &str = "Cormorant";

/// Lifecycle action requested by the user through the tray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Apply a downloaded update, then restart.
    Update,
    /// Restart the application.
    Restart,
    /// Shut the application down.
    Shutdown,
}

const SIGNAL_NONE: u8 = 0;
const SIGNAL_UPDATE: u8 = 1;
const SIGNAL_RESTART: u8 = 2;
const SIGNAL_SHUTDOWN: u8 = 3;

impl Signal {
    fn as_u8(self) -> u8 {
        match self {
            Self::Update => SIGNAL_UPDATE,
            Self::Restart => SIGNAL_RESTART,
            Self::Shutdown => SIGNAL_SHUTDOWN,
        }
    }

    fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            SIGNAL_UPDATE => Some(Self::Update),
            SIGNAL_RESTART => Some(Self::Restart),
            SIGNAL_SHUTDOWN => Some(Self::Shutdown),
            _ => None,
        }
    }
}

/// Shared application state.
///
/// Constructed once by the host and handed to the tray controller as an
/// `Arc`. Replaces the ambient globals the tray would otherwise reach for.
#[derive(Debug)]
pub struct AppState {
    signal: AtomicU8,
    update_available: AtomicBool,
    start_at_login: AtomicBool,
}

impl AppState {
    pub fn new(update_available: bool, start_at_login: bool) -> Self {
        Self {
            signal: AtomicU8::new(SIGNAL_NONE),
            update_available: AtomicBool::new(update_available),
            start_at_login: AtomicBool::new(start_at_login),
        }
    }

    /// Raises a lifecycle signal. A later raise overwrites an unconsumed one.
    pub fn raise(&self, signal: Signal) {
        tracing::debug!(?signal, "lifecycle signal raised");
        self.signal.store(signal.as_u8(), Ordering::SeqCst);
    }

    /// Takes the pending signal, if any. Each raised signal is consumed at
    /// most once; subsequent calls return `None` until the next raise.
    pub fn take_signal(&self) -> Option<Signal> {
        Signal::from_u8(self.signal.swap(SIGNAL_NONE, Ordering::SeqCst))
    }

    pub fn update_available(&self) -> bool {
        self.update_available.load(Ordering::SeqCst)
    }

    pub fn set_update_available(&self, available: bool) {
        self.update_available.store(available, Ordering::SeqCst);
    }

    pub fn start_at_login(&self) -> bool {
        self.start_at_login.load(Ordering::SeqCst)
    }

    pub fn set_start_at_login(&self, enabled: bool) {
        self.start_at_login.store(enabled, Ordering::SeqCst);
    }

    /// Flips the start-at-login flag and returns the new value.
    pub fn toggle_start_at_login(&self) -> bool {
        !self.start_at_login.fetch_xor(true, Ordering::SeqCst)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_consumed_exactly_once() {
        let state = AppState::default();
        assert_eq!(state.take_signal(), None);

        state.raise(Signal::Restart);
        assert_eq!(state.take_signal(), Some(Signal::Restart));
        assert_eq!(state.take_signal(), None);
    }

    #[test]
    fn later_raise_overwrites_pending_signal() {
        let state = AppState::default();
        state.raise(Signal::Update);
        state.raise(Signal::Shutdown);
        assert_eq!(state.take_signal(), Some(Signal::Shutdown));
        assert_eq!(state.take_signal(), None);
    }

    #[test]
    fn toggle_returns_new_value() {
        let state = AppState::new(false, false);
        assert!(state.toggle_start_at_login());
        assert!(state.start_at_login());
        assert!(!state.toggle_start_at_login());
        assert!(!state.start_at_login());
    }

    #[test]
    fn toggle_twice_restores_original() {
        let state = AppState::new(false, true);
        let before = state.start_at_login();
        state.toggle_start_at_login();
        state.toggle_start_at_login();
        assert_eq!(state.start_at_login(), before);
    }

    #[test]
    fn update_available_flag() {
        let state = AppState::default();
        assert!(!state.update_available());
        state.set_update_available(true);
        assert!(state.update_available());
    }
}
