//! System tray controller for the Cormorant desktop application.
//!
//! Renders a tray icon with a context menu (open UI, start at login, update
//! actions, restart) and reflects application state changes back into the
//! icon and menu.
//!
//! The controller is widget-free: rendering goes through the [`TrayBackend`]
//! capability trait and host collaborators through [`HostHooks`]. The
//! desktop app supplies the Windows `tray-icon` backend and communicates
//! with the tray thread via [`TrayHandle`]:
//! - [`TrayUpdate`] — updates from the host to the tray (refresh check
//!   mark, update availability, shutdown)
//! - menu clicks run synchronously on the tray thread and mutate the shared
//!   [`cormorant_state::AppState`]
//!
//! # Platform notes
//! - Windows: Shell_NotifyIcon via the `tray-icon` crate (in the app)
//! - Tray initialization failure is non-fatal; the host continues headless

mod menu;
mod tray;

pub use cormorant_state::PRODUCT;
pub use menu::{MenuEntry, MenuKey, MenuModel};
pub use tray::{
    HostHooks, IconAssets, TrayBackend, TrayController, TrayError, TrayHandle, TrayUpdate,
    TrayView,
};
