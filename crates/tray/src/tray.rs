//! Tray controller, backend capability trait, and host-side handle.
//!
//! The controller owns the tray's desired appearance and translates menu
//! clicks into application actions. Rendering goes through [`TrayBackend`]
//! so the controller itself has no GUI dependency; the desktop app supplies
//! the Windows widget backend and tests supply a recording one.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Arc;

use cormorant_state::{AppState, Signal};

use crate::menu::{MenuKey, MenuModel};
use crate::PRODUCT;

const LOGO_ICON: &str = "logo-circle.ico";
const LOGO_UPDATE_ICON: &str = "logo-circle-update.ico";
const CHECK_ICON: &str = "check-solid.ico";

/// Errors from the tray widget backend.
#[derive(Debug, thiserror::Error)]
pub enum TrayError {
    #[error("tray backend error: {0}")]
    Backend(String),
}

/// Everything the backend needs to render the tray icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayView {
    /// Path to the .ico shown in the notification area.
    pub icon: PathBuf,
    /// Hover text.
    pub tooltip: String,
    /// Context menu.
    pub menu: MenuModel,
}

/// Rendering capability the controller drives.
pub trait TrayBackend {
    fn show(&mut self, view: &TrayView) -> Result<(), TrayError>;
    fn update(&mut self, view: &TrayView) -> Result<(), TrayError>;
    fn shutdown(&mut self);
}

/// Host collaborators invoked from menu callbacks.
///
/// The browser launcher, version checker, and registry registrar live in
/// the host application; the controller only calls into them.
pub trait HostHooks {
    /// Open the web UI in a browser.
    fn open_ui(&self);
    /// Ask the version checker for a new release.
    fn check_update(&self);
    /// Reflect the start-at-login flag into the platform autostart
    /// mechanism. Returns `false` when the change was not applied.
    fn apply_startup(&self, enabled: bool) -> bool;
}

/// Partial updates pushed to a live tray from the host side.
#[derive(Debug, Clone)]
pub enum TrayUpdate {
    /// Recompute the check mark on the startup entry.
    RefreshStartupIcon,
    /// Update availability changed; re-derive icon and tooltip.
    SetUpdateAvailable(bool),
    /// Replace the hover text.
    SetTooltip(String),
    /// Tear the tray down.
    Shutdown,
}

/// Handle for pushing [`TrayUpdate`]s from the host to the tray thread.
///
/// Sends are best-effort: a tray that never started (or already shut down)
/// just drops them.
#[derive(Debug, Clone)]
pub struct TrayHandle {
    tx: mpsc::Sender<TrayUpdate>,
}

impl TrayHandle {
    /// Creates a handle with its receiving end for the tray thread.
    pub fn channel() -> (Self, mpsc::Receiver<TrayUpdate>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    pub fn refresh_startup_icon(&self) {
        let _ = self.tx.send(TrayUpdate::RefreshStartupIcon);
    }

    pub fn set_update_available(&self, available: bool) {
        let _ = self.tx.send(TrayUpdate::SetUpdateAvailable(available));
    }

    pub fn set_tooltip(&self, tooltip: String) {
        let _ = self.tx.send(TrayUpdate::SetTooltip(tooltip));
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(TrayUpdate::Shutdown);
    }
}

/// Resolves icon assets under `<install>/data/interfaces/<theme>/images/`.
#[derive(Debug, Clone)]
pub struct IconAssets {
    image_dir: PathBuf,
}

impl IconAssets {
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
        }
    }

    /// Asset directory for an interface theme.
    pub fn for_interface(install_dir: impl Into<PathBuf>, interface: &str) -> Self {
        let image_dir = install_dir
            .into()
            .join("data")
            .join("interfaces")
            .join(interface)
            .join("images");
        Self { image_dir }
    }

    pub fn logo(&self) -> PathBuf {
        self.image_dir.join(LOGO_ICON)
    }

    pub fn logo_update(&self) -> PathBuf {
        self.image_dir.join(LOGO_UPDATE_ICON)
    }

    pub fn check(&self) -> PathBuf {
        self.image_dir.join(CHECK_ICON)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    NotStarted,
    Running,
    ShutDown,
}

/// Menu-driven tray icon controller.
pub struct TrayController {
    state: Arc<AppState>,
    hooks: Box<dyn HostHooks>,
    backend: Box<dyn TrayBackend>,
    assets: IconAssets,
    view: TrayView,
    status: Status,
}

impl TrayController {
    pub fn new(
        assets: IconAssets,
        state: Arc<AppState>,
        hooks: Box<dyn HostHooks>,
        backend: Box<dyn TrayBackend>,
    ) -> Self {
        let startup_icon = state.start_at_login().then(|| assets.check());
        let view = TrayView {
            icon: Self::derive_icon(&assets, state.update_available()),
            tooltip: Self::derive_tooltip(state.update_available()),
            menu: MenuModel::build(startup_icon),
        };

        Self {
            state,
            hooks,
            backend,
            assets,
            view,
            status: Status::NotStarted,
        }
    }

    fn derive_icon(assets: &IconAssets, update_available: bool) -> PathBuf {
        if update_available {
            assets.logo_update()
        } else {
            assets.logo()
        }
    }

    fn derive_tooltip(update_available: bool) -> String {
        if update_available {
            format!("{PRODUCT} - Update Available!")
        } else {
            PRODUCT.to_string()
        }
    }

    /// Shows the tray icon. A backend failure is logged and leaves the
    /// controller not started; the host keeps running without a tray.
    pub fn start(&mut self) {
        if self.status != Status::NotStarted {
            return;
        }

        tracing::info!("launching system tray icon");
        match self.backend.show(&self.view) {
            Ok(()) => self.status = Status::Running,
            Err(e) => tracing::error!("unable to launch system tray icon: {e}"),
        }
    }

    /// Tears the tray icon down. Terminal.
    pub fn shutdown(&mut self) {
        if self.status == Status::Running {
            self.backend.shutdown();
        }
        self.status = Status::ShutDown;
    }

    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// Current desired appearance.
    pub fn view(&self) -> &TrayView {
        &self.view
    }

    /// Dispatches a menu click. Runs synchronously on the tray thread.
    pub fn handle(&mut self, key: MenuKey) {
        match key {
            MenuKey::Open => self.hooks.open_ui(),
            MenuKey::ToggleStartup => {
                let enabled = self.state.toggle_start_at_login();
                self.refresh_startup_icon();
                if !self.hooks.apply_startup(enabled) {
                    tracing::warn!(
                        enabled,
                        "start-at-login change was not applied to the platform"
                    );
                }
            }
            MenuKey::CheckUpdate => self.hooks.check_update(),
            MenuKey::ApplyUpdate => {
                if self.state.update_available() {
                    self.state.raise(Signal::Update);
                } else {
                    // Transient feedback only; no state change.
                    self.view.tooltip = format!("{PRODUCT} - No Update Available");
                    self.push();
                }
            }
            MenuKey::Restart => self.state.raise(Signal::Restart),
        }
    }

    /// Called when the user closes the tray icon itself.
    pub fn on_quit(&mut self) {
        self.state.raise(Signal::Shutdown);
    }

    /// Applies a partial update from the host side.
    pub fn apply(&mut self, update: TrayUpdate) {
        match update {
            TrayUpdate::RefreshStartupIcon => self.refresh_startup_icon(),
            TrayUpdate::SetUpdateAvailable(available) => {
                self.state.set_update_available(available);
                self.view.icon = Self::derive_icon(&self.assets, available);
                self.view.tooltip = Self::derive_tooltip(available);
                self.push();
            }
            TrayUpdate::SetTooltip(tooltip) => {
                self.view.tooltip = tooltip;
                self.push();
            }
            TrayUpdate::Shutdown => self.shutdown(),
        }
    }

    /// Recomputes the check mark on the startup entry from the flag.
    pub fn refresh_startup_icon(&mut self) {
        let icon = self.state.start_at_login().then(|| self.assets.check());
        self.view
            .menu
            .set_icon(MenuKey::ToggleStartup, icon.as_deref());
        self.push();
    }

    fn push(&mut self) {
        if self.status != Status::Running {
            tracing::debug!("tray not running, skipping re-render");
            return;
        }
        if let Err(e) = self.backend.update(&self.view) {
            tracing::error!("unable to update system tray icon: {e}");
        }
    }
}
