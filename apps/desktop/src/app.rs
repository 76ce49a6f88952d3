//! Host orchestrator — wires the tray and registrar to the signal loop.

use std::sync::Arc;

use cormorant_startup::LaunchSpec;
use cormorant_state::{AppState, Signal};
use cormorant_tray::{HostHooks, IconAssets, TrayHandle};

use crate::browser;
use crate::config::Config;

/// Host-side implementations of the tray's collaborator hooks.
pub struct DesktopHooks {
    config: Config,
}

impl DesktopHooks {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl HostHooks for DesktopHooks {
    fn open_ui(&self) {
        browser::launch(
            &self.config.http_host,
            self.config.http_port,
            &self.config.http_root,
        );
    }

    fn check_update(&self) {
        // The version checker is a separate component; the shim only pokes it.
        tracing::info!("update check requested from the tray");
    }

    fn apply_startup(&self, enabled: bool) -> bool {
        let spec = match LaunchSpec::current() {
            Ok(spec) => spec,
            Err(e) => {
                tracing::error!("could not build the startup launch command: {e}");
                return false;
            }
        };
        cormorant_startup::apply_startup(enabled, &spec)
    }
}

/// Runs the host until a lifecycle signal or Ctrl-C arrives.
pub async fn run(config: Config, nolaunch: bool) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(false, config.launch_startup));

    // Registry state can drift from the config flag (a failed write, or
    // another tool editing the Run key); surface it, don't reconcile.
    #[cfg(windows)]
    if config.launch_startup != cormorant_startup::is_registered() {
        tracing::warn!(
            configured = config.launch_startup,
            "start-at-login setting does not match the registry; toggle it from the tray to re-apply"
        );
    }

    if config.launch_browser && !nolaunch {
        browser::launch(&config.http_host, config.http_port, &config.http_root);
    }

    // -- Tray --
    let (tray_handle, update_rx) = TrayHandle::channel();
    let assets = IconAssets::for_interface(install_dir()?, &config.interface);
    let hooks = DesktopHooks::new(config.clone());

    #[cfg(windows)]
    let tray_thread = crate::tray_thread::spawn(
        assets,
        Arc::clone(&state),
        Box::new(hooks),
        update_rx,
    );

    #[cfg(not(windows))]
    let tray_thread: Option<std::thread::JoinHandle<()>> = {
        let _ = (assets, hooks, update_rx);
        tracing::info!("system tray is only available on Windows; running headless");
        None
    };

    tracing::info!("desktop shim ready");

    // -- Main loop: poll the lifecycle signal --
    let signal = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("SIGINT received, shutting down");
                break Signal::Shutdown;
            }
            _ = tokio::time::sleep(std::time::Duration::from_millis(100)) => {
                if let Some(signal) = state.take_signal() {
                    break signal;
                }
            }
        }
    };

    // -- Graceful shutdown --
    tray_handle.shutdown();
    if let Some(thread) = tray_thread {
        let _ = thread.join();
    }

    // Persist the flag the tray may have toggled.
    let mut config = config;
    if config.launch_startup != state.start_at_login() {
        config.launch_startup = state.start_at_login();
        config.save()?;
    }

    match signal {
        Signal::Update => {
            // The update was staged by the external updater; restarting
            // picks it up.
            tracing::info!("restarting to apply update");
            respawn()?;
        }
        Signal::Restart => {
            tracing::info!("restarting");
            respawn()?;
        }
        Signal::Shutdown => {
            tracing::info!("shutting down");
        }
    }

    Ok(())
}

/// Installation directory, resolved from the running executable.
fn install_dir() -> anyhow::Result<std::path::PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow::anyhow!("executable has no parent directory"))?;
    Ok(dir.to_path_buf())
}

/// Relaunches the current executable without reopening the web UI.
fn respawn() -> anyhow::Result<()> {
    let exe = std::env::current_exe()?;
    std::process::Command::new(exe)
        .arg(cormorant_startup::command::NOLAUNCH_FLAG)
        .spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_dir_resolves() {
        let dir = install_dir().unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn hooks_apply_startup_does_not_panic() {
        let hooks = DesktopHooks::new(Config::default());
        // On non-Windows this is the stub and reports false; on Windows it
        // writes and removes the real value. Either way it must not panic.
        let _ = hooks.apply_startup(false);
    }
}
