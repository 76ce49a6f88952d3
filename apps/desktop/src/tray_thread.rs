//! Windows tray widget backend and its event loop thread.
//!
//! The `tray-icon` widget must live on a thread that pumps win32 messages,
//! so the controller is built and driven entirely on a dedicated thread
//! here. Menu clicks are handled synchronously on that thread; the host
//! talks to it through the `TrayUpdate` channel.

use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use cormorant_state::AppState;
use cormorant_tray::{
    HostHooks, IconAssets, MenuEntry, MenuKey, TrayBackend, TrayController, TrayError, TrayUpdate,
    TrayView,
};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::platform::run_return::EventLoopExtRunReturn;
use tao::platform::windows::EventLoopBuilderExtWindows;
use tray_icon::menu::{IconMenuItem, Menu, MenuEvent, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, MouseButton, TrayIcon, TrayIconBuilder, TrayIconEvent};

/// What a rendered menu id maps back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrayAction {
    Menu(MenuKey),
    Quit,
}

type IdMap = HashMap<MenuId, TrayAction>;

/// `TrayBackend` over the `tray-icon` widget.
struct WidgetBackend {
    tray: Option<TrayIcon>,
    ids: Arc<Mutex<IdMap>>,
}

impl WidgetBackend {
    fn build_menu(&self, view: &TrayView) -> Result<Menu, TrayError> {
        let menu = Menu::new();
        let mut ids = IdMap::new();

        for entry in view.menu.entries() {
            match entry {
                MenuEntry::Separator => {
                    menu.append(&PredefinedMenuItem::separator()).map_err(wrap)?;
                }
                MenuEntry::Item {
                    key, label, icon, ..
                } => {
                    let icon = icon
                        .as_deref()
                        .map(|p| tray_icon::menu::Icon::from_path(p, None))
                        .transpose()
                        .map_err(wrap)?;
                    let item = IconMenuItem::new(label, true, icon, None);
                    menu.append(&item).map_err(wrap)?;
                    ids.insert(item.id().clone(), TrayAction::Menu(*key));
                }
            }
        }

        // The widget-level quit entry; closing the tray this way is the
        // shutdown path.
        menu.append(&PredefinedMenuItem::separator()).map_err(wrap)?;
        let quit = MenuItem::new("Quit", true, None);
        menu.append(&quit).map_err(wrap)?;
        ids.insert(quit.id().clone(), TrayAction::Quit);

        *self.ids.lock().unwrap() = ids;
        Ok(menu)
    }
}

fn wrap(e: impl std::fmt::Display) -> TrayError {
    TrayError::Backend(e.to_string())
}

impl TrayBackend for WidgetBackend {
    fn show(&mut self, view: &TrayView) -> Result<(), TrayError> {
        let menu = self.build_menu(view)?;
        let icon = Icon::from_path(&view.icon, None).map_err(wrap)?;

        let tray = TrayIconBuilder::new()
            .with_icon(icon)
            .with_tooltip(&view.tooltip)
            .with_menu(Box::new(menu))
            .build()
            .map_err(wrap)?;

        self.tray = Some(tray);
        Ok(())
    }

    fn update(&mut self, view: &TrayView) -> Result<(), TrayError> {
        let Some(tray) = &self.tray else {
            return Err(TrayError::Backend("tray icon not shown".into()));
        };

        let menu = self.build_menu(view)?;
        let icon = Icon::from_path(&view.icon, None).map_err(wrap)?;

        tray.set_icon(Some(icon)).map_err(wrap)?;
        tray.set_tooltip(Some(&view.tooltip)).map_err(wrap)?;
        tray.set_menu(Some(Box::new(menu)));
        Ok(())
    }

    fn shutdown(&mut self) {
        self.tray = None;
    }
}

/// Spawns the tray thread.
///
/// The controller is constructed on the thread because the widget handle is
/// not `Send`. A failed tray launch leaves the thread draining updates so
/// the host side never blocks; everything else keeps working headless.
/// Failure to spawn the thread at all is logged and reported as `None` —
/// the host then simply runs without a tray.
pub fn spawn(
    assets: IconAssets,
    state: Arc<AppState>,
    hooks: Box<dyn HostHooks + Send>,
    update_rx: mpsc::Receiver<TrayUpdate>,
) -> Option<std::thread::JoinHandle<()>> {
    match std::thread::Builder::new()
        .name("tray".into())
        .spawn(move || run_tray_loop(assets, state, hooks, update_rx))
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::error!("unable to spawn the tray thread: {e}");
            None
        }
    }
}

fn run_tray_loop(
    assets: IconAssets,
    state: Arc<AppState>,
    hooks: Box<dyn HostHooks + Send>,
    update_rx: mpsc::Receiver<TrayUpdate>,
) {
    let ids: Arc<Mutex<IdMap>> = Arc::new(Mutex::new(IdMap::new()));
    let backend = WidgetBackend {
        tray: None,
        ids: Arc::clone(&ids),
    };

    let mut controller = TrayController::new(assets, state, hooks, Box::new(backend));

    let mut event_loop = EventLoopBuilder::new().with_any_thread(true).build();

    controller.start();

    let menu_events = MenuEvent::receiver();
    let tray_events = TrayIconEvent::receiver();

    event_loop.run_return(move |_event, _target, control_flow| {
        *control_flow = ControlFlow::WaitUntil(Instant::now() + Duration::from_millis(100));

        // Double-clicking the tray icon triggers the menu's default entry.
        while let Ok(event) = tray_events.try_recv() {
            if let TrayIconEvent::DoubleClick {
                button: MouseButton::Left,
                ..
            } = event
            {
                let key = controller.view().menu.default_key();
                if let Some(key) = key {
                    controller.handle(key);
                }
            }
        }

        while let Ok(event) = menu_events.try_recv() {
            let action = ids.lock().unwrap().get(&event.id).copied();
            match action {
                Some(TrayAction::Menu(key)) => controller.handle(key),
                Some(TrayAction::Quit) => {
                    controller.on_quit();
                    controller.shutdown();
                    *control_flow = ControlFlow::Exit;
                }
                None => {}
            }
        }

        while let Ok(update) = update_rx.try_recv() {
            let stop = matches!(update, TrayUpdate::Shutdown);
            controller.apply(update);
            if stop {
                *control_flow = ControlFlow::Exit;
            }
        }
    });

    tracing::debug!("tray thread exiting");
}
