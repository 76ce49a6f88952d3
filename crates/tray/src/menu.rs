//! Context menu model for the system tray.
//!
//! The menu is a fixed sequence, but entries are addressed by [`MenuKey`]
//! rather than position so state-driven updates (the startup check mark)
//! cannot drift out of sync with the rendered order.

use std::path::{Path, PathBuf};

use crate::PRODUCT;

/// Actions that can be triggered from the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKey {
    /// Open the web UI in a browser.
    Open,
    /// Toggle the start-at-login setting.
    ToggleStartup,
    /// Ask the version checker for a new release.
    CheckUpdate,
    /// Apply an available update.
    ApplyUpdate,
    /// Restart the application.
    Restart,
}

/// A single menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        key: MenuKey,
        label: String,
        /// Optional decoration icon (.ico path).
        icon: Option<PathBuf>,
        /// Marks the default action, invoked when the tray icon itself is
        /// double-clicked.
        default: bool,
    },
    Separator,
}

/// Ordered context menu; order is display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModel {
    entries: Vec<MenuEntry>,
}

impl MenuModel {
    /// Builds the standard Cormorant menu.
    ///
    /// `startup_icon` decorates the "Start at Login" entry when the setting
    /// is enabled.
    pub fn build(startup_icon: Option<PathBuf>) -> Self {
        let entries = vec![
            MenuEntry::Item {
                key: MenuKey::Open,
                label: format!("Open {PRODUCT}"),
                icon: None,
                default: true,
            },
            MenuEntry::Separator,
            MenuEntry::Item {
                key: MenuKey::ToggleStartup,
                label: format!("Start {PRODUCT} at Login"),
                icon: startup_icon,
                default: false,
            },
            MenuEntry::Separator,
            MenuEntry::Item {
                key: MenuKey::CheckUpdate,
                label: "Check for Updates".into(),
                icon: None,
                default: false,
            },
            MenuEntry::Item {
                key: MenuKey::ApplyUpdate,
                label: "Update".into(),
                icon: None,
                default: false,
            },
            MenuEntry::Item {
                key: MenuKey::Restart,
                label: "Restart".into(),
                icon: None,
                default: false,
            },
        ];
        Self { entries }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Returns the entry for the given key, if present.
    pub fn entry(&self, key: MenuKey) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| match e {
            MenuEntry::Item { key: k, .. } => *k == key,
            MenuEntry::Separator => false,
        })
    }

    /// Replaces the decoration icon on the entry for `key`.
    pub fn set_icon(&mut self, key: MenuKey, icon: Option<&Path>) {
        for entry in &mut self.entries {
            if let MenuEntry::Item { key: k, icon: i, .. } = entry {
                if *k == key {
                    *i = icon.map(Path::to_path_buf);
                }
            }
        }
    }

    /// Returns the key of the default entry, if one is marked.
    pub fn default_key(&self) -> Option<MenuKey> {
        self.entries.iter().find_map(|e| match e {
            MenuEntry::Item {
                key, default: true, ..
            } => Some(*key),
            _ => None,
        })
    }

    /// Returns the decoration icon on the entry for `key`.
    pub fn icon(&self, key: MenuKey) -> Option<&Path> {
        match self.entry(key) {
            Some(MenuEntry::Item { icon, .. }) => icon.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(model: &MenuModel) -> Vec<String> {
        model
            .entries()
            .iter()
            .map(|e| match e {
                MenuEntry::Item { label, .. } => label.clone(),
                MenuEntry::Separator => "---".into(),
            })
            .collect()
    }

    #[test]
    fn menu_order_is_fixed() {
        let model = MenuModel::build(None);
        assert_eq!(
            labels(&model),
            vec![
                "Open Cormorant",
                "---",
                "Start Cormorant at Login",
                "---",
                "Check for Updates",
                "Update",
                "Restart",
            ]
        );
    }

    #[test]
    fn open_is_the_default_entry() {
        let model = MenuModel::build(None);
        assert_eq!(model.default_key(), Some(MenuKey::Open));
    }

    #[test]
    fn startup_icon_applied_at_build() {
        let icon = PathBuf::from(r"C:\Cormorant\images\check-solid.ico");
        let model = MenuModel::build(Some(icon.clone()));
        assert_eq!(model.icon(MenuKey::ToggleStartup), Some(icon.as_path()));

        let model = MenuModel::build(None);
        assert_eq!(model.icon(MenuKey::ToggleStartup), None);
    }

    #[test]
    fn set_icon_by_key() {
        let mut model = MenuModel::build(None);
        let icon = PathBuf::from("check-solid.ico");

        model.set_icon(MenuKey::ToggleStartup, Some(&icon));
        assert_eq!(model.icon(MenuKey::ToggleStartup), Some(icon.as_path()));

        model.set_icon(MenuKey::ToggleStartup, None);
        assert_eq!(model.icon(MenuKey::ToggleStartup), None);
    }

    #[test]
    fn only_startup_entry_changes() {
        let mut model = MenuModel::build(None);
        model.set_icon(MenuKey::ToggleStartup, Some(Path::new("check-solid.ico")));
        assert_eq!(model.icon(MenuKey::Open), None);
        assert_eq!(model.icon(MenuKey::Restart), None);
    }
}
