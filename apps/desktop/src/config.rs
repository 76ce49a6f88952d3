//! Desktop shim configuration.
//!
//! Configuration is stored as TOML:
//! - Windows: `%APPDATA%/cormorant/desktop.toml`
//! - Linux: `~/.config/cormorant/desktop.toml`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Desktop host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the web server binds to.
    #[serde(default = "default_http_host")]
    pub http_host: String,

    /// Web server port.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// URL root of the web UI.
    #[serde(default = "default_http_root")]
    pub http_root: String,

    /// Interface theme; selects the icon asset directory.
    #[serde(default = "default_interface")]
    pub interface: String,

    /// Open the web UI in a browser on startup.
    #[serde(default = "default_true")]
    pub launch_browser: bool,

    /// Start Cormorant at login (mirrors the registry Run-key entry).
    #[serde(default)]
    pub launch_startup: bool,
}

fn default_http_host() -> String {
    "0.0.0.0".into()
}

fn default_http_port() -> u16 {
    8181
}

fn default_http_root() -> String {
    "/".into()
}

fn default_interface() -> String {
    "default".into()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_host: default_http_host(),
            http_port: default_http_port(),
            http_root: default_http_root(),
            interface: default_interface(),
            launch_browser: true,
            launch_startup: false,
        }
    }
}

impl Config {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("cormorant").join("desktop.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cormorant")
            .join("desktop.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.http_host, "0.0.0.0");
        assert_eq!(config.http_port, 8181);
        assert_eq!(config.http_root, "/");
        assert_eq!(config.interface, "default");
        assert!(config.launch_browser);
        assert!(!config.launch_startup);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = Config {
            http_host: "127.0.0.1".into(),
            http_port: 8282,
            http_root: "/cormorant".into(),
            interface: "dark".into(),
            launch_browser: false,
            launch_startup: true,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.http_host, "127.0.0.1");
        assert_eq!(parsed.http_port, 8282);
        assert_eq!(parsed.http_root, "/cormorant");
        assert_eq!(parsed.interface, "dark");
        assert!(!parsed.launch_browser);
        assert!(parsed.launch_startup);
    }

    #[test]
    fn config_partial_toml() {
        // Only specify the port, rest should use defaults.
        let toml_str = "http_port = 9090";
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.http_port, 9090);
        assert_eq!(config.http_host, "0.0.0.0");
        assert!(!config.launch_startup);
    }

    #[test]
    fn config_path_not_empty() {
        let path = config_path().unwrap();
        assert!(path.to_string_lossy().contains("cormorant"));
    }

    #[test]
    fn config_save_and_read_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("desktop.toml");

        let config = Config {
            launch_startup: true,
            ..Config::default()
        };

        // Write manually since save() uses config_path().
        let content = toml::to_string_pretty(&config).unwrap();
        std::fs::write(&path, &content).unwrap();

        let loaded: Config = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(loaded.launch_startup);
    }
}
