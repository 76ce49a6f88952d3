//! Windows Run-key access via `winreg`.

use winreg::enums::{HKEY_CURRENT_USER, KEY_READ, KEY_WRITE};
use winreg::RegKey;

use crate::command::LaunchSpec;
use crate::{StartupError, PRODUCT, RUN_KEY};

/// Adds or removes the Cormorant value under the per-user Run key.
///
/// Returns `true` on success. Failures are logged with the underlying OS
/// error and reported as `false`; they never propagate.
pub fn apply_startup(enabled: bool, spec: &LaunchSpec) -> bool {
    let result = if enabled {
        register(spec)
    } else {
        unregister()
    };

    match result {
        Ok(()) => {
            if enabled {
                tracing::info!("added {PRODUCT} to the Windows startup registry key");
            } else {
                tracing::info!("removed {PRODUCT} from the Windows startup registry key");
            }
            true
        }
        Err(e) => {
            tracing::error!("failed to update the Windows startup registry key: {e}");
            false
        }
    }
}

/// Reports whether a Run-key value for Cormorant currently exists.
pub fn is_registered() -> bool {
    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    match hkcu.open_subkey_with_flags(RUN_KEY, KEY_READ) {
        Ok(key) => key.get_value::<String, _>(PRODUCT).is_ok(),
        Err(_) => false,
    }
}

fn register(spec: &LaunchSpec) -> Result<(), StartupError> {
    let command = spec.command_line();
    let hkcu = RegKey::predef(HKEY_CURRENT_USER);

    // create_subkey opens the key when it already exists.
    let (key, _disposition) = hkcu.create_subkey(RUN_KEY).map_err(|e| {
        StartupError::OpenKey {
            key: RUN_KEY,
            source: e,
        }
    })?;

    // Setting the value replaces any previous one, so at most one entry
    // exists for the product at a time.
    key.set_value(PRODUCT, &command)
        .map_err(|e| StartupError::SetValue {
            name: PRODUCT,
            source: e,
        })?;

    tracing::debug!(command, "startup command registered");
    Ok(())
}

fn unregister() -> Result<(), StartupError> {
    let hkcu = RegKey::predef(HKEY_CURRENT_USER);
    let key = hkcu
        .open_subkey_with_flags(RUN_KEY, KEY_WRITE)
        .map_err(|e| StartupError::OpenKey {
            key: RUN_KEY,
            source: e,
        })?;

    key.delete_value(PRODUCT)
        .map_err(|e| StartupError::DeleteValue {
            name: PRODUCT,
            source: e,
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // All tests touch the same registry value; serialize them.
    static REGISTRY_LOCK: Mutex<()> = Mutex::new(());

    fn test_spec() -> LaunchSpec {
        LaunchSpec {
            exe: PathBuf::from(r"C:\Cormorant\Cormorant.exe"),
            script: None,
            args: Vec::new(),
        }
    }

    // These touch the real HKCU hive of the test user; they clean up after
    // themselves and only ever write the product's own value name.

    #[test]
    fn register_then_unregister_round_trip() {
        let _guard = REGISTRY_LOCK.lock().unwrap();
        let spec = test_spec();

        assert!(apply_startup(true, &spec));
        assert!(is_registered());

        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let key = hkcu.open_subkey(RUN_KEY).unwrap();
        let value: String = key.get_value(PRODUCT).unwrap();
        assert_eq!(value, spec.command_line());

        assert!(apply_startup(false, &spec));
        assert!(!is_registered());
    }

    #[test]
    fn register_twice_keeps_single_entry() {
        let _guard = REGISTRY_LOCK.lock().unwrap();
        let spec = test_spec();

        assert!(apply_startup(true, &spec));
        assert!(apply_startup(true, &spec));

        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let key = hkcu.open_subkey(RUN_KEY).unwrap();
        let value: String = key.get_value(PRODUCT).unwrap();
        assert_eq!(value, spec.command_line());

        assert!(apply_startup(false, &spec));
    }

    #[test]
    fn unregister_missing_value_reports_failure() {
        let _guard = REGISTRY_LOCK.lock().unwrap();
        let spec = test_spec();
        apply_startup(false, &spec);

        // Value is gone; deleting again fails but must not panic.
        assert!(!apply_startup(false, &spec));
    }
}
