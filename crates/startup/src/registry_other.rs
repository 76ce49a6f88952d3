//! Stub registrar for non-Windows builds.
//!
//! Auto-start registration only exists on Windows. The stub keeps the
//! workspace compiling elsewhere and reports every request as failed.

use crate::command::LaunchSpec;
use crate::StartupError;

pub fn apply_startup(_enabled: bool, _spec: &LaunchSpec) -> bool {
    tracing::warn!("{}", StartupError::Unsupported);
    false
}

pub fn is_registered() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn stub_always_fails() {
        let spec = LaunchSpec {
            exe: PathBuf::from("/usr/bin/cormorant"),
            script: None,
            args: Vec::new(),
        };
        assert!(!apply_startup(true, &spec));
        assert!(!apply_startup(false, &spec));
        assert!(!is_registered());
    }
}
