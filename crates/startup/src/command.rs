//! Launch command-line construction for the Run-key value.

use std::path::{Path, PathBuf};

use crate::StartupError;

/// Argument appended to the relaunch command so the server does not pop the
/// web UI open again at every login.
pub const NOLAUNCH_FLAG: &str = "--nolaunch";

/// Console interpreter names mapped to their windowless variants, so a
/// source-run install does not flash a console window at login.
const WINDOWLESS_INTERPRETERS: &[(&str, &str)] = &[("python.exe", "pythonw.exe")];

/// How to relaunch the application at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    /// Executable to invoke (the frozen binary, or the interpreter for a
    /// source-run install).
    pub exe: PathBuf,
    /// Main script path when running from source; `None` when frozen.
    pub script: Option<PathBuf>,
    /// Extra arguments, placed before the nolaunch flag.
    pub args: Vec<String>,
}

impl LaunchSpec {
    /// Builds the spec for the currently running (frozen) executable.
    pub fn current() -> Result<Self, StartupError> {
        let exe = std::env::current_exe().map_err(StartupError::CurrentExe)?;
        Ok(Self {
            exe,
            script: None,
            args: Vec::new(),
        })
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Builds the registry command line.
    ///
    /// Every token is double-quoted (registry Run values take the full
    /// command as one string, and install paths routinely contain spaces),
    /// and console interpreter names are swapped for their windowless
    /// variants.
    pub fn command_line(&self) -> String {
        let mut tokens = vec![quote(&self.exe)];
        if let Some(script) = &self.script {
            tokens.push(quote(script));
        }
        for arg in &self.args {
            tokens.push(quote_str(arg));
        }
        tokens.push(quote_str(NOLAUNCH_FLAG));

        let mut cmd = tokens.join(" ");
        for (console, windowless) in WINDOWLESS_INTERPRETERS {
            cmd = cmd.replace(console, windowless);
        }
        cmd
    }
}

fn quote(path: &Path) -> String {
    quote_str(&path.display().to_string())
}

fn quote_str(token: &str) -> String {
    format!("\"{token}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_run_command_line() {
        let spec = LaunchSpec {
            exe: PathBuf::from(r"C:\Program Files\Tautulli\python.exe"),
            script: Some(PathBuf::from(r"C:\Tautulli\Tautulli.py")),
            args: Vec::new(),
        };
        assert_eq!(
            spec.command_line(),
            r#""C:\Program Files\Tautulli\pythonw.exe" "C:\Tautulli\Tautulli.py" "--nolaunch""#
        );
    }

    #[test]
    fn frozen_command_line_has_no_script() {
        let spec = LaunchSpec {
            exe: PathBuf::from(r"C:\Program Files\Cormorant\Cormorant.exe"),
            script: None,
            args: Vec::new(),
        };
        assert_eq!(
            spec.command_line(),
            r#""C:\Program Files\Cormorant\Cormorant.exe" "--nolaunch""#
        );
    }

    #[test]
    fn extra_args_precede_nolaunch() {
        let spec = LaunchSpec {
            exe: PathBuf::from(r"C:\Cormorant\Cormorant.exe"),
            script: None,
            args: vec!["--quiet".into()],
        };
        assert_eq!(
            spec.command_line(),
            r#""C:\Cormorant\Cormorant.exe" "--quiet" "--nolaunch""#
        );
    }

    #[test]
    fn command_line_is_stable() {
        let spec = LaunchSpec {
            exe: PathBuf::from(r"C:\Cormorant\Cormorant.exe"),
            script: None,
            args: Vec::new(),
        };
        assert_eq!(spec.command_line(), spec.command_line());
    }

    #[test]
    fn current_resolves_exe() {
        let spec = LaunchSpec::current().unwrap();
        assert!(spec.script.is_none());
        assert!(!spec.exe.as_os_str().is_empty());
    }
}
