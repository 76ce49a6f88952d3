//! Web UI browser launch.

/// Builds the browsable UI address. A wildcard bind address is rewritten to
/// loopback since it is not itself browsable.
fn ui_url(host: &str, port: u16, root: &str) -> String {
    let host = if host.is_empty() || host == "0.0.0.0" {
        "127.0.0.1"
    } else {
        host
    };
    format!("http://{host}:{port}{root}")
}

/// Opens the web UI in the default browser.
///
/// A failed launch is logged and otherwise ignored; the UI stays reachable
/// by typing the address manually.
pub fn launch(host: &str, port: u16, root: &str) {
    let url = ui_url(host, port, root);
    tracing::info!(url, "opening web UI in browser");

    #[cfg(windows)]
    {
        // `start` is a cmd builtin; the empty string is the window title slot.
        if let Err(e) = std::process::Command::new("cmd")
            .args(["/c", "start", "", &url])
            .spawn()
        {
            tracing::error!("could not open browser: {e}");
        }
    }

    #[cfg(not(windows))]
    {
        tracing::warn!(url, "browser launch is only supported on Windows");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_host_is_rewritten() {
        assert_eq!(ui_url("0.0.0.0", 8181, "/"), "http://127.0.0.1:8181/");
        assert_eq!(ui_url("", 8181, "/"), "http://127.0.0.1:8181/");
    }

    #[test]
    fn explicit_host_is_kept() {
        assert_eq!(
            ui_url("192.168.1.5", 8282, "/cormorant"),
            "http://192.168.1.5:8282/cormorant"
        );
    }
}
