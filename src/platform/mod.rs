// webview-shell platform abstraction
// Provides platform-specific paths and the OS "view" launcher for Windows, macOS, and Linux.
//
// Uses `cfg(target_os)` for conditional compilation to select the correct
// platform-specific implementation at compile time.

use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::types::errors::HostError;
use crate::types::navigation::is_launchable_uri;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as imp;
#[cfg(target_os = "macos")]
use macos as imp;
#[cfg(target_os = "windows")]
use windows as imp;

/// Base user agent of the platform's webview engine (WebKitGTK, WKWebView, WebView2).
pub const DEFAULT_USER_AGENT: &str = imp::DEFAULT_USER_AGENT;

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `~/.config/webview-shell` (or `$XDG_CONFIG_HOME/webview-shell`)
/// - **macOS**: `~/Library/Application Support/WebviewShell`
/// - **Windows**: `%APPDATA%/WebviewShell`
pub fn get_config_dir() -> PathBuf {
    imp::get_config_dir()
}

/// Returns the directory the browser engine keeps cookies and local storage in.
///
/// - **Linux**: `~/.local/share/webview-shell` (or `$XDG_DATA_HOME/webview-shell`)
/// - **macOS**: `~/Library/Application Support/WebviewShell/WebData`
/// - **Windows**: `%LOCALAPPDATA%/WebviewShell/WebView2`
pub fn get_data_dir() -> PathBuf {
    imp::get_data_dir()
}

/// Hands a non-web URL (`tel:`, `mailto:`, ...) to the OS default handler.
///
/// Only a failure to spawn the launcher is reported; its exit status is
/// collected in the background.
pub fn open_external(url: &str) -> Result<(), HostError> {
    if !is_launchable_uri(url) {
        return Err(HostError::UnsafeUrl(url.to_string()));
    }

    let mut cmd = imp::view_command(url);
    cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    spawn_reaped(cmd)
        .map(|_| ())
        .map_err(|e| HostError::ActivityNotFound(format!("{}: {}", url, e)))
}

/// Spawns `cmd` and waits for it on a helper thread so it never lingers as a zombie.
fn spawn_reaped(mut cmd: Command) -> io::Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = cmd.spawn()?;
    thread::Builder::new()
        .name("launcher-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => {
                debug!(%status, "launcher exited");
                Some(status)
            }
            Err(e) => {
                warn!(error = %e, "failed to reap launcher");
                None
            }
        })
}
