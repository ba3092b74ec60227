// webview-shell platform glue for Linux
// Config: ~/.config/webview-shell
// Data:   ~/.local/share/webview-shell
// External links are handed to `xdg-open`.

use std::env;
use std::path::PathBuf;
use std::process::Command;

const APP_DIR: &str = "webview-shell";

/// Identification string of the system webview engine.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

/// Returns the configuration directory on Linux.
/// Uses `$XDG_CONFIG_HOME/webview-shell` if set, otherwise `~/.config/webview-shell`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join(APP_DIR)
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join(APP_DIR)
    }
}

/// Returns the data directory on Linux.
/// Uses `$XDG_DATA_HOME/webview-shell` if set, otherwise `~/.local/share/webview-shell`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg).join(APP_DIR)
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".local").join("share").join(APP_DIR)
    }
}

/// Builds the command that hands `url` to the desktop's default handler.
pub fn view_command(url: &str) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(url);
    cmd
}
