// webview-shell platform glue for macOS
// Config: ~/Library/Application Support/WebviewShell
// Data:   ~/Library/Application Support/WebviewShell/WebData

use std::env;
use std::path::PathBuf;
use std::process::Command;

fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Identification string of the system webview engine.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15";

/// `~/Library/Application Support/WebviewShell`
pub fn get_config_dir() -> PathBuf {
    home_dir()
        .join("Library")
        .join("Application Support")
        .join("WebviewShell")
}

/// `~/Library/Application Support/WebviewShell/WebData`
pub fn get_data_dir() -> PathBuf {
    get_config_dir().join("WebData")
}

/// Builds the command that hands `url` to Launch Services.
pub fn view_command(url: &str) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(url);
    cmd
}
