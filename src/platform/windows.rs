// webview-shell platform glue for Windows
// Config: %APPDATA%/WebviewShell
// Data:   %LOCALAPPDATA%/WebviewShell/WebView2

use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Identification string of the system webview engine.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0";

/// `%APPDATA%/WebviewShell`
pub fn get_config_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join("WebviewShell")
}

/// `%LOCALAPPDATA%/WebviewShell/WebView2`
pub fn get_data_dir() -> PathBuf {
    let local_appdata = env::var("LOCALAPPDATA")
        .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Local"));
    PathBuf::from(local_appdata).join("WebviewShell").join("WebView2")
}

/// Builds the command that hands `url` to the shell's protocol handlers.
///
/// `explorer.exe` resolves the registered handler itself. No `cmd.exe` is
/// involved, so `&` and `%` in the link are never interpreted.
pub fn view_command(url: &str) -> Command {
    let mut cmd = Command::new("explorer.exe");
    cmd.arg(url);
    cmd
}
