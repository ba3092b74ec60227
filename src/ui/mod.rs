//! Desktop UI layer.
//!
//! Uses `wry` for the browser surface and `tao` for the window:
//! - Windows: WebView2
//! - Linux: WebKitGTK
//! - macOS: WKWebView
//!
//! Page events reach Rust through `window.ipc.postMessage()` from an injected
//! bridge script.

pub mod shell_window;
