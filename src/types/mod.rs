// webview-shell shared type definitions
// Each submodule defines types used across the application.

pub mod bridge;
pub mod errors;
pub mod file_chooser;
pub mod navigation;
pub mod permission;
pub mod request;
pub mod settings;
pub mod view;
