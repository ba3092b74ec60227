// webview-shell services
// Services hold the screen's cross-cutting logic: navigation and popup bridging, settings, logging, failure guards.

pub mod error_boundary;
pub mod logging;
pub mod navigation_bridge;
pub mod popup_bridge;
pub mod settings_engine;
