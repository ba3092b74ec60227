//! webview-shell: a single-screen app that wraps one web destination in an
//! embedded browser surface.
//!
//! The crate exposes every module for use by the binary and the integration tests.
//! The desktop host in [`ui`] is only built with the `gui` feature.

pub mod app;
pub mod client;
pub mod host;
pub mod managers;
pub mod platform;
pub mod services;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
