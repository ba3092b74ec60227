use serde::Deserialize;

use super::errors::BridgeError;
use super::navigation::SameDocumentChange;
use super::permission::MediaResource;

/// Messages the page-side bridge script posts over `window.ipc`.
///
/// `id` fields are page-local counters used to route the answer back to the
/// promise that is waiting for it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BridgeMessage {
    /// Back key / mouse back button inside the page.
    Back,
    Progress { value: i32 },
    Fullscreen {
        active: bool,
        #[serde(default)]
        element: Option<String>,
    },
    GeolocationPrompt { id: u64, origin: String },
    PermissionRequest {
        id: u64,
        origin: String,
        resources: Vec<MediaResource>,
    },
    PermissionCancel { id: u64 },
    /// `pushState`/`replaceState`/`popstate` inside the current document.
    History { change: SameDocumentChange, url: String },
}

impl BridgeMessage {
    pub fn parse(body: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(body).map_err(|e| BridgeError::MalformedMessage(e.to_string()))
    }
}

/// Script that resolves a pending page-side permission promise.
pub fn resolve_script(id: u64, granted: bool) -> String {
    format!(
        "window.__wvs&&window.__wvs.resolve({},{})",
        id,
        if granted { "true" } else { "false" }
    )
}
