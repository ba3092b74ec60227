use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// OS-level runtime permissions the shell may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsPermission {
    FineLocation,
    CoarseLocation,
    Camera,
    RecordAudio,
}

impl OsPermission {
    /// Short human-readable name, used in prompts and logs.
    pub fn label(&self) -> &'static str {
        match self {
            OsPermission::FineLocation => "precise location",
            OsPermission::CoarseLocation => "approximate location",
            OsPermission::Camera => "camera",
            OsPermission::RecordAudio => "microphone",
        }
    }
}

/// Question shown in the host's permission dialog.
pub fn prompt_text(permissions: &[OsPermission]) -> String {
    let labels: Vec<&str> = permissions.iter().map(|p| p.label()).collect();
    format!("Allow this app to use your {}?", labels.join(" and "))
}

/// Capture resources a page may ask the engine for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaResource {
    VideoCapture,
    AudioCapture,
    ProtectedMediaId,
    MidiSysex,
}

impl MediaResource {
    /// The OS permission backing this resource, if any.
    pub fn required_permission(&self) -> Option<OsPermission> {
        match self {
            MediaResource::VideoCapture => Some(OsPermission::Camera),
            MediaResource::AudioCapture => Some(OsPermission::RecordAudio),
            MediaResource::ProtectedMediaId | MediaResource::MidiSysex => None,
        }
    }
}

/// Per-permission outcome of an OS permission dialog.
///
/// A permission missing from the map was not granted (e.g. the dialog was dismissed).
pub type PermissionResults = HashMap<OsPermission, bool>;
