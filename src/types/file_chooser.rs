use serde::{Deserialize, Serialize};

use super::errors::BridgeError;

/// Parameters the engine attaches to a file-chooser request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChooserParams {
    /// MIME types or extensions from the input's `accept` attribute.
    pub accept_types: Vec<String>,
    pub allow_multiple: bool,
    /// The input asked for direct capture (`capture` attribute).
    pub capture: bool,
}

impl FileChooserParams {
    /// MIME filter for the picker; `*/*` when the page did not restrict types.
    pub fn mime_filter(&self) -> String {
        let types: Vec<&str> = self
            .accept_types
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect();
        if types.is_empty() {
            "*/*".to_string()
        } else {
            types.join(",")
        }
    }
}

/// Result of the OS file-selection activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePickerResult {
    Accepted(PickerPayload),
    Cancelled,
}

/// Selection returned by the picker.
///
/// A multi-select picker fills `clip_items`; a single pick sets `data`.
/// When `clip_items` is present it wins, matching the picker contract.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerPayload {
    pub data: Option<String>,
    pub clip_items: Option<Vec<String>>,
}

impl PickerPayload {
    pub fn single(uri: impl Into<String>) -> Self {
        Self { data: Some(uri.into()), clip_items: None }
    }

    pub fn multiple<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: None,
            clip_items: Some(uris.into_iter().map(Into::into).collect()),
        }
    }
}

impl FilePickerResult {
    /// Converts the picker result into the value the engine callback expects.
    ///
    /// `Ok(None)` means cancelled; `Ok(Some(vec![]))` means accepted with nothing selected.
    pub fn into_uris(self) -> Result<Option<Vec<String>>, BridgeError> {
        let payload = match self {
            FilePickerResult::Cancelled => return Ok(None),
            FilePickerResult::Accepted(p) => p,
        };

        let uris = match payload.clip_items {
            Some(items) => items,
            None => payload.data.into_iter().collect(),
        };

        if let Some(blank) = uris.iter().position(|u| u.trim().is_empty()) {
            return Err(BridgeError::MalformedResult(format!(
                "empty locator at position {}",
                blank
            )));
        }
        Ok(Some(uris))
    }
}
