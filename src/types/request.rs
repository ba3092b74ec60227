use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three kinds of request that wait on an asynchronous OS result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    FileChooser,
    Geolocation,
    Media,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::FileChooser => write!(f, "file chooser"),
            RequestKind::Geolocation => write!(f, "geolocation"),
            RequestKind::Media => write!(f, "media"),
        }
    }
}

/// Identifies one registration of a pending request.
///
/// Handed to the OS along with the request and echoed back with the result,
/// so a result can be matched against the request it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
