use serde::{Deserialize, Serialize};

/// Answer to "should the engine load this URL itself?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the browser surface load it.
    Allow,
    /// The shell took care of it; the surface must not load it.
    Handled,
}

/// Outcome of a back gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// The surface navigated back one step.
    Consumed,
    /// The system back action should run (usually closes the screen).
    DelegateToSystem,
}

/// Schemes that are handed to the OS instead of the browser surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExternalScheme {
    Tel,
    Mailto,
    Sms,
    Whatsapp,
}

impl ExternalScheme {
    /// Classifies `url` by its scheme. Scheme matching is case-insensitive.
    pub fn from_url(url: &str) -> Option<Self> {
        let (scheme, _) = url.trim_start().split_once(':')?;
        match scheme.to_ascii_lowercase().as_str() {
            "tel" => Some(ExternalScheme::Tel),
            "mailto" => Some(ExternalScheme::Mailto),
            "sms" => Some(ExternalScheme::Sms),
            "whatsapp" => Some(ExternalScheme::Whatsapp),
            _ => None,
        }
    }
}

/// A history change inside the current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SameDocumentChange {
    /// `history.pushState` or a fragment navigation.
    Push,
    /// `history.replaceState`.
    Replace,
    /// A `popstate`: the page moved along its own history.
    Pop,
}

/// Characters RFC 3986 never allows in a URI.
const NON_URI_CHARS: &[char] = &['"', '<', '>', '\\', '^', '`', '{', '|', '}'];

/// Whether `url` may be passed verbatim to an OS launcher.
///
/// Rejects whitespace, control characters and characters that cannot appear
/// in a URI. `&` and `%` stay allowed; `mailto:?subject=..&body=..` needs them.
pub fn is_launchable_uri(url: &str) -> bool {
    !url.is_empty()
        && !url
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || NON_URI_CHARS.contains(&c))
}

/// A request from the engine to open a secondary window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWindowRequest {
    /// Destination, when the engine already knows it (`target=_blank` links).
    pub url: Option<String>,
    pub user_gesture: bool,
}

/// What the shell did with a new-window request. The engine never gets a
/// real second window in any case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewWindowDisposition {
    /// Multiple windows are disabled; the request was dropped.
    Blocked,
    /// The destination was loaded in the primary surface.
    Collapsed(String),
    /// No destination yet; the next popup navigation will be redirected.
    AwaitingNavigation,
}
