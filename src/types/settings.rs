use serde::{Deserialize, Serialize};

use crate::platform;

/// Top-level shell configuration, persisted as `shell.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShellSettings {
    /// Destination loaded on start. The compile-time `WEBSITE_URL` wins over this.
    pub start_url: Option<String>,
    pub window: WindowSettings,
    pub browser: BrowserSettings,
    pub logging: LoggingSettings,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            start_url: None,
            window: WindowSettings::default(),
            browser: BrowserSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Window chrome for desktop hosts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "WebView App".to_string(),
            width: 420,
            height: 860,
        }
    }
}

/// Capability flags applied to the browser surface once, at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrowserSettings {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub database_enabled: bool,
    pub allow_file_access: bool,
    pub allow_content_access: bool,
    /// Pinch/keyboard zoom.
    pub zoom_enabled: bool,
    pub display_zoom_controls: bool,
    pub use_wide_viewport: bool,
    pub load_with_overview_mode: bool,
    pub media_playback_requires_user_gesture: bool,
    pub mixed_content: MixedContentMode,
    pub cache_mode: CacheMode,
    pub geolocation_enabled: bool,
    /// When off, popups are blocked instead of collapsed into the main surface.
    pub support_multiple_windows: bool,
    pub javascript_can_open_windows_automatically: bool,
    pub user_agent_suffix: String,
    /// User agent to extend with the suffix. Unset means the platform
    /// engine's usual identification string.
    pub user_agent_base: Option<String>,
    pub accept_cookies: bool,
    pub accept_third_party_cookies: bool,
    pub devtools: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            database_enabled: true,
            allow_file_access: true,
            allow_content_access: true,
            zoom_enabled: true,
            display_zoom_controls: false,
            use_wide_viewport: true,
            load_with_overview_mode: true,
            media_playback_requires_user_gesture: false,
            mixed_content: MixedContentMode::AlwaysAllow,
            cache_mode: CacheMode::Default,
            geolocation_enabled: true,
            support_multiple_windows: false,
            javascript_can_open_windows_automatically: false,
            user_agent_suffix: "WebViewApp/1.0".to_string(),
            user_agent_base: None,
            accept_cookies: true,
            accept_third_party_cookies: true,
            devtools: cfg!(debug_assertions),
        }
    }
}

impl BrowserSettings {
    /// Full user agent: the configured base (or the platform default)
    /// followed by the suffix.
    pub fn user_agent(&self) -> String {
        let base = self
            .user_agent_base
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .unwrap_or(platform::DEFAULT_USER_AGENT);
        let suffix = self.user_agent_suffix.trim();
        if suffix.is_empty() {
            base.to_string()
        } else {
            format!("{} {}", base, suffix)
        }
    }
}

/// Handling of http subresources on https pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MixedContentMode {
    AlwaysAllow,
    NeverAllow,
    Compatibility,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CacheMode {
    Default,
    CacheElseNetwork,
    NoCache,
    CacheOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing-subscriber` filter directive; `RUST_LOG` overrides it.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}
