//! Navigation event bridge.
//!
//! Decides which navigations leave the app, and drives the progress bar and
//! the one-shot loading overlay from page lifecycle events.

use tracing::{debug, info, warn};

use crate::host::{OsServices, ScreenViews};
use crate::types::navigation::{is_launchable_uri, ExternalScheme, NavigationDecision};

/// Notice shown when no installed app accepts an external link.
pub const NO_HANDLER_NOTICE: &str = "No app can open this link";

pub struct NavigationBridge {
    first_load_pending: bool,
}

impl NavigationBridge {
    pub fn new() -> Self {
        Self {
            first_load_pending: true,
        }
    }

    /// Pure classification, safe to call from engine handler threads.
    pub fn classify(url: &str) -> Option<ExternalScheme> {
        ExternalScheme::from_url(url)
    }

    /// Hands external schemes to the OS; everything else loads in the surface.
    pub fn should_override(&self, url: &str, os: &mut dyn OsServices) -> NavigationDecision {
        let Some(scheme) = Self::classify(url) else {
            return NavigationDecision::Allow;
        };

        if !is_launchable_uri(url) {
            warn!(?scheme, url, "refusing to launch malformed external link");
            os.show_notice(NO_HANDLER_NOTICE);
            return NavigationDecision::Handled;
        }

        match os.start_view(url) {
            Ok(()) => info!(?scheme, url, "handed navigation to the OS"),
            Err(e) => {
                warn!(?scheme, url, error = %e, "no handler for external navigation");
                os.show_notice(NO_HANDLER_NOTICE);
            }
        }
        NavigationDecision::Handled
    }

    pub fn page_started(&mut self, url: &str, views: &mut dyn ScreenViews) {
        debug!(url, "page started");
        views.set_progress_visible(true);
    }

    /// Returns `true` when this finish dismissed the loading overlay.
    pub fn page_finished(&mut self, url: &str, views: &mut dyn ScreenViews) -> bool {
        debug!(url, "page finished");
        views.set_progress_visible(false);
        if !self.first_load_pending {
            return false;
        }
        self.first_load_pending = false;
        views.set_overlay_visible(false);
        info!(url, "first page loaded, overlay dismissed");
        true
    }

    pub fn progress_changed(&mut self, progress: i32, views: &mut dyn ScreenViews) {
        views.set_progress(progress.clamp(0, 100) as u8);
    }

    pub fn is_first_load_pending(&self) -> bool {
        self.first_load_pending
    }
}

impl Default for NavigationBridge {
    fn default() -> Self {
        Self::new()
    }
}
