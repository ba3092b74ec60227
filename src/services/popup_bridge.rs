//! Popup and fullscreen bridge.
//!
//! Secondary windows are collapsed into the primary surface (or blocked when
//! multiple windows are off). The engine's fullscreen view replaces the
//! surface until the engine asks for it to be hidden.

use tracing::{debug, info, warn};

use crate::host::{BrowserSurface, CustomViewCallback, ScreenViews};
use crate::types::errors::HostError;
use crate::types::navigation::{NavigationDecision, NewWindowDisposition, NewWindowRequest};
use crate::types::view::CustomView;

pub struct PopupBridge {
    multiple_windows: bool,
    interceptor_armed: bool,
    custom_view: Option<(CustomView, Box<dyn CustomViewCallback>)>,
}

impl PopupBridge {
    pub fn new(multiple_windows: bool) -> Self {
        Self {
            multiple_windows,
            interceptor_armed: false,
            custom_view: None,
        }
    }

    pub fn create_window(
        &mut self,
        request: NewWindowRequest,
        surface: &mut dyn BrowserSurface,
    ) -> Result<NewWindowDisposition, HostError> {
        if !self.multiple_windows {
            debug!(url = ?request.url, "popup blocked");
            return Ok(NewWindowDisposition::Blocked);
        }

        match request.url {
            Some(url) => {
                surface.load_url(&url)?;
                info!(%url, "popup collapsed into primary surface");
                Ok(NewWindowDisposition::Collapsed(url))
            }
            None => {
                self.interceptor_armed = true;
                debug!("popup interceptor armed");
                Ok(NewWindowDisposition::AwaitingNavigation)
            }
        }
    }

    /// First navigation of an intercepted popup: load it in the primary surface.
    pub fn popup_navigation(
        &mut self,
        url: &str,
        surface: &mut dyn BrowserSurface,
    ) -> Result<NavigationDecision, HostError> {
        if !self.interceptor_armed {
            return Ok(NavigationDecision::Allow);
        }
        self.interceptor_armed = false;
        surface.load_url(url)?;
        info!(url, "popup navigation redirected to primary surface");
        Ok(NavigationDecision::Handled)
    }

    pub fn is_interceptor_armed(&self) -> bool {
        self.interceptor_armed
    }

    pub fn show_custom_view(
        &mut self,
        view: CustomView,
        callback: Box<dyn CustomViewCallback>,
        surface: &mut dyn BrowserSurface,
        views: &mut dyn ScreenViews,
    ) -> Result<(), HostError> {
        if self.custom_view.is_some() {
            warn!(label = %view.label, "custom view already showing, refusing another");
            callback.on_custom_view_hidden();
            return Ok(());
        }

        if let Err(e) = views.show_custom_view(&view) {
            callback.on_custom_view_hidden();
            return Err(e);
        }
        self.custom_view = Some((view, callback));
        views.set_progress_visible(false);
        views.set_overlay_visible(false);
        surface.set_visible(false)?;
        Ok(())
    }

    /// Returns `false` when no custom view was showing.
    pub fn hide_custom_view(
        &mut self,
        surface: &mut dyn BrowserSurface,
        views: &mut dyn ScreenViews,
    ) -> Result<bool, HostError> {
        let Some((view, callback)) = self.custom_view.take() else {
            return Ok(false);
        };
        let removed = views.hide_custom_view();
        let restored = surface.set_visible(true);
        callback.on_custom_view_hidden();
        debug!(label = %view.label, "custom view hidden");
        removed?;
        restored?;
        Ok(true)
    }

    pub fn is_custom_view_shown(&self) -> bool {
        self.custom_view.is_some()
    }

    /// Signals a still-shown custom view as hidden without touching the views.
    pub fn release(&mut self) {
        self.interceptor_armed = false;
        if let Some((_, callback)) = self.custom_view.take() {
            callback.on_custom_view_hidden();
        }
    }
}
