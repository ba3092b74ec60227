//! Host capability interfaces.
//!
//! The shell never talks to a browser engine or an OS directly. A host (the
//! `wry`/`tao` window in [`crate::ui`], or [`scripted::ScriptedHost`] for tests
//! and the console demo) implements these traits, and the
//! [`ShellController`](crate::app::ShellController) drives them.
//!
//! Engine callback objects are consumed by value (`self: Box<Self>`) so each
//! one can be resolved at most once.

pub mod scripted;

use crate::types::errors::HostError;
use crate::types::file_chooser::FileChooserParams;
use crate::types::navigation::SameDocumentChange;
use crate::types::permission::{MediaResource, OsPermission};
use crate::types::request::{RequestId, RequestKind};
use crate::types::settings::BrowserSettings;
use crate::types::view::CustomView;

/// The embedded browser surface.
pub trait BrowserSurface {
    fn load_url(&mut self, url: &str) -> Result<(), HostError>;
    fn can_go_back(&self) -> bool;
    fn go_back(&mut self) -> Result<(), HostError>;
    /// Suspend timers and media.
    fn on_pause(&mut self);
    fn on_resume(&mut self);
    fn set_visible(&mut self, visible: bool) -> Result<(), HostError>;
    /// Observes a committed page load. Hosts whose engine tracks history
    /// itself can ignore it.
    fn on_page_committed(&mut self, _url: &str) {}
    /// Observes a history change inside the current document.
    fn on_same_document_navigation(&mut self, _url: &str, _change: SameDocumentChange) {}
    fn flush_cookies(&mut self) -> Result<(), HostError>;
    /// Detach from the view hierarchy and release engine resources.
    fn destroy(self: Box<Self>);
}

/// Native views layered around the browser surface.
pub trait ScreenViews {
    fn set_progress_visible(&mut self, visible: bool);
    fn set_progress(&mut self, progress: u8);
    fn set_overlay_visible(&mut self, visible: bool);
    fn show_custom_view(&mut self, view: &CustomView) -> Result<(), HostError>;
    fn hide_custom_view(&mut self) -> Result<(), HostError>;
}

/// Everything `on_create` builds.
pub struct Screen {
    pub surface: Box<dyn BrowserSurface>,
    pub views: Box<dyn ScreenViews>,
}

/// Builds the view hierarchy with the browser configuration applied.
pub trait ScreenFactory {
    fn build_screen(&mut self, settings: &BrowserSettings) -> Result<Screen, HostError>;
}

/// OS-level activities and dialogs.
///
/// `launch_file_picker` and `request_permissions` return as soon as the
/// activity is started; the host later reports the outcome through
/// [`ActivityResultHandler`](crate::client::ActivityResultHandler) with the same `id`.
pub trait OsServices {
    /// Generic "view" intent: dialer, mail client, messenger, external browser.
    fn start_view(&mut self, url: &str) -> Result<(), HostError>;
    fn launch_file_picker(&mut self, id: RequestId, params: &FileChooserParams) -> Result<(), HostError>;
    fn check_permission(&self, permission: OsPermission) -> bool;
    fn request_permissions(
        &mut self,
        id: RequestId,
        kind: RequestKind,
        permissions: &[OsPermission],
    ) -> Result<(), HostError>;
    /// Transient user-visible notice (toast).
    fn show_notice(&mut self, message: &str);
}

/// Engine callback for file-chooser results. `None` means cancelled.
pub trait FileChooserCallback {
    fn on_receive_value(self: Box<Self>, uris: Option<Vec<String>>);
}

impl<F> FileChooserCallback for F
where
    F: FnOnce(Option<Vec<String>>),
{
    fn on_receive_value(self: Box<Self>, uris: Option<Vec<String>>) {
        (*self)(uris)
    }
}

/// Engine callback for a geolocation prompt.
pub trait GeolocationCallback {
    fn invoke(self: Box<Self>, origin: &str, allow: bool, retain: bool);
}

impl<F> GeolocationCallback for F
where
    F: FnOnce(&str, bool, bool),
{
    fn invoke(self: Box<Self>, origin: &str, allow: bool, retain: bool) {
        (*self)(origin, allow, retain)
    }
}

/// An in-page request for capture resources.
pub trait PermissionRequest {
    fn origin(&self) -> &str;
    fn resources(&self) -> &[MediaResource];
    fn grant(self: Box<Self>, resources: &[MediaResource]);
    fn deny(self: Box<Self>);
}

/// Engine callback told that the custom (fullscreen) view is gone.
pub trait CustomViewCallback {
    fn on_custom_view_hidden(self: Box<Self>);
}

impl<F> CustomViewCallback for F
where
    F: FnOnce(),
{
    fn on_custom_view_hidden(self: Box<Self>) {
        (*self)()
    }
}
