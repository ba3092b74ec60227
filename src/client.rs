//! Engine-facing event interfaces.
//!
//! One method per engine event, split the way browser engines split their
//! client objects. [`ShellController`](crate::app::ShellController) is the only
//! implementation; hosts forward engine events through these traits.

use crate::host::{CustomViewCallback, FileChooserCallback, GeolocationCallback, PermissionRequest};
use crate::types::file_chooser::{FileChooserParams, FilePickerResult};
use crate::types::navigation::{NavigationDecision, NewWindowDisposition, NewWindowRequest};
use crate::types::permission::PermissionResults;
use crate::types::request::{RequestId, RequestKind};
use crate::types::view::CustomView;

/// Page navigation events.
pub trait NavigationClient {
    fn should_override_url_loading(&mut self, url: &str) -> NavigationDecision;
    fn on_page_started(&mut self, url: &str);
    fn on_page_finished(&mut self, url: &str);
}

/// Browser chrome events: progress, pickers, permissions, windows, fullscreen.
pub trait ChromeClient {
    fn on_progress_changed(&mut self, progress: i32);
    /// Returns `true` when the shell took ownership of `callback`.
    fn on_show_file_chooser(
        &mut self,
        callback: Box<dyn FileChooserCallback>,
        params: FileChooserParams,
    ) -> bool;
    fn on_geolocation_permissions_show_prompt(
        &mut self,
        origin: &str,
        callback: Box<dyn GeolocationCallback>,
    );
    fn on_permission_request(&mut self, request: Box<dyn PermissionRequest>);
    fn on_permission_request_canceled(&mut self);
    fn on_create_window(&mut self, request: NewWindowRequest) -> NewWindowDisposition;
    fn on_show_custom_view(&mut self, view: CustomView, callback: Box<dyn CustomViewCallback>);
    fn on_hide_custom_view(&mut self);
}

/// Results of OS activities started through [`OsServices`](crate::host::OsServices).
pub trait ActivityResultHandler {
    fn on_file_chooser_result(&mut self, id: RequestId, result: FilePickerResult);
    fn on_permissions_result(&mut self, id: RequestId, kind: RequestKind, results: PermissionResults);
}
