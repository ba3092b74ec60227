//! Screen controller for webview-shell.
//!
//! Owns the browser surface and the bridges around it, and walks the screen
//! through its lifecycle: create, pause/resume, destroy. Hosts forward engine
//! events through [`NavigationClient`], [`ChromeClient`] and
//! [`ActivityResultHandler`].

use tracing::{debug, error, info, warn};

use crate::client::{ActivityResultHandler, ChromeClient, NavigationClient};
use crate::host::{
    CustomViewCallback, FileChooserCallback, GeolocationCallback, OsServices, PermissionRequest,
    Screen, ScreenFactory,
};
use crate::managers::file_chooser_manager::{FileChooserManager, FileChooserManagerTrait};
use crate::managers::geolocation_manager::{GeolocationManager, GeolocationManagerTrait};
use crate::managers::media_permission_manager::{MediaPermissionManager, MediaPermissionManagerTrait};
use crate::services::error_boundary::{guard, guard_with};
use crate::services::navigation_bridge::NavigationBridge;
use crate::services::popup_bridge::PopupBridge;
use crate::services::settings_engine::{self, SettingsEngineTrait};
use crate::types::errors::{BridgeError, HostError, ShellError};
use crate::types::file_chooser::{FileChooserParams, FilePickerResult};
use crate::types::navigation::{
    BackAction, NavigationDecision, NewWindowDisposition, NewWindowRequest, SameDocumentChange,
};
use crate::types::permission::PermissionResults;
use crate::types::request::{RequestId, RequestKind};
use crate::types::settings::ShellSettings;
use crate::types::view::CustomView;

/// Where the screen is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Initialized,
    Created,
    /// Startup failed; the host should close the window.
    Finished,
    Destroyed,
}

pub struct ShellController {
    settings: ShellSettings,
    build_time_url: Option<String>,
    factory: Box<dyn ScreenFactory>,
    os: Box<dyn OsServices>,
    screen: Option<Screen>,
    state: LifecycleState,
    navigation: NavigationBridge,
    popups: PopupBridge,
    files: FileChooserManager,
    geolocation: GeolocationManager,
    media: MediaPermissionManager,
    back_interception: bool,
    paused: bool,
    start_url: Option<String>,
}

impl ShellController {
    pub fn new(settings: ShellSettings, factory: Box<dyn ScreenFactory>, os: Box<dyn OsServices>) -> Self {
        let popups = PopupBridge::new(settings.browser.support_multiple_windows);
        Self {
            settings,
            build_time_url: settings_engine::BUILD_TIME_URL.map(str::to_string),
            factory,
            os,
            screen: None,
            state: LifecycleState::Initialized,
            navigation: NavigationBridge::new(),
            popups,
            files: FileChooserManager::new(),
            geolocation: GeolocationManager::new(),
            media: MediaPermissionManager::new(),
            back_interception: true,
            paused: false,
            start_url: None,
        }
    }

    /// Loads settings through `engine`. A bad config file is reported with a
    /// notice and replaced by defaults.
    pub fn from_engine(
        engine: &mut dyn SettingsEngineTrait,
        factory: Box<dyn ScreenFactory>,
        mut os: Box<dyn OsServices>,
    ) -> Self {
        let settings = match engine.load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(path = engine.get_config_path(), error = %e, "config unusable, using defaults");
                os.show_notice(&config_notice(&ShellError::Config(e)));
                ShellSettings::default()
            }
        };
        Self::new(settings, factory, os)
    }

    /// Overrides the compile-time destination. `None` means unset.
    pub fn with_build_time_url(mut self, url: Option<&str>) -> Self {
        self.build_time_url = url.map(str::to_string);
        self
    }

    pub fn on_create(&mut self) {
        if self.state != LifecycleState::Initialized {
            warn!(state = ?self.state, "on_create called twice, ignoring");
            return;
        }

        let failure = guard_with(
            "on_create",
            || self.create_screen().map(|_| None),
            |e| Some(matches!(e, ShellError::Config(_)).then(|| config_notice(e))),
        );

        if let Some(notice) = failure {
            if let Some(message) = notice {
                self.os.show_notice(&message);
            }
            self.state = LifecycleState::Finished;
            info!("screen finished after failed startup");
        }
    }

    fn create_screen(&mut self) -> Result<(), ShellError> {
        let url = settings_engine::resolve_start_url(
            self.build_time_url.as_deref(),
            self.settings.start_url.as_deref(),
        )?;

        let mut screen = self.factory.build_screen(&self.settings.browser)?;
        screen.views.set_overlay_visible(true);
        let loaded = screen.surface.load_url(&url);
        // Kept even on load failure so on_destroy can release it.
        self.screen = Some(screen);
        loaded?;

        info!(%url, "screen created");
        self.start_url = Some(url);
        self.state = LifecycleState::Created;
        Ok(())
    }

    pub fn on_pause(&mut self) {
        if !self.is_active("on_pause") {
            return;
        }
        if let Some(screen) = self.screen.as_mut() {
            screen.surface.on_pause();
            self.paused = true;
        }
    }

    pub fn on_resume(&mut self) {
        if !self.is_active("on_resume") {
            return;
        }
        if let Some(screen) = self.screen.as_mut() {
            screen.surface.on_resume();
            self.paused = false;
        }
    }

    /// The host window was hidden (minimized, suspended) or shown again.
    /// Only changes reach the surface; repeated reports are dropped.
    pub fn on_visibility_changed(&mut self, visible: bool) {
        if visible != self.paused {
            return;
        }
        if visible {
            self.on_resume();
        } else {
            self.on_pause();
        }
    }

    /// Resolves every pending callback negatively and releases the surface.
    /// Safe to call more than once.
    pub fn on_destroy(&mut self) {
        if self.state == LifecycleState::Destroyed {
            debug!("on_destroy called again, ignoring");
            return;
        }
        self.state = LifecycleState::Destroyed;

        let cancelled = [
            self.files.cancel_pending(),
            self.geolocation.cancel_pending(),
            self.media.cancel_pending(),
        ]
        .iter()
        .filter(|c| **c)
        .count();
        self.popups.release();

        if let Some(mut screen) = self.screen.take() {
            if let Err(e) = screen.surface.flush_cookies() {
                warn!(error = %e, "cookie flush failed");
            }
            if let Err(e) = screen.surface.load_url("about:blank") {
                warn!(error = %e, "failed to blank surface before teardown");
            }
            screen.surface.destroy();
        }
        info!(cancelled, "screen destroyed");
    }

    pub fn on_back_pressed(&mut self) -> BackAction {
        if !self.back_interception || !self.is_active("on_back_pressed") {
            return BackAction::DelegateToSystem;
        }

        let screen = &mut self.screen;
        let action = guard("on_back_pressed", BackAction::DelegateToSystem, || {
            let surface = &mut live_screen(screen)?.surface;
            if !surface.can_go_back() {
                return Ok(BackAction::DelegateToSystem);
            }
            surface.go_back()?;
            Ok(BackAction::Consumed)
        });

        if action == BackAction::DelegateToSystem {
            self.back_interception = false;
            debug!("no history left, back handling delegated to the system");
        }
        action
    }

    /// `pushState`, `replaceState` or `popstate` in the current page.
    pub fn on_same_document_navigation(&mut self, url: &str, change: SameDocumentChange) {
        if !self.is_active("on_same_document_navigation") {
            return;
        }
        if let Some(screen) = self.screen.as_mut() {
            debug!(url, ?change, "same-document navigation");
            screen.surface.on_same_document_navigation(url, change);
        }
    }

    /// First navigation inside a popup opened without a URL.
    pub fn on_popup_navigation(&mut self, url: &str) -> NavigationDecision {
        if !self.is_active("on_popup_navigation") {
            return NavigationDecision::Allow;
        }
        let screen = &mut self.screen;
        let popups = &mut self.popups;
        guard("on_popup_navigation", NavigationDecision::Allow, || {
            Ok(popups.popup_navigation(url, live_screen(screen)?.surface.as_mut())?)
        })
    }

    pub fn on_location_permission_result(&mut self, id: RequestId, results: PermissionResults) {
        let outcome = self.geolocation.complete(id, &results);
        settle("on_location_permission_result", outcome);
    }

    pub fn on_media_permission_result(&mut self, id: RequestId, results: PermissionResults) {
        let outcome = self.media.complete(id, &results);
        settle("on_media_permission_result", outcome);
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, LifecycleState::Finished | LifecycleState::Destroyed)
    }

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    /// The destination loaded by `on_create`.
    pub fn start_url(&self) -> Option<&str> {
        self.start_url.as_deref()
    }

    pub fn is_back_interception_enabled(&self) -> bool {
        self.back_interception
    }

    pub fn is_pending(&self, kind: RequestKind) -> bool {
        match kind {
            RequestKind::FileChooser => self.files.is_pending(),
            RequestKind::Geolocation => self.geolocation.is_pending(),
            RequestKind::Media => self.media.is_pending(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_custom_view_shown(&self) -> bool {
        self.popups.is_custom_view_shown()
    }

    pub fn is_first_load_pending(&self) -> bool {
        self.navigation.is_first_load_pending()
    }

    fn is_active(&self, event: &'static str) -> bool {
        if self.state == LifecycleState::Created {
            return true;
        }
        debug!(event, state = ?self.state, "screen not live, ignoring event");
        false
    }
}

fn live_screen(screen: &mut Option<Screen>) -> Result<&mut Screen, ShellError> {
    screen.as_mut().ok_or(ShellError::Host(HostError::SurfaceUnavailable))
}

fn config_notice(error: &ShellError) -> String {
    format!("Configuration error: {}", error)
}

/// Late or unmatched OS results are expected after a rejection or teardown.
fn settle<T>(operation: &'static str, outcome: Result<T, BridgeError>) {
    match outcome {
        Ok(_) => {}
        Err(e @ (BridgeError::StaleResult(..) | BridgeError::NoPendingRequest(_))) => {
            warn!(operation, error = %e, "ignoring OS result");
        }
        Err(e) => error!(operation, error = %e, "OS result could not be delivered"),
    }
}

impl NavigationClient for ShellController {
    fn should_override_url_loading(&mut self, url: &str) -> NavigationDecision {
        if !self.is_active("should_override_url_loading") {
            return NavigationDecision::Allow;
        }
        self.navigation.should_override(url, self.os.as_mut())
    }

    fn on_page_started(&mut self, url: &str) {
        if !self.is_active("on_page_started") {
            return;
        }
        if let Some(screen) = self.screen.as_mut() {
            screen.surface.on_page_committed(url);
            self.navigation.page_started(url, screen.views.as_mut());
        }
    }

    fn on_page_finished(&mut self, url: &str) {
        if !self.is_active("on_page_finished") {
            return;
        }
        if let Some(screen) = self.screen.as_mut() {
            self.navigation.page_finished(url, screen.views.as_mut());
        }
    }
}

impl ChromeClient for ShellController {
    fn on_progress_changed(&mut self, progress: i32) {
        if !self.is_active("on_progress_changed") {
            return;
        }
        if let Some(screen) = self.screen.as_mut() {
            self.navigation.progress_changed(progress, screen.views.as_mut());
        }
    }

    fn on_show_file_chooser(
        &mut self,
        callback: Box<dyn FileChooserCallback>,
        params: FileChooserParams,
    ) -> bool {
        if !self.is_active("on_show_file_chooser") {
            callback.on_receive_value(None);
            return false;
        }
        self.files.begin(callback, &params, self.os.as_mut())
    }

    fn on_geolocation_permissions_show_prompt(
        &mut self,
        origin: &str,
        callback: Box<dyn GeolocationCallback>,
    ) {
        if !self.is_active("on_geolocation_permissions_show_prompt") {
            callback.invoke(origin, false, false);
            return;
        }
        self.geolocation.show_prompt(origin, callback, self.os.as_mut());
    }

    fn on_permission_request(&mut self, request: Box<dyn PermissionRequest>) {
        if !self.is_active("on_permission_request") {
            request.deny();
            return;
        }
        self.media.on_request(request, self.os.as_mut());
    }

    fn on_permission_request_canceled(&mut self) {
        self.media.withdraw();
    }

    fn on_create_window(&mut self, request: NewWindowRequest) -> NewWindowDisposition {
        if !self.is_active("on_create_window") {
            return NewWindowDisposition::Blocked;
        }
        let screen = &mut self.screen;
        let popups = &mut self.popups;
        guard("on_create_window", NewWindowDisposition::Blocked, || {
            Ok(popups.create_window(request, live_screen(screen)?.surface.as_mut())?)
        })
    }

    fn on_show_custom_view(&mut self, view: CustomView, callback: Box<dyn CustomViewCallback>) {
        if !self.is_active("on_show_custom_view") {
            callback.on_custom_view_hidden();
            return;
        }
        let Some(screen) = self.screen.as_mut() else {
            callback.on_custom_view_hidden();
            return;
        };
        let popups = &mut self.popups;
        guard("on_show_custom_view", (), || {
            Ok(popups.show_custom_view(view, callback, screen.surface.as_mut(), screen.views.as_mut())?)
        });
    }

    fn on_hide_custom_view(&mut self) {
        if !self.is_active("on_hide_custom_view") {
            return;
        }
        let screen = &mut self.screen;
        let popups = &mut self.popups;
        let hidden = guard("on_hide_custom_view", false, || {
            let screen = live_screen(screen)?;
            Ok(popups.hide_custom_view(screen.surface.as_mut(), screen.views.as_mut())?)
        });
        if !hidden {
            debug!("hide requested with no custom view showing");
        }
    }
}

impl ActivityResultHandler for ShellController {
    fn on_file_chooser_result(&mut self, id: RequestId, result: FilePickerResult) {
        let outcome = self.files.complete(id, result);
        settle("on_file_chooser_result", outcome);
    }

    fn on_permissions_result(&mut self, id: RequestId, kind: RequestKind, results: PermissionResults) {
        match kind {
            RequestKind::Geolocation => self.on_location_permission_result(id, results),
            RequestKind::Media => self.on_media_permission_result(id, results),
            RequestKind::FileChooser => {
                warn!(%id, "permission result tagged as a file chooser request, ignoring");
            }
        }
    }
}
