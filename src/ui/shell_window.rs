//! Desktop host built on `wry` + `tao`.
//!
//! Architecture:
//! - The main webview is the browser surface. The loading overlay and the
//!   progress bar are child webviews layered over it.
//! - `with_initialization_script(BRIDGE_JS)` injects the page bridge into every
//!   document. It reports back keys, progress, fullscreen and permission
//!   prompts via `window.ipc.postMessage()`.
//! - Engine handlers never touch the controller. They classify, or forward a
//!   [`UserEvent`] to the event loop, which owns the [`ShellController`].

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Fullscreen, Window, WindowBuilder};
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::{debug, error, info, warn};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{NewWindowResponse, PageLoadEvent, Rect, WebContext, WebView, WebViewBuilder};

use crate::app::ShellController;
use crate::client::{ActivityResultHandler, ChromeClient, NavigationClient};
use crate::host::{
    BrowserSurface, OsServices, PermissionRequest, Screen, ScreenFactory, ScreenViews,
};
use crate::managers::history_tracker::HistoryTracker;
use crate::platform;
use crate::services::logging;
use crate::services::navigation_bridge::NavigationBridge;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::bridge::{resolve_script, BridgeMessage};
use crate::types::errors::HostError;
use crate::types::file_chooser::FileChooserParams;
use crate::types::navigation::{BackAction, NewWindowRequest, SameDocumentChange};
use crate::types::permission::{prompt_text, MediaResource, OsPermission, PermissionResults};
use crate::types::request::{RequestId, RequestKind};
use crate::types::settings::BrowserSettings;
use crate::types::view::CustomView;

const BRIDGE_JS: &str = include_str!("../../resources/ui/bridge.js");
const LOADING_HTML: &str = include_str!("../../resources/ui/loading.html");
const PROGRESS_HTML: &str = include_str!("../../resources/ui/progress.html");

const PROGRESS_HEIGHT: f64 = 3.0;
const EXIT_FULLSCREEN_JS: &str = "window.__wvs&&window.__wvs.exitFullscreen()";
const PAUSE_MEDIA_JS: &str =
    "document.querySelectorAll('video,audio').forEach(function(m){m.pause()})";

#[derive(Debug)]
enum UserEvent {
    /// A `tel:`/`mailto:`/... navigation the handler already cancelled.
    ExternalNavigation(String),
    PageStarted(String),
    PageFinished(String),
    NewWindow(String),
    Bridge(BridgeMessage),
    PermissionAnswer {
        id: RequestId,
        kind: RequestKind,
        permissions: Vec<OsPermission>,
        granted: bool,
    },
}

fn forward(proxy: &EventLoopProxy<UserEvent>, event: UserEvent) {
    if proxy.send_event(event).is_err() {
        debug!("event loop closed, dropping engine event");
    }
}

fn engine_error(e: wry::Error) -> HostError {
    HostError::EngineError(e.to_string())
}

// ─── Shared webview handles ───

#[derive(Default)]
struct Webviews {
    main: Option<WebView>,
    overlay: Option<WebView>,
    progress: Option<WebView>,
    /// The page's fullscreen element lives inside the main webview.
    custom_view_active: bool,
    queued_notices: Vec<String>,
}

#[derive(Clone, Default)]
struct Handles(Rc<RefCell<Webviews>>);

impl Handles {
    fn with_main<T>(&self, f: impl FnOnce(&WebView) -> wry::Result<T>) -> Result<T, HostError> {
        let views = self.0.borrow();
        let main = views.main.as_ref().ok_or(HostError::SurfaceUnavailable)?;
        f(main).map_err(engine_error)
    }

    fn eval_main(&self, js: &str) {
        if let Err(e) = self.with_main(|wv| wv.evaluate_script(js)) {
            warn!(error = %e, "script evaluation failed");
        }
    }

    fn layout(&self, window: &Window) {
        let views = self.0.borrow();
        if let Some(overlay) = views.overlay.as_ref() {
            if let Err(e) = overlay.set_bounds(bounds(window, None)) {
                warn!(error = %e, "failed to resize overlay");
            }
        }
        if let Some(progress) = views.progress.as_ref() {
            if let Err(e) = progress.set_bounds(bounds(window, Some(PROGRESS_HEIGHT))) {
                warn!(error = %e, "failed to resize progress bar");
            }
        }
    }

    fn flush_notices(&self) {
        let queued = std::mem::take(&mut self.0.borrow_mut().queued_notices);
        for notice in queued {
            self.eval_main(&notice_script(&notice));
        }
    }
}

fn bounds(window: &Window, height: Option<f64>) -> Rect {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    Rect {
        position: LogicalPosition::new(0.0, 0.0).into(),
        size: LogicalSize::new(size.width, height.unwrap_or(size.height)).into(),
    }
}

fn notice_script(message: &str) -> String {
    let text = serde_json::Value::String(message.to_string());
    format!("window.__wvs&&window.__wvs.notice({})", text)
}

// ─── Browser surface ───

struct WrySurface {
    handles: Handles,
    history: HistoryTracker,
}

impl BrowserSurface for WrySurface {
    fn load_url(&mut self, url: &str) -> Result<(), HostError> {
        self.handles.with_main(|wv| wv.load_url(url))
    }

    fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    fn go_back(&mut self) -> Result<(), HostError> {
        if self.history.begin_back().is_none() {
            return Err(HostError::EngineError("no history entry to go back to".to_string()));
        }
        self.handles.with_main(|wv| wv.evaluate_script("history.back()"))
    }

    fn on_pause(&mut self) {
        self.handles.eval_main(PAUSE_MEDIA_JS);
    }

    fn on_resume(&mut self) {
        debug!("surface resumed");
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), HostError> {
        if !visible && self.handles.0.borrow().custom_view_active {
            return Ok(());
        }
        self.handles.with_main(|wv| wv.set_visible(visible))
    }

    fn on_page_committed(&mut self, url: &str) {
        self.history.record_commit(url);
    }

    fn on_same_document_navigation(&mut self, url: &str, change: SameDocumentChange) {
        self.history.record_same_document(url, change);
    }

    /// wry has no flush call. The engine commits its cookie store to the
    /// `WebContext` data directory when the main webview is dropped in
    /// `destroy`, which always runs after this.
    fn flush_cookies(&mut self) -> Result<(), HostError> {
        debug!("no explicit flush, engine persists cookies on drop");
        Ok(())
    }

    fn destroy(self: Box<Self>) {
        let mut views = self.handles.0.borrow_mut();
        views.progress.take();
        views.overlay.take();
        views.main.take();
        debug!("webviews released");
    }
}

// ─── Overlay, progress bar, fullscreen ───

struct DesktopViews {
    handles: Handles,
    window: Rc<Window>,
}

impl ScreenViews for DesktopViews {
    fn set_progress_visible(&mut self, visible: bool) {
        if let Some(progress) = self.handles.0.borrow().progress.as_ref() {
            if let Err(e) = progress.set_visible(visible) {
                warn!(error = %e, "failed to toggle progress bar");
            }
        }
    }

    fn set_progress(&mut self, progress: u8) {
        if let Some(bar) = self.handles.0.borrow().progress.as_ref() {
            if let Err(e) = bar.evaluate_script(&format!("setProgress({})", progress)) {
                warn!(error = %e, "failed to update progress bar");
            }
        }
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        if let Some(overlay) = self.handles.0.borrow().overlay.as_ref() {
            if let Err(e) = overlay.set_visible(visible) {
                warn!(error = %e, "failed to toggle loading overlay");
            }
        }
    }

    fn show_custom_view(&mut self, view: &CustomView) -> Result<(), HostError> {
        self.handles.0.borrow_mut().custom_view_active = true;
        self.window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        debug!(label = %view.label, "window fullscreen");
        Ok(())
    }

    fn hide_custom_view(&mut self) -> Result<(), HostError> {
        self.window.set_fullscreen(None);
        self.handles.0.borrow_mut().custom_view_active = false;
        Ok(())
    }
}

// ─── OS services ───

struct DesktopOs {
    handles: Handles,
    proxy: EventLoopProxy<UserEvent>,
    /// Window title, reused as the dialog title.
    title: String,
    /// Grants given in this session. Nothing is persisted.
    grants: Rc<RefCell<HashSet<OsPermission>>>,
}

impl OsServices for DesktopOs {
    fn start_view(&mut self, url: &str) -> Result<(), HostError> {
        platform::open_external(url)
    }

    fn launch_file_picker(&mut self, _id: RequestId, params: &FileChooserParams) -> Result<(), HostError> {
        Err(HostError::ActivityNotFound(format!(
            "file inputs ({}) are handled by the engine",
            params.mime_filter()
        )))
    }

    fn check_permission(&self, permission: OsPermission) -> bool {
        self.grants.borrow().contains(&permission)
    }

    /// Asks through a native dialog; the page never sees or answers it.
    /// The answer is posted back to the event loop so the controller is not
    /// re-entered.
    fn request_permissions(
        &mut self,
        id: RequestId,
        kind: RequestKind,
        permissions: &[OsPermission],
    ) -> Result<(), HostError> {
        let answer = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(&self.title)
            .set_description(prompt_text(permissions))
            .set_buttons(MessageButtons::YesNo)
            .show();
        let granted = matches!(answer, MessageDialogResult::Yes);
        info!(?kind, ?permissions, granted, "permission dialog answered");

        forward(
            &self.proxy,
            UserEvent::PermissionAnswer {
                id,
                kind,
                permissions: permissions.to_vec(),
                granted,
            },
        );
        Ok(())
    }

    fn show_notice(&mut self, message: &str) {
        if self.handles.0.borrow().main.is_none() {
            self.handles.0.borrow_mut().queued_notices.push(message.to_string());
            return;
        }
        self.handles.eval_main(&notice_script(message));
    }
}

/// A `getUserMedia` call waiting in the page.
struct PagePermissionRequest {
    id: u64,
    origin: String,
    resources: Vec<MediaResource>,
    handles: Handles,
}

impl PermissionRequest for PagePermissionRequest {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn resources(&self) -> &[MediaResource] {
        &self.resources
    }

    fn grant(self: Box<Self>, _resources: &[MediaResource]) {
        self.handles.eval_main(&resolve_script(self.id, true));
    }

    fn deny(self: Box<Self>) {
        self.handles.eval_main(&resolve_script(self.id, false));
    }
}

// ─── Screen factory ───

struct DesktopFactory {
    window: Rc<Window>,
    handles: Handles,
    proxy: EventLoopProxy<UserEvent>,
    context: WebContext,
}

impl DesktopFactory {
    fn child(&self, html: &str, bounds: Rect) -> Option<WebView> {
        match WebViewBuilder::new()
            .with_html(html)
            .with_bounds(bounds)
            .with_transparent(true)
            .with_visible(false)
            .build_as_child(&*self.window)
        {
            Ok(webview) => Some(webview),
            Err(e) => {
                warn!(error = %e, "child webview unavailable, continuing without it");
                None
            }
        }
    }
}

impl ScreenFactory for DesktopFactory {
    fn build_screen(&mut self, settings: &BrowserSettings) -> Result<Screen, HostError> {
        let nav_proxy = self.proxy.clone();
        let load_proxy = self.proxy.clone();
        let popup_proxy = self.proxy.clone();
        let ipc_proxy = self.proxy.clone();

        let mut builder = WebViewBuilder::new_with_web_context(&mut self.context)
            .with_initialization_script(BRIDGE_JS)
            .with_devtools(settings.devtools)
            .with_autoplay(!settings.media_playback_requires_user_gesture)
            .with_hotkeys_zoom(settings.zoom_enabled)
            .with_navigation_handler(move |url| {
                if NavigationBridge::classify(&url).is_none() {
                    return true;
                }
                forward(&nav_proxy, UserEvent::ExternalNavigation(url));
                false
            })
            .with_on_page_load_handler(move |event, url| {
                let event = match event {
                    PageLoadEvent::Started => UserEvent::PageStarted(url),
                    PageLoadEvent::Finished => UserEvent::PageFinished(url),
                };
                forward(&load_proxy, event);
            })
            .with_new_window_req_handler(move |url, _features| {
                forward(&popup_proxy, UserEvent::NewWindow(url));
                NewWindowResponse::Deny
            })
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                match BridgeMessage::parse(request.body()) {
                    Ok(message) => forward(&ipc_proxy, UserEvent::Bridge(message)),
                    Err(e) => warn!(error = %e, "dropping page message"),
                }
            });
        builder = builder.with_user_agent(&settings.user_agent());

        #[cfg(target_os = "linux")]
        let main = {
            use tao::platform::unix::WindowExtUnix;
            use wry::WebViewBuilderExtUnix;
            let vbox = self
                .window
                .default_vbox()
                .ok_or_else(|| HostError::BuildFailed("window has no GTK container".to_string()))?;
            builder.build_gtk(vbox)
        };

        #[cfg(not(target_os = "linux"))]
        let main = builder.build(&*self.window);

        let main = main.map_err(|e| HostError::BuildFailed(e.to_string()))?;

        let overlay = self.child(LOADING_HTML, bounds(&self.window, None));
        let progress = self.child(PROGRESS_HTML, bounds(&self.window, Some(PROGRESS_HEIGHT)));
        {
            let mut views = self.handles.0.borrow_mut();
            views.main = Some(main);
            views.overlay = overlay;
            views.progress = progress;
        }
        info!("webviews built");

        Ok(Screen {
            surface: Box::new(WrySurface {
                handles: self.handles.clone(),
                history: HistoryTracker::new(),
            }),
            views: Box::new(DesktopViews {
                handles: self.handles.clone(),
                window: self.window.clone(),
            }),
        })
    }
}

// ─── Event dispatch ───

/// Returns `true` when the window should close.
fn dispatch(
    controller: &mut ShellController,
    event: UserEvent,
    handles: &Handles,
    grants: &Rc<RefCell<HashSet<OsPermission>>>,
) -> bool {
    match event {
        UserEvent::ExternalNavigation(url) => {
            controller.should_override_url_loading(&url);
        }
        UserEvent::PageStarted(url) => controller.on_page_started(&url),
        UserEvent::PageFinished(url) => {
            controller.on_page_finished(&url);
            handles.flush_notices();
        }
        UserEvent::NewWindow(url) => {
            // wry does not report whether a gesture opened the window.
            let request = NewWindowRequest {
                url: Some(url).filter(|u| !u.is_empty() && u != "about:blank"),
                user_gesture: false,
            };
            let disposition = controller.on_create_window(request);
            debug!(?disposition, "new window request handled");
        }
        UserEvent::PermissionAnswer { id, kind, permissions, granted } => {
            if granted {
                grants.borrow_mut().extend(permissions.iter().copied());
            }
            let results: PermissionResults = permissions.iter().map(|p| (*p, granted)).collect();
            controller.on_permissions_result(id, kind, results);
        }
        UserEvent::Bridge(message) => return dispatch_bridge(controller, message, handles),
    }
    false
}

fn dispatch_bridge(controller: &mut ShellController, message: BridgeMessage, handles: &Handles) -> bool {
    match message {
        BridgeMessage::Back => {
            if controller.on_back_pressed() == BackAction::DelegateToSystem {
                controller.on_destroy();
                return true;
            }
        }
        BridgeMessage::Progress { value } => controller.on_progress_changed(value),
        BridgeMessage::Fullscreen { active: true, element } => {
            let view = CustomView::new(element.unwrap_or_else(|| "fullscreen".to_string()));
            let page = handles.clone();
            controller.on_show_custom_view(view, Box::new(move || page.eval_main(EXIT_FULLSCREEN_JS)));
        }
        BridgeMessage::Fullscreen { active: false, .. } => controller.on_hide_custom_view(),
        BridgeMessage::GeolocationPrompt { id, origin } => {
            let page = handles.clone();
            controller.on_geolocation_permissions_show_prompt(
                &origin,
                Box::new(move |_origin: &str, allow: bool, _retain: bool| {
                    page.eval_main(&resolve_script(id, allow))
                }),
            );
        }
        BridgeMessage::PermissionRequest { id, origin, resources } => {
            controller.on_permission_request(Box::new(PagePermissionRequest {
                id,
                origin,
                resources,
                handles: handles.clone(),
            }));
        }
        BridgeMessage::History { change, url } => controller.on_same_document_navigation(&url, change),
        BridgeMessage::PermissionCancel { id } => {
            debug!(id, "page withdrew media request");
            controller.on_permission_request_canceled();
        }
    }
    false
}

// ─── Main entry point ───

pub fn run() {
    let mut engine = SettingsEngine::new(None);
    let filter = engine
        .load()
        .map(|s| s.logging.filter)
        .unwrap_or_else(|_| "info".to_string());
    logging::init(&filter);

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window_settings = engine.get_settings().window.clone();
    let window = match WindowBuilder::new()
        .with_title(&window_settings.title)
        .with_inner_size(tao::dpi::LogicalSize::new(
            window_settings.width as f64,
            window_settings.height as f64,
        ))
        .build(&event_loop)
    {
        Ok(window) => Rc::new(window),
        Err(e) => {
            error!(error = %e, "failed to create window");
            return;
        }
    };

    let handles = Handles::default();
    let grants = Rc::new(RefCell::new(HashSet::new()));
    let factory = DesktopFactory {
        window: window.clone(),
        handles: handles.clone(),
        proxy: proxy.clone(),
        context: WebContext::new(Some(platform::get_data_dir())),
    };
    let os = DesktopOs {
        handles: handles.clone(),
        proxy,
        title: window_settings.title.clone(),
        grants: grants.clone(),
    };

    let mut controller = ShellController::from_engine(&mut engine, Box::new(factory), Box::new(os));
    controller.on_create();
    if controller.is_finished() {
        controller.on_destroy();
        return;
    }

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        let close = match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => true,
            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                handles.layout(&window);
                // Minimizing arrives as a resize on every desktop platform.
                controller.on_visibility_changed(!window.is_minimized());
                false
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(_),
                ..
            } => {
                controller.on_visibility_changed(!window.is_minimized());
                false
            }
            Event::Suspended => {
                controller.on_visibility_changed(false);
                false
            }
            Event::Resumed => {
                controller.on_visibility_changed(true);
                false
            }
            Event::UserEvent(user_event) => dispatch(&mut controller, user_event, &handles, &grants),
            _ => false,
        };

        if close {
            controller.on_destroy();
            *control_flow = ControlFlow::Exit;
        }
    });
}
