//! In-process host that records every call and lets the caller decide OS outcomes.
//!
//! Used by the console demo and the test suites. All parts share one state
//! handle, so the surface, views and OS services can be inspected after they
//! have been moved into a controller.

use std::cell::{Ref, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use super::{BrowserSurface, OsServices, Screen, ScreenFactory, ScreenViews};
use crate::types::errors::HostError;
use crate::types::file_chooser::FileChooserParams;
use crate::types::navigation::SameDocumentChange;
use crate::types::permission::OsPermission;
use crate::types::request::{RequestId, RequestKind};
use crate::types::settings::BrowserSettings;
use crate::types::view::CustomView;

/// Everything the host observed, in call order where order matters.
#[derive(Debug, Default)]
pub struct HostLog {
    pub screens_built: usize,
    pub applied_settings: Option<BrowserSettings>,
    pub loaded_urls: Vec<String>,
    pub back_steps: usize,
    pub same_document: Vec<(String, SameDocumentChange)>,
    pub paused: bool,
    pub pause_count: usize,
    pub resume_count: usize,
    pub surface_visible: bool,
    pub cookies_flushed: usize,
    pub surface_destroyed: bool,
    /// Surface calls made after the first cookie flush, in order.
    pub teardown: Vec<&'static str>,

    pub progress_visible: bool,
    pub progress: u8,
    pub overlay_visible: bool,
    pub overlay_hide_count: usize,
    pub custom_view: Option<String>,

    pub external_views: Vec<String>,
    pub picker_launches: Vec<(RequestId, FileChooserParams)>,
    pub permission_requests: Vec<(RequestId, RequestKind, Vec<OsPermission>)>,
    pub notices: Vec<String>,
}

#[derive(Debug, Default)]
struct HostState {
    log: HostLog,
    granted: HashSet<OsPermission>,
    history_depth: usize,
    fail_build: bool,
    fail_picker: bool,
    fail_external: bool,
    fail_permission_dialog: bool,
}

/// A host whose OS behavior is scripted by the caller.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHost {
    state: Rc<RefCell<HostState>>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Permissions the OS reports as already granted.
    pub fn granting(self, permissions: &[OsPermission]) -> Self {
        self.state.borrow_mut().granted.extend(permissions.iter().copied());
        self
    }

    pub fn failing_build(self) -> Self {
        self.state.borrow_mut().fail_build = true;
        self
    }

    pub fn failing_picker(self) -> Self {
        self.state.borrow_mut().fail_picker = true;
        self
    }

    /// No app is installed for external schemes.
    pub fn failing_external(self) -> Self {
        self.state.borrow_mut().fail_external = true;
        self
    }

    pub fn failing_permission_dialog(self) -> Self {
        self.state.borrow_mut().fail_permission_dialog = true;
        self
    }

    pub fn grant(&self, permission: OsPermission) {
        self.state.borrow_mut().granted.insert(permission);
    }

    /// Sets how many steps the surface can go back.
    pub fn set_history_depth(&self, depth: usize) {
        self.state.borrow_mut().history_depth = depth;
    }

    pub fn history_depth(&self) -> usize {
        self.state.borrow().history_depth
    }

    pub fn log(&self) -> Ref<'_, HostLog> {
        Ref::map(self.state.borrow(), |s| &s.log)
    }

    /// Id of the most recent picker launch.
    pub fn last_picker_id(&self) -> Option<RequestId> {
        self.log().picker_launches.last().map(|(id, _)| *id)
    }

    /// Id of the most recent permission dialog for `kind`.
    pub fn last_permission_id(&self, kind: RequestKind) -> Option<RequestId> {
        self.log()
            .permission_requests
            .iter()
            .rev()
            .find(|(_, k, _)| *k == kind)
            .map(|(id, _, _)| *id)
    }

    pub fn factory(&self) -> Box<dyn ScreenFactory> {
        Box::new(ScriptedFactory { state: self.state.clone() })
    }

    pub fn os(&self) -> Box<dyn OsServices> {
        Box::new(ScriptedOs { state: self.state.clone() })
    }
}

struct ScriptedFactory {
    state: Rc<RefCell<HostState>>,
}

impl ScreenFactory for ScriptedFactory {
    fn build_screen(&mut self, settings: &BrowserSettings) -> Result<Screen, HostError> {
        let mut s = self.state.borrow_mut();
        if s.fail_build {
            return Err(HostError::BuildFailed("scripted build failure".to_string()));
        }
        s.log.screens_built += 1;
        s.log.applied_settings = Some(settings.clone());
        s.log.surface_visible = true;
        s.log.surface_destroyed = false;
        drop(s);

        Ok(Screen {
            surface: Box::new(ScriptedSurface { state: self.state.clone() }),
            views: Box::new(ScriptedViews { state: self.state.clone() }),
        })
    }
}

struct ScriptedSurface {
    state: Rc<RefCell<HostState>>,
}

impl BrowserSurface for ScriptedSurface {
    fn load_url(&mut self, url: &str) -> Result<(), HostError> {
        let mut s = self.state.borrow_mut();
        let had_page = s
            .log
            .loaded_urls
            .last()
            .map_or(false, |u| u != "about:blank");
        if had_page && url != "about:blank" {
            s.history_depth += 1;
        }
        if url == "about:blank" && !s.log.teardown.is_empty() {
            s.log.teardown.push("blank");
        }
        s.log.loaded_urls.push(url.to_string());
        Ok(())
    }

    fn can_go_back(&self) -> bool {
        self.state.borrow().history_depth > 0
    }

    fn go_back(&mut self) -> Result<(), HostError> {
        let mut s = self.state.borrow_mut();
        if s.history_depth == 0 {
            return Err(HostError::EngineError("no history entry to go back to".to_string()));
        }
        s.history_depth -= 1;
        s.log.back_steps += 1;
        Ok(())
    }

    fn on_same_document_navigation(&mut self, url: &str, change: SameDocumentChange) {
        let mut s = self.state.borrow_mut();
        if change == SameDocumentChange::Push {
            s.history_depth += 1;
        }
        s.log.same_document.push((url.to_string(), change));
    }

    fn on_pause(&mut self) {
        let mut s = self.state.borrow_mut();
        s.log.paused = true;
        s.log.pause_count += 1;
    }

    fn on_resume(&mut self) {
        let mut s = self.state.borrow_mut();
        s.log.paused = false;
        s.log.resume_count += 1;
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), HostError> {
        self.state.borrow_mut().log.surface_visible = visible;
        Ok(())
    }

    fn flush_cookies(&mut self) -> Result<(), HostError> {
        let mut s = self.state.borrow_mut();
        s.log.cookies_flushed += 1;
        s.log.teardown.push("flush_cookies");
        Ok(())
    }

    fn destroy(self: Box<Self>) {
        let mut s = self.state.borrow_mut();
        s.log.surface_destroyed = true;
        s.log.surface_visible = false;
        s.log.teardown.push("destroy");
    }
}

struct ScriptedViews {
    state: Rc<RefCell<HostState>>,
}

impl ScreenViews for ScriptedViews {
    fn set_progress_visible(&mut self, visible: bool) {
        self.state.borrow_mut().log.progress_visible = visible;
    }

    fn set_progress(&mut self, progress: u8) {
        self.state.borrow_mut().log.progress = progress;
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        let mut s = self.state.borrow_mut();
        if s.log.overlay_visible && !visible {
            s.log.overlay_hide_count += 1;
        }
        s.log.overlay_visible = visible;
    }

    fn show_custom_view(&mut self, view: &CustomView) -> Result<(), HostError> {
        self.state.borrow_mut().log.custom_view = Some(view.label.clone());
        Ok(())
    }

    fn hide_custom_view(&mut self) -> Result<(), HostError> {
        self.state.borrow_mut().log.custom_view = None;
        Ok(())
    }
}

struct ScriptedOs {
    state: Rc<RefCell<HostState>>,
}

impl OsServices for ScriptedOs {
    fn start_view(&mut self, url: &str) -> Result<(), HostError> {
        let mut s = self.state.borrow_mut();
        if s.fail_external {
            return Err(HostError::ActivityNotFound(url.to_string()));
        }
        s.log.external_views.push(url.to_string());
        Ok(())
    }

    fn launch_file_picker(&mut self, id: RequestId, params: &FileChooserParams) -> Result<(), HostError> {
        let mut s = self.state.borrow_mut();
        if s.fail_picker {
            return Err(HostError::ActivityNotFound("file picker".to_string()));
        }
        s.log.picker_launches.push((id, params.clone()));
        Ok(())
    }

    fn check_permission(&self, permission: OsPermission) -> bool {
        self.state.borrow().granted.contains(&permission)
    }

    fn request_permissions(
        &mut self,
        id: RequestId,
        kind: RequestKind,
        permissions: &[OsPermission],
    ) -> Result<(), HostError> {
        let mut s = self.state.borrow_mut();
        if s.fail_permission_dialog {
            return Err(HostError::ActivityNotFound("permission dialog".to_string()));
        }
        s.log.permission_requests.push((id, kind, permissions.to_vec()));
        Ok(())
    }

    fn show_notice(&mut self, message: &str) {
        self.state.borrow_mut().log.notices.push(message.to_string());
    }
}
