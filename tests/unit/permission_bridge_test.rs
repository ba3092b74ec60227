//! Permission/callback bridge tests: file chooser, geolocation and media
//! requests paired with scripted OS results.

use std::cell::RefCell;
use std::rc::Rc;

use webview_shell::app::ShellController;
use webview_shell::client::{ActivityResultHandler, ChromeClient};
use webview_shell::host::scripted::ScriptedHost;
use webview_shell::host::PermissionRequest;
use webview_shell::types::file_chooser::{FileChooserParams, FilePickerResult, PickerPayload};
use webview_shell::types::permission::{MediaResource, OsPermission, PermissionResults};
use webview_shell::types::request::{RequestId, RequestKind};
use webview_shell::types::settings::ShellSettings;

fn started(host: &ScriptedHost) -> ShellController {
    let mut shell = ShellController::new(ShellSettings::default(), host.factory(), host.os())
        .with_build_time_url(None);
    shell.on_create();
    shell
}

fn results(entries: &[(OsPermission, bool)]) -> PermissionResults {
    entries.iter().copied().collect()
}

// === File chooser ===

type FileLog = Rc<RefCell<Vec<Option<Vec<String>>>>>;

fn open_picker(shell: &mut ShellController, log: &FileLog, multiple: bool) -> bool {
    let sink = log.clone();
    shell.on_show_file_chooser(
        Box::new(move |uris: Option<Vec<String>>| sink.borrow_mut().push(uris)),
        FileChooserParams {
            accept_types: vec!["image/*".to_string()],
            allow_multiple: multiple,
            capture: false,
        },
    )
}

#[test]
fn picker_receives_params() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let log = FileLog::default();

    assert!(open_picker(&mut shell, &log, true));

    let log_ref = host.log();
    let launches = &log_ref.picker_launches;
    assert_eq!(launches.len(), 1);
    assert!(launches[0].1.allow_multiple);
    assert_eq!(launches[0].1.mime_filter(), "image/*");
    assert!(shell.is_pending(RequestKind::FileChooser));
}

#[test]
fn multi_select_delivers_every_item_in_order() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let log = FileLog::default();
    open_picker(&mut shell, &log, true);

    let payload = PickerPayload::multiple(["content://a", "content://b", "content://c"]);
    shell.on_file_chooser_result(host.last_picker_id().unwrap(), FilePickerResult::Accepted(payload));

    assert_eq!(
        *log.borrow(),
        vec![Some(vec![
            "content://a".to_string(),
            "content://b".to_string(),
            "content://c".to_string(),
        ])]
    );
    assert!(!shell.is_pending(RequestKind::FileChooser));
}

#[test]
fn single_pick_is_a_one_element_list() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let log = FileLog::default();
    open_picker(&mut shell, &log, false);

    let id = host.last_picker_id().unwrap();
    shell.on_file_chooser_result(id, FilePickerResult::Accepted(PickerPayload::single("content://one")));

    assert_eq!(*log.borrow(), vec![Some(vec!["content://one".to_string()])]);
}

#[test]
fn accepted_without_data_is_an_empty_list() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let log = FileLog::default();
    open_picker(&mut shell, &log, false);

    let id = host.last_picker_id().unwrap();
    shell.on_file_chooser_result(id, FilePickerResult::Accepted(PickerPayload::default()));

    assert_eq!(*log.borrow(), vec![Some(Vec::new())]);
}

#[test]
fn cancelled_pick_delivers_none() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let log = FileLog::default();
    open_picker(&mut shell, &log, false);

    shell.on_file_chooser_result(host.last_picker_id().unwrap(), FilePickerResult::Cancelled);

    assert_eq!(*log.borrow(), vec![None]);
    assert!(!shell.is_pending(RequestKind::FileChooser));
}

#[test]
fn malformed_pick_delivers_none_and_clears() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let log = FileLog::default();
    open_picker(&mut shell, &log, true);

    let payload = PickerPayload::multiple(["content://a", "   "]);
    shell.on_file_chooser_result(host.last_picker_id().unwrap(), FilePickerResult::Accepted(payload));

    assert_eq!(*log.borrow(), vec![None]);
    assert!(!shell.is_pending(RequestKind::FileChooser));
}

#[test]
fn picker_launch_failure_returns_false() {
    let host = ScriptedHost::new().failing_picker();
    let mut shell = started(&host);
    let log = FileLog::default();

    assert!(!open_picker(&mut shell, &log, false));
    assert_eq!(*log.borrow(), vec![None]);
    assert!(!shell.is_pending(RequestKind::FileChooser));
}

#[test]
fn overlapping_picker_is_rejected_and_first_still_resolves() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let first = FileLog::default();
    let second = FileLog::default();

    open_picker(&mut shell, &first, false);
    let id = host.last_picker_id().unwrap();
    assert!(open_picker(&mut shell, &second, false));

    assert_eq!(*second.borrow(), vec![None]);
    assert_eq!(host.log().picker_launches.len(), 1);

    shell.on_file_chooser_result(id, FilePickerResult::Accepted(PickerPayload::single("content://f")));
    assert_eq!(*first.borrow(), vec![Some(vec!["content://f".to_string()])]);
}

#[test]
fn stale_picker_result_is_ignored() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let log = FileLog::default();
    open_picker(&mut shell, &log, false);

    shell.on_file_chooser_result(RequestId::new(), FilePickerResult::Cancelled);

    assert!(log.borrow().is_empty());
    assert!(shell.is_pending(RequestKind::FileChooser));
}

// === Geolocation ===

type GeoLog = Rc<RefCell<Vec<(String, bool, bool)>>>;

fn prompt(shell: &mut ShellController, log: &GeoLog, origin: &str) {
    let sink = log.clone();
    shell.on_geolocation_permissions_show_prompt(
        origin,
        Box::new(move |origin: &str, allow: bool, retain: bool| {
            sink.borrow_mut().push((origin.to_string(), allow, retain))
        }),
    );
}

#[test]
fn granted_location_answers_immediately() {
    let host = ScriptedHost::new().granting(&[OsPermission::FineLocation]);
    let mut shell = started(&host);
    let log = GeoLog::default();

    prompt(&mut shell, &log, "https://ciptadesa.com");

    assert_eq!(*log.borrow(), vec![("https://ciptadesa.com".to_string(), true, false)]);
    assert!(host.log().permission_requests.is_empty());
}

#[test]
fn coarse_grant_alone_is_enough() {
    let host = ScriptedHost::new().granting(&[OsPermission::CoarseLocation]);
    let mut shell = started(&host);
    let log = GeoLog::default();

    prompt(&mut shell, &log, "https://ciptadesa.com");

    assert!(log.borrow()[0].1);
}

#[test]
fn missing_location_asks_for_both_permissions() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let log = GeoLog::default();

    prompt(&mut shell, &log, "https://ciptadesa.com");

    let host_log = host.log();
    let requests = &host_log.permission_requests;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1, RequestKind::Geolocation);
    assert_eq!(requests[0].2, vec![OsPermission::FineLocation, OsPermission::CoarseLocation]);
    assert!(log.borrow().is_empty());
    assert!(shell.is_pending(RequestKind::Geolocation));
}

#[test]
fn location_result_grants_on_either_permission() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let log = GeoLog::default();
    prompt(&mut shell, &log, "https://ciptadesa.com");
    let id = host.last_permission_id(RequestKind::Geolocation).unwrap();

    shell.on_location_permission_result(
        id,
        results(&[(OsPermission::FineLocation, false), (OsPermission::CoarseLocation, true)]),
    );

    assert_eq!(*log.borrow(), vec![("https://ciptadesa.com".to_string(), true, false)]);
    assert!(!shell.is_pending(RequestKind::Geolocation));
}

#[test]
fn location_denied_invokes_false() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let log = GeoLog::default();
    prompt(&mut shell, &log, "https://ciptadesa.com");
    let id = host.last_permission_id(RequestKind::Geolocation).unwrap();

    shell.on_permissions_result(id, RequestKind::Geolocation, PermissionResults::new());

    assert_eq!(*log.borrow(), vec![("https://ciptadesa.com".to_string(), false, false)]);
}

#[test]
fn overlapping_prompt_is_denied() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let first = GeoLog::default();
    let second = GeoLog::default();

    prompt(&mut shell, &first, "https://a.example");
    prompt(&mut shell, &second, "https://b.example");

    assert_eq!(*second.borrow(), vec![("https://b.example".to_string(), false, false)]);
    assert_eq!(host.log().permission_requests.len(), 1);
    assert!(first.borrow().is_empty());
}

#[test]
fn dialog_failure_denies_prompt() {
    let host = ScriptedHost::new().failing_permission_dialog();
    let mut shell = started(&host);
    let log = GeoLog::default();

    prompt(&mut shell, &log, "https://ciptadesa.com");

    assert_eq!(*log.borrow(), vec![("https://ciptadesa.com".to_string(), false, false)]);
    assert!(!shell.is_pending(RequestKind::Geolocation));
}

// === Media ===

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Granted(Vec<MediaResource>),
    Denied,
}

struct FakeRequest {
    resources: Vec<MediaResource>,
    outcomes: Rc<RefCell<Vec<Outcome>>>,
}

impl PermissionRequest for FakeRequest {
    fn origin(&self) -> &str {
        "https://ciptadesa.com"
    }

    fn resources(&self) -> &[MediaResource] {
        &self.resources
    }

    fn grant(self: Box<Self>, resources: &[MediaResource]) {
        self.outcomes.borrow_mut().push(Outcome::Granted(resources.to_vec()));
    }

    fn deny(self: Box<Self>) {
        self.outcomes.borrow_mut().push(Outcome::Denied);
    }
}

fn media_request(
    shell: &mut ShellController,
    resources: &[MediaResource],
) -> Rc<RefCell<Vec<Outcome>>> {
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    shell.on_permission_request(Box::new(FakeRequest {
        resources: resources.to_vec(),
        outcomes: outcomes.clone(),
    }));
    outcomes
}

const CALL: [MediaResource; 2] = [MediaResource::VideoCapture, MediaResource::AudioCapture];

#[test]
fn granted_media_is_granted_with_own_resources() {
    let host = ScriptedHost::new().granting(&[OsPermission::Camera, OsPermission::RecordAudio]);
    let mut shell = started(&host);

    let outcomes = media_request(&mut shell, &CALL);

    assert_eq!(*outcomes.borrow(), vec![Outcome::Granted(CALL.to_vec())]);
    assert!(host.log().permission_requests.is_empty());
}

#[test]
fn unmapped_resources_need_no_permission() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);

    let resources = [MediaResource::ProtectedMediaId, MediaResource::MidiSysex];
    let outcomes = media_request(&mut shell, &resources);

    assert_eq!(*outcomes.borrow(), vec![Outcome::Granted(resources.to_vec())]);
}

#[test]
fn only_missing_permissions_are_requested() {
    let host = ScriptedHost::new().granting(&[OsPermission::Camera]);
    let mut shell = started(&host);

    let outcomes = media_request(&mut shell, &CALL);

    let host_log = host.log();
    let requests = &host_log.permission_requests;
    assert_eq!(requests[0].1, RequestKind::Media);
    assert_eq!(requests[0].2, vec![OsPermission::RecordAudio]);
    assert!(outcomes.borrow().is_empty());
}

#[test]
fn media_result_all_granted_grants() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let outcomes = media_request(&mut shell, &CALL);
    let id = host.last_permission_id(RequestKind::Media).unwrap();

    shell.on_media_permission_result(
        id,
        results(&[(OsPermission::Camera, true), (OsPermission::RecordAudio, true)]),
    );

    assert_eq!(*outcomes.borrow(), vec![Outcome::Granted(CALL.to_vec())]);
}

#[test]
fn media_result_partial_denies() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let outcomes = media_request(&mut shell, &CALL);
    let id = host.last_permission_id(RequestKind::Media).unwrap();

    shell.on_permissions_result(
        id,
        RequestKind::Media,
        results(&[(OsPermission::Camera, true), (OsPermission::RecordAudio, false)]),
    );

    assert_eq!(*outcomes.borrow(), vec![Outcome::Denied]);
}

#[test]
fn dismissed_media_dialog_denies() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let outcomes = media_request(&mut shell, &CALL);
    let id = host.last_permission_id(RequestKind::Media).unwrap();

    shell.on_media_permission_result(id, PermissionResults::new());

    assert_eq!(*outcomes.borrow(), vec![Outcome::Denied]);
}

#[test]
fn canceled_media_request_is_dropped_unresolved() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let outcomes = media_request(&mut shell, &CALL);
    let id = host.last_permission_id(RequestKind::Media).unwrap();

    shell.on_permission_request_canceled();
    assert!(!shell.is_pending(RequestKind::Media));

    shell.on_media_permission_result(
        id,
        results(&[(OsPermission::Camera, true), (OsPermission::RecordAudio, true)]),
    );
    assert!(outcomes.borrow().is_empty());
}

#[test]
fn overlapping_media_request_is_denied() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let first = media_request(&mut shell, &CALL);
    let second = media_request(&mut shell, &[MediaResource::VideoCapture]);

    assert_eq!(*second.borrow(), vec![Outcome::Denied]);
    assert!(first.borrow().is_empty());
    assert_eq!(host.log().permission_requests.len(), 1);
}

#[test]
fn destroy_denies_pending_media() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let outcomes = media_request(&mut shell, &CALL);

    shell.on_destroy();
    shell.on_destroy();

    assert_eq!(*outcomes.borrow(), vec![Outcome::Denied]);
}

#[test]
fn result_routed_to_wrong_kind_is_ignored() {
    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let outcomes = media_request(&mut shell, &CALL);
    let id = host.last_permission_id(RequestKind::Media).unwrap();

    shell.on_permissions_result(id, RequestKind::Geolocation, PermissionResults::new());

    assert!(outcomes.borrow().is_empty());
    assert!(shell.is_pending(RequestKind::Media));
}
