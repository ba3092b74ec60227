//! webview-shell: wraps one web destination in a single-screen app.
//!
//! Entry point: opens the desktop window around the configured destination.
//! When built without the `gui` feature, runs a console demo against a
//! scripted host.

#[cfg(feature = "gui")]
fn main() {
    webview_shell::ui::shell_window::run();
}

#[cfg(not(feature = "gui"))]
fn main() {
    webview_shell::services::logging::init("warn");

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║              webview-shell v{} — Demo Mode               ║", env!("CARGO_PKG_VERSION"));
    println!("║        Single-screen web app shell, scripted host          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    demo_settings();
    demo_startup();
    demo_navigation();
    demo_file_chooser();
    demo_geolocation();
    demo_media();
    demo_popups();
    demo_back_and_destroy();

    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("  ✅ All 8 scenarios demonstrated successfully!");
    println!("  Build with `--features gui` for the desktop window.");
    println!("═══════════════════════════════════════════════════════════════");
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  📦 {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
fn started(host: &webview_shell::host::scripted::ScriptedHost) -> webview_shell::app::ShellController {
    use webview_shell::app::ShellController;
    use webview_shell::types::settings::ShellSettings;

    let mut shell = ShellController::new(ShellSettings::default(), host.factory(), host.os())
        .with_build_time_url(None);
    shell.on_create();
    shell
}

#[cfg(not(feature = "gui"))]
fn demo_settings() {
    use webview_shell::services::settings_engine::{resolve_start_url, SettingsEngine, SettingsEngineTrait};
    section("Settings Engine");

    let dir = std::env::temp_dir().join("webview-shell-demo");
    let path = dir.join("shell.json").to_string_lossy().to_string();
    let mut engine = SettingsEngine::new(Some(path));
    let settings = engine.load().unwrap();
    println!("  Window: {} ({}x{})", settings.window.title, settings.window.width, settings.window.height);
    println!("  User agent suffix: {}", settings.browser.user_agent_suffix);
    println!("  Multiple windows: {}", settings.browser.support_multiple_windows);

    engine.set_value("start_url", serde_json::json!("https://example.org")).unwrap();
    println!("  Configured start_url: {:?}", engine.get_settings().start_url);
    println!("  Resolved (no build-time URL): {}", resolve_start_url(None, engine.get_settings().start_url.as_deref()).unwrap());
    println!("  Resolved (blank everywhere): {}", resolve_start_url(Some("  "), None).unwrap());

    engine.reset().unwrap();
    let _ = std::fs::remove_dir_all(&dir);
    println!("  ✓ SettingsEngine OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_startup() {
    use webview_shell::client::{ChromeClient, NavigationClient};
    use webview_shell::host::scripted::ScriptedHost;
    section("Startup & Loading Overlay");

    let host = ScriptedHost::new();
    let mut shell = started(&host);
    println!("  State: {:?}, loaded: {:?}", shell.state(), host.log().loaded_urls);
    println!("  Overlay visible: {}", host.log().overlay_visible);

    shell.on_page_started("https://ciptadesa.com/");
    shell.on_progress_changed(140);
    println!("  Progress (140 reported): {}", host.log().progress);
    shell.on_page_finished("https://ciptadesa.com/");
    shell.on_page_finished("https://ciptadesa.com/news");
    println!("  Overlay hidden {} time(s) after two finishes", host.log().overlay_hide_count);
    println!("  ✓ Startup OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_navigation() {
    use webview_shell::client::NavigationClient;
    use webview_shell::host::scripted::ScriptedHost;
    section("Navigation Bridge");

    let host = ScriptedHost::new();
    let mut shell = started(&host);
    for url in ["tel:+6281234", "MAILTO:desa@example.org", "https://ciptadesa.com/peta", "whatsapp://send?phone=62"] {
        println!("  {:<32} -> {:?}", url, shell.should_override_url_loading(url));
    }
    println!("  Handed to the OS: {:?}", host.log().external_views);

    let offline = ScriptedHost::new().failing_external();
    let mut shell = started(&offline);
    shell.should_override_url_loading("sms:123");
    println!("  No handler installed, notices: {:?}", offline.log().notices);
    println!("  ✓ NavigationBridge OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_file_chooser() {
    use std::cell::RefCell;
    use std::rc::Rc;
    use webview_shell::client::{ActivityResultHandler, ChromeClient};
    use webview_shell::host::scripted::ScriptedHost;
    use webview_shell::types::file_chooser::{FileChooserParams, FilePickerResult, PickerPayload};
    section("File Chooser");

    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let received = Rc::new(RefCell::new(None));
    let sink = received.clone();
    let params = FileChooserParams {
        accept_types: vec!["image/*".to_string()],
        allow_multiple: true,
        capture: false,
    };
    shell.on_show_file_chooser(Box::new(move |uris: Option<Vec<String>>| *sink.borrow_mut() = Some(uris)), params);
    let id = host.last_picker_id().unwrap();
    println!("  Picker launched with request {}", id);

    let payload = PickerPayload::multiple(["content://media/1", "content://media/2", "content://media/3"]);
    shell.on_file_chooser_result(id, FilePickerResult::Accepted(payload));
    println!("  Delivered: {:?}", received.borrow());
    println!("  ✓ FileChooserManager OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_geolocation() {
    use webview_shell::client::{ActivityResultHandler, ChromeClient};
    use webview_shell::host::scripted::ScriptedHost;
    use webview_shell::types::permission::{OsPermission, PermissionResults};
    use webview_shell::types::request::RequestKind;
    section("Geolocation Permission");

    let host = ScriptedHost::new();
    let mut shell = started(&host);
    shell.on_geolocation_permissions_show_prompt(
        "https://ciptadesa.com",
        Box::new(|origin: &str, allow: bool, retain: bool| {
            println!("  Callback: origin={} allow={} retain={}", origin, allow, retain)
        }),
    );
    let id = host.last_permission_id(RequestKind::Geolocation).unwrap();
    println!("  OS dialog opened for {:?}", host.log().permission_requests[0].2);

    let results: PermissionResults = [(OsPermission::FineLocation, false), (OsPermission::CoarseLocation, true)]
        .into_iter()
        .collect();
    shell.on_permissions_result(id, RequestKind::Geolocation, results);
    println!("  ✓ GeolocationManager OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_media() {
    use webview_shell::client::ChromeClient;
    use webview_shell::host::scripted::ScriptedHost;
    use webview_shell::host::PermissionRequest;
    use webview_shell::types::permission::{MediaResource, OsPermission};
    section("Media Permission");

    struct Call {
        resources: Vec<MediaResource>,
    }

    impl PermissionRequest for Call {
        fn origin(&self) -> &str {
            "https://ciptadesa.com"
        }
        fn resources(&self) -> &[MediaResource] {
            &self.resources
        }
        fn grant(self: Box<Self>, resources: &[MediaResource]) {
            println!("  Granted: {:?}", resources);
        }
        fn deny(self: Box<Self>) {
            println!("  Denied");
        }
    }

    let host = ScriptedHost::new().granting(&[OsPermission::Camera, OsPermission::RecordAudio]);
    let mut shell = started(&host);
    shell.on_permission_request(Box::new(Call {
        resources: vec![MediaResource::VideoCapture, MediaResource::AudioCapture],
    }));
    println!("  ✓ MediaPermissionManager OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_popups() {
    use webview_shell::app::ShellController;
    use webview_shell::client::ChromeClient;
    use webview_shell::host::scripted::ScriptedHost;
    use webview_shell::types::navigation::NewWindowRequest;
    use webview_shell::types::settings::ShellSettings;
    use webview_shell::types::view::CustomView;
    section("Popups & Fullscreen");

    let host = ScriptedHost::new();
    let mut shell = started(&host);
    let blocked = shell.on_create_window(NewWindowRequest {
        url: Some("https://ads.example".to_string()),
        user_gesture: false,
    });
    println!("  Multiple windows off: {:?}", blocked);

    let mut settings = ShellSettings::default();
    settings.browser.support_multiple_windows = true;
    let collapsing = ScriptedHost::new();
    let mut popup_shell = ShellController::new(settings, collapsing.factory(), collapsing.os())
        .with_build_time_url(None);
    popup_shell.on_create();
    let collapsed = popup_shell.on_create_window(NewWindowRequest {
        url: Some("https://ciptadesa.com/berita".to_string()),
        user_gesture: true,
    });
    println!("  Multiple windows on: {:?}", collapsed);

    shell.on_show_custom_view(CustomView::new("video"), Box::new(|| println!("  Engine told: custom view hidden")));
    println!("  Custom view: {:?}, surface visible: {}", host.log().custom_view, host.log().surface_visible);
    shell.on_hide_custom_view();
    println!("  Surface visible again: {}", host.log().surface_visible);
    println!("  ✓ PopupBridge OK");
    println!();
}

#[cfg(not(feature = "gui"))]
fn demo_back_and_destroy() {
    use webview_shell::client::ChromeClient;
    use webview_shell::host::scripted::ScriptedHost;
    use webview_shell::types::file_chooser::FileChooserParams;
    section("Back Navigation & Teardown");

    let host = ScriptedHost::new();
    let mut shell = started(&host);
    host.set_history_depth(1);
    println!("  Back with history: {:?}", shell.on_back_pressed());
    println!("  Back at the root: {:?}", shell.on_back_pressed());
    println!("  Back interception enabled: {}", shell.is_back_interception_enabled());

    shell.on_show_file_chooser(
        Box::new(|uris: Option<Vec<String>>| println!("  Pending picker resolved with {:?}", uris)),
        FileChooserParams::default(),
    );
    shell.on_destroy();
    shell.on_destroy();
    let log = host.log();
    println!("  Cookies flushed: {}, last URL: {:?}", log.cookies_flushed, log.loaded_urls.last());
    println!("  Surface destroyed: {}", log.surface_destroyed);
    println!("  ✓ ShellController OK");
    println!();
}
