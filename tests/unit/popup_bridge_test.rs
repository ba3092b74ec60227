//! Popup and fullscreen bridge tests.

use std::cell::Cell;
use std::rc::Rc;

use webview_shell::app::ShellController;
use webview_shell::client::ChromeClient;
use webview_shell::host::scripted::ScriptedHost;
use webview_shell::host::CustomViewCallback;
use webview_shell::types::navigation::{NavigationDecision, NewWindowDisposition, NewWindowRequest};
use webview_shell::types::settings::ShellSettings;
use webview_shell::types::view::CustomView;

fn started_with(host: &ScriptedHost, multiple_windows: bool) -> ShellController {
    let mut settings = ShellSettings::default();
    settings.browser.support_multiple_windows = multiple_windows;
    let mut shell = ShellController::new(settings, host.factory(), host.os()).with_build_time_url(None);
    shell.on_create();
    shell
}

fn popup(url: Option<&str>) -> NewWindowRequest {
    NewWindowRequest {
        url: url.map(str::to_string),
        user_gesture: true,
    }
}

fn counter() -> (Rc<Cell<usize>>, Box<dyn CustomViewCallback>) {
    let hits = Rc::new(Cell::new(0));
    let sink = hits.clone();
    (hits, Box::new(move || sink.set(sink.get() + 1)))
}

// === New windows ===

#[test]
fn popups_are_blocked_when_multiple_windows_off() {
    let host = ScriptedHost::new();
    let mut shell = started_with(&host, false);

    let disposition = shell.on_create_window(popup(Some("https://ads.example")));

    assert_eq!(disposition, NewWindowDisposition::Blocked);
    assert_eq!(host.log().loaded_urls.len(), 1);
}

#[test]
fn popup_with_url_collapses_into_surface() {
    let host = ScriptedHost::new();
    let mut shell = started_with(&host, true);

    let disposition = shell.on_create_window(popup(Some("https://ciptadesa.com/berita")));

    assert_eq!(
        disposition,
        NewWindowDisposition::Collapsed("https://ciptadesa.com/berita".to_string())
    );
    assert_eq!(
        host.log().loaded_urls.last().map(String::as_str),
        Some("https://ciptadesa.com/berita")
    );
}

#[test]
fn popup_without_url_redirects_first_navigation_only() {
    let host = ScriptedHost::new();
    let mut shell = started_with(&host, true);

    assert_eq!(shell.on_create_window(popup(None)), NewWindowDisposition::AwaitingNavigation);
    assert_eq!(
        shell.on_popup_navigation("https://ciptadesa.com/peta"),
        NavigationDecision::Handled
    );
    assert_eq!(
        shell.on_popup_navigation("https://ciptadesa.com/other"),
        NavigationDecision::Allow
    );

    let log = host.log();
    assert_eq!(log.loaded_urls.len(), 2);
    assert_eq!(log.loaded_urls[1], "https://ciptadesa.com/peta");
}

// === Custom (fullscreen) view ===

#[test]
fn custom_view_hides_surface_and_chrome() {
    let host = ScriptedHost::new();
    let mut shell = started_with(&host, false);
    shell.on_progress_changed(30);
    let (hidden, callback) = counter();

    shell.on_show_custom_view(CustomView::new("video"), callback);

    let log = host.log();
    assert_eq!(log.custom_view.as_deref(), Some("video"));
    assert!(!log.surface_visible);
    assert!(!log.progress_visible);
    assert!(!log.overlay_visible);
    assert_eq!(hidden.get(), 0);
    assert!(shell.is_custom_view_shown());
}

#[test]
fn hiding_custom_view_restores_surface_and_signals_once() {
    let host = ScriptedHost::new();
    let mut shell = started_with(&host, false);
    let (hidden, callback) = counter();
    shell.on_show_custom_view(CustomView::new("video"), callback);

    shell.on_hide_custom_view();
    shell.on_hide_custom_view();

    let log = host.log();
    assert!(log.custom_view.is_none());
    assert!(log.surface_visible);
    assert_eq!(hidden.get(), 1);
    assert!(!shell.is_custom_view_shown());
}

#[test]
fn second_custom_view_is_refused() {
    let host = ScriptedHost::new();
    let mut shell = started_with(&host, false);
    let (first_hidden, first) = counter();
    let (second_hidden, second) = counter();

    shell.on_show_custom_view(CustomView::new("video"), first);
    shell.on_show_custom_view(CustomView::new("canvas"), second);

    assert_eq!(host.log().custom_view.as_deref(), Some("video"));
    assert_eq!(first_hidden.get(), 0);
    assert_eq!(second_hidden.get(), 1);
}

#[test]
fn hide_without_custom_view_does_nothing() {
    let host = ScriptedHost::new();
    let mut shell = started_with(&host, false);

    shell.on_hide_custom_view();

    assert!(host.log().surface_visible);
}

#[test]
fn destroy_signals_shown_custom_view() {
    let host = ScriptedHost::new();
    let mut shell = started_with(&host, false);
    let (hidden, callback) = counter();
    shell.on_show_custom_view(CustomView::new("video"), callback);

    shell.on_destroy();
    shell.on_hide_custom_view();

    assert_eq!(hidden.get(), 1);
}
