use web_sys::window;

pub fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

/// Full page navigation, dropping all in-memory state.
pub fn hard_redirect(path: &str) {
    if let Some(window) = window() {
        let _ = window.location().set_href(path);
    }
}

pub fn origin() -> String {
    window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub fn open_in_new_tab(url: &str) {
    if let Some(window) = window() {
        let _ = window.open_with_url_and_target(url, "_blank");
    }
}

