//! Small wrappers over `window` calls used across the admin screens.

/// Native confirm dialog; `false` when there is no window
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

pub fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        log::error!("failed to open {}: {:?}", url, e);
    }
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current `location.hash` without the leading `#`
pub fn location_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|h| h.trim_start_matches('#').to_string())
        .unwrap_or_default()
}

pub fn set_location_hash(hash: &str) {
    if location_hash() == hash {
        return;
    }
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(hash);
    }
}
