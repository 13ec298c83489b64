//! Clipboard helper for the export reference URLs.

use leptos::task::spawn_local;

/// Copy text with the Web Clipboard API, then run `on_done` with the outcome
pub fn copy_to_clipboard_with_callback<F>(text: &str, on_done: F)
where
    F: FnOnce(bool) + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            on_done(false);
            return;
        };
        let clipboard = window.navigator().clipboard();
        let copied = wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text))
            .await
            .is_ok();
        if !copied {
            log::warn!("clipboard write rejected");
        }
        on_done(copied);
    });
}
