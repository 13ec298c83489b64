pub mod app;
pub mod domain;
pub mod layout;
pub mod shared;
pub mod system;
pub mod usecases;

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;

/// Container the plugin prints on its admin pages
const ROOT_ELEMENT_ID: &str = "catalog-master-app";

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(ROOT_ELEMENT_ID))
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());

    match root {
        Some(el) => leptos::mount::mount_to(el, app::App).forget(),
        None => {
            log::warn!("#{} not found, mounting to body", ROOT_ELEMENT_ID);
            leptos::mount::mount_to_body(app::App);
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
