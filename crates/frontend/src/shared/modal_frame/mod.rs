use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

/// Overlay plus a titled dialog surface in the WordPress admin look.
///
/// The overlay closes the dialog only when both mouse down and click land on
/// it, so a text selection dragged outside the surface keeps it open.
#[component]
pub fn ModalFrame(
    title: String,
    on_close: Callback<()>,
    /// Ignore overlay clicks and hide the close button, e.g. while uploading
    #[prop(optional, into)]
    locked: MaybeProp<bool>,
    #[prop(optional)]
    modal_class: Option<String>,
    children: Children,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);
    let is_locked = move || locked.get().unwrap_or(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close =
            !is_locked() && overlay_mouse_down.get() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // next tick: the overlay must not unmount during its own dispatch
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let surface_class = match modal_class {
        Some(cls) => format!("catalog-modal {cls}"),
        None => "catalog-modal".to_string(),
    };

    view! {
        <div
            class="catalog-modal-overlay"
            on:mousedown=move |ev: ev::MouseEvent| overlay_mouse_down.set(is_direct_overlay_event(&ev))
            on:click=handle_overlay_click
        >
            <div class=surface_class role="dialog" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                <div class="catalog-modal__header">
                    <h2>{title}</h2>
                    <Show when=move || !is_locked()>
                        <button
                            type="button"
                            class="catalog-modal__close"
                            title="Close"
                            on:click=move |_| on_close.run(())
                        >
                            {icon("x")}
                        </button>
                    </Show>
                </div>
                <div class="catalog-modal__body">{children()}</div>
            </div>
        </div>
    }
}
