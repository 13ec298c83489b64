//! Tab navigation of the catalog editor
//!
//! - `router` - pure navigation state
//! - `TabsContext` - shared handle other components use to switch tabs
//! - `TabNav` / `TabPanel` - nav bar and lazily hidden panels

pub mod router;

use leptos::prelude::*;
use router::TabRouter;

use crate::shared::browser::{location_hash, set_location_hash};

#[derive(Clone, Copy)]
pub struct TabsContext {
    router: RwSignal<TabRouter>,
}

impl TabsContext {
    /// Build from the current URL fragment and keep both in sync
    pub fn new(tabs: &[&'static str]) -> Self {
        let router = RwSignal::new(TabRouter::initial(tabs, &location_hash()));
        let ctx = Self { router };

        Effect::new(move |_| {
            let active = router.with(|r| r.active());
            set_location_hash(active);
        });

        let handle = window_event_listener(leptos::ev::hashchange, move |_| {
            let hash = location_hash();
            router.update(|r| {
                r.activate(&hash);
            });
        });
        on_cleanup(move || handle.remove());

        ctx
    }

    pub fn active(&self) -> &'static str {
        self.router.with(|r| r.active())
    }

    pub fn activate(&self, id: &str) {
        let changed = self.router.try_update(|r| r.activate(id)).unwrap_or(false);
        if changed {
            log::debug!("tab -> {}", id);
        }
    }
}

pub fn use_tabs() -> TabsContext {
    use_context::<TabsContext>().expect("TabsContext not provided in context")
}

#[component]
pub fn TabNav(tabs: &'static [(&'static str, &'static str)]) -> impl IntoView {
    let ctx = use_tabs();

    view! {
        <nav class="nav-tab-wrapper catalog-master-tabs">
            {tabs.iter().map(|(id, label)| {
                let id: &'static str = id;
                view! {
                    <a
                        href=format!("#{}", id)
                        class=move || if ctx.active() == id { "nav-tab nav-tab-active" } else { "nav-tab" }
                        on:click=move |ev| {
                            ev.prevent_default();
                            ctx.activate(id);
                        }
                    >
                        {*label}
                    </a>
                }
            }).collect_view()}
        </nav>
    }
}

/// Panel content stays mounted; inactive panels are only hidden
#[component]
pub fn TabPanel(id: &'static str, children: Children) -> impl IntoView {
    let ctx = use_tabs();

    view! {
        <div
            id=format!("tab-{}", id)
            class=move || if ctx.active() == id { "tab-content tab-content--active" } else { "tab-content hidden" }
        >
            {children()}
        </div>
    }
}
