//! Transient admin notices shown at the top of the plugin page.
//!
//! Uses the WordPress `notice notice-*` classes so the host admin styles
//! apply. Every notice removes itself after [`NOTICE_LIFETIME_MS`].

use contracts::shared::ajax::{CatalogError, Severity};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;

use super::config::NOTICE_LIFETIME_MS;
use super::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Warning,
    Error,
}

impl NoticeKind {
    pub fn for_error(err: &CatalogError) -> Self {
        match err.severity() {
            Severity::Warning => NoticeKind::Warning,
            Severity::Error => NoticeKind::Error,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "notice notice-success is-dismissible",
            NoticeKind::Info => "notice notice-info is-dismissible",
            NoticeKind::Warning => "notice notice-warning is-dismissible",
            NoticeKind::Error => "notice notice-error is-dismissible",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct NoticeService {
    items: RwSignal<Vec<Notice>>,
    next_id: StoredValue<u64>,
}

impl NoticeService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    pub fn push(&self, kind: NoticeKind, text: impl Into<String>) {
        self.next_id.update_value(|n| *n += 1);
        let id = self.next_id.get_value();
        let text = text.into();
        self.items.update(|items| items.push(Notice { id, kind, text }));

        let items = self.items;
        leptos::task::spawn_local(async move {
            TimeoutFuture::new(NOTICE_LIFETIME_MS).await;
            items.try_update(|items| items.retain(|n| n.id != id));
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeKind::Success, text);
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeKind::Info, text);
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.push(NoticeKind::Warning, text);
    }

    /// Show a failed action as a warning or an error by its severity
    pub fn report(&self, err: &CatalogError) {
        self.push(NoticeKind::for_error(err), err.to_string());
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|n| n.id != id));
    }
}

impl Default for NoticeService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notices() -> NoticeService {
    use_context::<NoticeService>().expect("NoticeService not provided in context")
}

#[component]
pub fn NoticeHost() -> impl IntoView {
    let notices = use_notices();

    view! {
        <div class="catalog-master-notices">
            <For
                each=move || notices.items.get()
                key=|n| n.id
                children=move |n| {
                    let id = n.id;
                    view! {
                        <div class=n.kind.css_class()>
                            <p>{n.text}</p>
                            <button
                                type="button"
                                class="notice-dismiss"
                                title="Dismiss"
                                on:click=move |_| notices.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_follows_severity() {
        assert_eq!(
            NoticeKind::for_error(&CatalogError::validation("No filters")),
            NoticeKind::Warning
        );
        assert_eq!(
            NoticeKind::for_error(&CatalogError::Backend("Invalid nonce".into())),
            NoticeKind::Error
        );
        assert_eq!(
            NoticeKind::for_error(&CatalogError::Transport("HTTP 500".into())),
            NoticeKind::Error
        );
    }
}
