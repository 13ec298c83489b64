use super::api;
use contracts::usecases::u501_import_from_sheets::{validate_sheet_url, SheetSourceRequest};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::use_catalog_context;
use crate::layout::tabs::use_tabs;
use crate::shared::config::TAB_SWITCH_AFTER_IMPORT_MS;
use crate::shared::notices::{use_notices, NoticeService};

/// Import progress bar steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportPhase {
    Idle,
    Running,
    Done,
}

impl ImportPhase {
    /// Bar width, `None` while the bar is hidden
    pub fn percent(&self) -> Option<u8> {
        match self {
            ImportPhase::Idle => None,
            ImportPhase::Running => Some(50),
            ImportPhase::Done => Some(100),
        }
    }
}

/// Run the connection test and report the outcome as a notice
pub fn spawn_connection_test(url: String, name: String, notices: NoticeService, busy: RwSignal<bool>) {
    let source = match SheetSourceRequest::from_form(&url, &name) {
        Ok(s) => s,
        Err(e) => {
            notices.report(&e);
            return;
        }
    };
    busy.set(true);
    spawn_local(async move {
        match api::test_connection(&source).await {
            Ok(info) => {
                let text = if info.message.is_empty() {
                    info.summary()
                } else {
                    format!("{} {}", info.message, info.summary())
                };
                notices.success(text);
            }
            Err(e) => notices.report(&e),
        }
        busy.set(false);
    });
}

/// Sheet URL and tab name with a live format hint and a connection test
#[component]
pub fn SheetSourceForm(url: RwSignal<String>, name: RwSignal<String>) -> impl IntoView {
    let notices = use_notices();
    let testing = RwSignal::new(false);

    let hint = move || {
        let value = url.get();
        if value.trim().is_empty() {
            view! { <></> }.into_any()
        } else if validate_sheet_url(&value).is_some() {
            view! { <span class="url-hint url-hint--valid">"Valid Google Sheets URL"</span> }.into_any()
        } else {
            view! { <span class="url-hint url-hint--invalid">"This does not look like a Google Sheets URL"</span> }.into_any()
        }
    };

    view! {
        <table class="form-table">
            <tr>
                <th scope="row"><label for="catalog-sheet-url">"Google Sheets URL"</label></th>
                <td>
                    <input
                        id="catalog-sheet-url"
                        type="url"
                        class="regular-text"
                        placeholder="https://docs.google.com/spreadsheets/d/..."
                        prop:value=move || url.get()
                        on:input=move |ev| url.set(event_target_value(&ev))
                    />
                    {hint}
                </td>
            </tr>
            <tr>
                <th scope="row"><label for="catalog-sheet-name">"Sheet name"</label></th>
                <td>
                    <input
                        id="catalog-sheet-name"
                        type="text"
                        class="regular-text"
                        placeholder="Sheet1"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <p class="description">"Leave empty to use the first sheet."</p>
                </td>
            </tr>
        </table>
        <Button
            on_click=move |_| spawn_connection_test(url.get_untracked(), name.get_untracked(), notices, testing)
            disabled=Signal::derive(move || testing.get())
        >
            {move || if testing.get() { "Testing..." } else { "Test connection" }}
        </Button>
    }
}

/// "Ready to import" panel shown once a mapping is saved
#[component]
pub fn ImportPanel(#[prop(into)] pair_count: Signal<usize>) -> impl IntoView {
    let ctx = use_catalog_context();
    let tabs = use_tabs();
    let notices = use_notices();
    let phase = RwSignal::new(ImportPhase::Idle);

    let run_import = move |_| {
        let Some(catalog_id) = ctx.catalog_id_untracked() else {
            notices.warning("Save the catalog before importing data.");
            return;
        };
        phase.set(ImportPhase::Running);
        spawn_local(async move {
            match api::import_data(catalog_id).await {
                Ok(resp) => {
                    phase.set(ImportPhase::Done);
                    let text = match (resp.message.is_empty(), resp.imported_count) {
                        (false, _) => resp.message,
                        (true, Some(n)) => format!("Import completed: {} rows imported.", n),
                        (true, None) => "Import completed.".to_string(),
                    };
                    notices.success(text);
                    ctx.has_data.set(true);
                    ctx.request_table_reload();

                    TimeoutFuture::new(TAB_SWITCH_AFTER_IMPORT_MS).await;
                    tabs.activate("data");
                    phase.try_set(ImportPhase::Idle);
                }
                Err(e) => {
                    phase.set(ImportPhase::Idle);
                    notices.report(&e);
                }
            }
        });
    };

    view! {
        <div class="import-ready postbox">
            <h3>"Ready to import"</h3>
            <p>
                {move || format!(
                    "{} column mapping{} saved. Importing replaces all catalog rows with the current sheet data.",
                    pair_count.get(),
                    if pair_count.get() == 1 { "" } else { "s" }
                )}
            </p>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=run_import
                disabled=Signal::derive(move || phase.get() != ImportPhase::Idle)
            >
                {move || if phase.get() == ImportPhase::Running { "Importing..." } else { "Import data" }}
            </Button>
            {move || phase.get().percent().map(|p| view! {
                <div class="import-progress">
                    <div class="import-progress__bar" style=format!("width: {}%;", p)></div>
                    <span class="import-progress__label">{format!("{}%", p)}</span>
                </div>
            })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_steps() {
        assert_eq!(ImportPhase::Idle.percent(), None);
        assert_eq!(ImportPhase::Running.percent(), Some(50));
        assert_eq!(ImportPhase::Done.percent(), Some(100));
    }
}
