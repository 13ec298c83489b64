use super::api;
use contracts::usecases::u502_export_catalog::{ExportFormat, ExportResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::layout::global_context::use_catalog_context;
use crate::shared::browser::open_in_new_tab;
use crate::shared::clipboard::copy_to_clipboard_with_callback;
use crate::shared::icons::icon;
use crate::shared::notices::{use_notices, NoticeService};

#[component]
pub fn ExportPanel() -> impl IntoView {
    let ctx = use_catalog_context();
    let notices = use_notices();
    let format = RwSignal::new(ExportFormat::Csv);
    let exporting = RwSignal::new(false);
    // Only the latest export's URLs are kept
    let last_export = RwSignal::new(None::<ExportResponse>);

    let run_export = move |_| {
        let Some(catalog_id) = ctx.catalog_id_untracked() else {
            notices.warning("Save the catalog before exporting.");
            return;
        };
        let format = format.get_untracked();
        exporting.set(true);
        spawn_local(async move {
            match api::export_catalog(catalog_id, format).await {
                Ok(resp) => {
                    open_in_new_tab(resp.url_for(format));
                    notices.success(format!("{} export is ready.", format.label()));
                    last_export.set(Some(resp));
                }
                Err(e) => notices.report(&e),
            }
            exporting.set(false);
        });
    };

    view! {
        <div class="catalog-export">
            <h2>"Export catalog"</h2>
            <Flex gap=FlexGap::Small>
                <select
                    class="export-format-select"
                    on:change=move |ev| {
                        if let Ok(f) = event_target_value(&ev).parse::<ExportFormat>() {
                            format.set(f);
                        }
                    }
                >
                    {ExportFormat::ALL.into_iter().map(|f| view! {
                        <option value=f.as_str() selected=move || format.get() == f>
                            {f.label()}
                        </option>
                    }).collect_view()}
                </select>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=run_export
                    disabled=Signal::derive(move || exporting.get())
                >
                    {icon("external-link")}
                    {move || if exporting.get() { " Exporting..." } else { " Export" }}
                </Button>
            </Flex>
            {move || last_export.get().map(|resp| view! {
                <div class="export-urls">
                    <h4>"Export URLs"</h4>
                    <ExportUrlRow label="Feed URL" url=resp.feed_url notices=notices />
                    <ExportUrlRow label="Download URL" url=resp.download_url notices=notices />
                </div>
            })}
        </div>
    }
}

#[component]
fn ExportUrlRow(label: &'static str, url: String, notices: NoticeService) -> impl IntoView {
    let copy_text = url.clone();
    let on_copy = move |_| {
        copy_to_clipboard_with_callback(&copy_text, move |ok| {
            if ok {
                notices.info("Copied to clipboard.");
            } else {
                notices.warning("Could not copy to the clipboard.");
            }
        });
    };

    view! {
        <p class="export-url">
            <strong>{label}": "</strong>
            <a href=url.clone() target="_blank" rel="noopener">{url.clone()}</a>
            <button type="button" class="button-link export-url__copy" title="Copy" on:click=on_copy>
                {icon("copy")}
            </button>
        </p>
    }
}
