use super::model::MappingModel;
use crate::domain::a002_column_mapping::api;
use crate::layout::global_context::use_catalog_context;
use crate::shared::icons::icon;
use crate::shared::notices::use_notices;
use crate::usecases::u501_import_from_sheets::api as sheets_api;
use crate::usecases::u501_import_from_sheets::view::spawn_connection_test;
use crate::usecases::u501_import_from_sheets::ImportPanel;
use contracts::domain::a001_catalog_item::CatalogColumn;
use contracts::usecases::u501_import_from_sheets::SheetSourceRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn ColumnMappingEditor() -> impl IntoView {
    let ctx = use_catalog_context();
    let notices = use_notices();
    let model = RwSignal::new(MappingModel::new());
    let testing = RwSignal::new(false);
    let fetching = RwSignal::new(false);
    let saving = RwSignal::new(false);

    // Saved mapping of an existing catalog
    if let Some(catalog_id) = ctx.catalog_id_untracked() {
        spawn_local(async move {
            match api::get_mapping(catalog_id).await {
                Ok(pairs) if !pairs.is_empty() => {
                    model.try_update(|m| m.load_pairs(&pairs));
                    ctx.mapping.set(pairs);
                }
                Ok(_) => log::debug!("catalog {} has no saved mapping", catalog_id),
                Err(e) => notices.report(&e),
            }
        });
    }

    Effect::new(move |_| {
        let headers = ctx.source_headers.get();
        if !headers.is_empty() {
            model.update(|m| m.set_headers(headers));
        }
    });

    let on_fetch_headers = move |_| {
        let source = match SheetSourceRequest::from_form(
            &ctx.sheet_url.get_untracked(),
            &ctx.sheet_name.get_untracked(),
        ) {
            Ok(s) => s,
            Err(e) => {
                notices.report(&e);
                return;
            }
        };
        fetching.set(true);
        spawn_local(async move {
            match sheets_api::fetch_headers(&source).await {
                Ok(headers) if headers.is_empty() => {
                    notices.warning("No column headers found in the first row of the sheet.");
                }
                Ok(headers) => {
                    notices.success(format!("Found {} columns in the sheet.", headers.len()));
                    ctx.source_headers.set(headers);
                }
                Err(e) => notices.report(&e),
            }
            fetching.set(false);
        });
    };

    let on_save = move |_| {
        let Some(catalog_id) = ctx.catalog_id_untracked() else {
            notices.warning("Save the catalog before saving the column mapping.");
            return;
        };
        let pairs = match model.with_untracked(|m| m.pairs_for_save()) {
            Ok(p) => p,
            Err(e) => {
                notices.report(&e);
                return;
            }
        };
        saving.set(true);
        spawn_local(async move {
            match api::save_mapping(catalog_id, pairs.clone()).await {
                Ok(_) => {
                    notices.success(format!("Column mapping saved ({} columns).", pairs.len()));
                    ctx.mapping.set(pairs);
                }
                Err(e) => notices.report(&e),
            }
            saving.set(false);
        });
    };

    let row_ids = move || model.with(|m| m.rows().iter().map(|r| r.id).collect::<Vec<_>>());
    let pair_count = Signal::derive(move || ctx.mapping.with(|m| m.len()));

    view! {
        <div class="column-mapping">
            <div class="column-mapping__toolbar">
                <Flex gap=FlexGap::Small>
                    <Button
                        on_click=move |_| spawn_connection_test(
                            ctx.sheet_url.get_untracked(),
                            ctx.sheet_name.get_untracked(),
                            notices,
                            testing,
                        )
                        disabled=Signal::derive(move || testing.get())
                    >
                        {move || if testing.get() { "Testing..." } else { "Test connection" }}
                    </Button>
                    <Button
                        on_click=on_fetch_headers
                        disabled=Signal::derive(move || fetching.get())
                    >
                        {icon("refresh")}
                        {move || if fetching.get() { " Loading columns..." } else { " Load sheet columns" }}
                    </Button>
                </Flex>
            </div>

            <Show
                when=move || !model.with(|m| m.rows().is_empty())
                fallback=|| view! {
                    <p class="description">"Load the sheet columns to start mapping them to catalog fields."</p>
                }
            >
                <table class="widefat column-mapping__rows">
                    <thead>
                        <tr>
                            <th>"Spreadsheet column"</th>
                            <th>"Catalog field"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=row_ids
                            key=|id| *id
                            children=move |id| view! { <MappingRowEditor model=model id=id /> }
                        />
                    </tbody>
                </table>
                <Flex gap=FlexGap::Small>
                    <Button on_click=move |_| {
                        model.update(|m| {
                            m.add();
                        });
                    }>
                        {icon("plus")}
                        " Add mapping"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=on_save
                        disabled=Signal::derive(move || saving.get())
                    >
                        {move || if saving.get() { "Saving..." } else { "Save mapping" }}
                    </Button>
                </Flex>
            </Show>

            <MappingStatus model=model />

            <Show when=move || { pair_count.get() > 0 }>
                <ImportPanel pair_count=pair_count />
            </Show>
        </div>
    }
}

#[component]
fn MappingRowEditor(model: RwSignal<MappingModel>, id: u32) -> impl IntoView {
    let source_options = Memo::new(move |_| model.with(|m| m.source_options(id)));
    let catalog_options = Memo::new(move |_| model.with(|m| m.catalog_options(id)));
    let source = Memo::new(move |_| model.with(|m| m.row(id).and_then(|r| r.source.clone())));
    let catalog = Memo::new(move |_| model.with(|m| m.row(id).and_then(|r| r.catalog)));

    let on_source = move |ev| {
        let value = event_target_value(&ev);
        let value = (!value.is_empty()).then_some(value);
        let accepted = model.try_update(|m| m.set_source(id, value)).unwrap_or(false);
        if !accepted {
            log::debug!("mapping row {}: source not offered", id);
        }
    };

    let on_catalog = move |ev| {
        let value = CatalogColumn::from_key(&event_target_value(&ev));
        let accepted = model.try_update(|m| m.set_catalog(id, value)).unwrap_or(false);
        if !accepted {
            log::debug!("mapping row {}: catalog field not offered", id);
        }
    };

    view! {
        <tr class="mapping-row">
            <td>
                <select class="mapping-row__source" on:change=on_source>
                    <option value="" selected=move || source.get().is_none()>"Select a column"</option>
                    {move || {
                        let current = source.get();
                        source_options
                            .get()
                            .into_iter()
                            .map(|h| {
                                let selected = current.as_deref() == Some(h.as_str());
                                let label = h.clone();
                                view! { <option value=h selected=selected>{label}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </td>
            <td>
                <select class="mapping-row__catalog" on:change=on_catalog>
                    <option value="" selected=move || catalog.get().is_none()>"Select a field"</option>
                    {move || {
                        let current = catalog.get();
                        catalog_options
                            .get()
                            .into_iter()
                            .map(|c| {
                                view! { <option value=c.key() selected=current == Some(c)>{c.label()}</option> }
                            })
                            .collect_view()
                    }}
                </select>
            </td>
            <td>
                <button
                    type="button"
                    class="button-link mapping-row__remove"
                    title="Remove"
                    on:click=move |_| model.update(|m| m.remove(id))
                >
                    {icon("trash")}
                </button>
            </td>
        </tr>
    }
}

/// Mapped and unmapped status chips for both sides
#[component]
fn MappingStatus(model: RwSignal<MappingModel>) -> impl IntoView {
    view! {
        <div class="mapping-status">
            <p class="mapping-status__summary">{move || model.with(|m| m.summary())}</p>
            <div class="mapping-status__group">
                <h4>"Catalog fields"</h4>
                {move || model.with(|m| m.catalog_chips()).into_iter().map(|(c, chip)| view! {
                    <span class=chip.css_class() title=c.key()>{c.label()}</span>
                }).collect_view()}
            </div>
            <Show when=move || model.with(|m| !m.headers().is_empty())>
                <div class="mapping-status__group">
                    <h4>"Sheet columns"</h4>
                    {move || model.with(|m| m.source_chips()).into_iter().map(|(h, chip)| view! {
                        <span class=chip.css_class()>{h}</span>
                    }).collect_view()}
                </div>
            </Show>
        </div>
    }
}
