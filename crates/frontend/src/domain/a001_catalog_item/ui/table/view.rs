use contracts::domain::a001_catalog_item::aggregate::{CatalogItem, CatalogItemId};
use contracts::domain::a001_catalog_item::{CatalogColumn, ColumnType};
use contracts::projections::p900_catalog_table::SortColumn;
use contracts::shared::filter::FilterCondition;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::columns::{master_columns, ColumnPreset, ColumnSettings, TableColumn};
use super::image_upload::{ImageTarget, ImageUploadDialog};
use super::inline_edit::{CommitOutcome, EditSession};
use super::load_gate::LoadGate;
use super::state::TableViewState;
use crate::domain::a001_catalog_item::api;
use crate::layout::global_context::use_catalog_context;
use crate::shared::advanced_filter::AdvancedFilter;
use crate::shared::browser::{confirm, now_ms, open_in_new_tab};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::{
    EDIT_BLUR_GRACE_MS, EDIT_ERROR_FLASH_MS, PAGE_SIZE_OPTIONS, TABLE_LOAD_TIMEOUT_MS,
};
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, truncate, SearchInput};
use crate::shared::notices::use_notices;

/// Apply a state mutation and request one load when it asks for it
fn update_and_reload(
    state: RwSignal<TableViewState>,
    reload: RwSignal<u64>,
    f: impl FnOnce(&mut TableViewState) -> bool,
) {
    if state.try_update(f).unwrap_or(false) {
        reload.update(|n| *n += 1);
    }
}

/// Handlers shared by every rendered row
#[derive(Clone, Copy)]
struct RowActions {
    edit: RwSignal<Option<EditSession>>,
    begin_edit: Callback<(CatalogItemId, CatalogColumn)>,
    commit_edit: Callback<(CatalogItemId, CatalogColumn)>,
    cancel_edit: Callback<()>,
    open_upload: Callback<ImageTarget>,
    delete: Callback<CatalogItemId>,
}

#[component]
pub fn CatalogTable() -> impl IntoView {
    let ctx = use_catalog_context();
    let notices = use_notices();

    let state = RwSignal::new(TableViewState::default());
    let reload = RwSignal::new(0u64);
    let gate = StoredValue::new(LoadGate::new(TABLE_LOAD_TIMEOUT_MS));
    let (items, set_items) = signal(Vec::<CatalogItem>::new());
    let (is_loading, set_is_loading) = signal(false);
    let edit = RwSignal::new(None::<EditSession>);
    let upload_target = RwSignal::new(None::<ImageTarget>);
    let column_settings = RwSignal::new(None::<ColumnSettings>);

    let load = move || {
        let Some(catalog_id) = ctx.catalog_id_untracked() else {
            log::debug!("no catalog id yet, table load skipped");
            return;
        };
        let mut claimed = false;
        gate.update_value(|g| claimed = g.try_begin(now_ms()));
        if !claimed {
            return;
        }
        set_is_loading.set(true);
        let req = state.with_untracked(|s| s.to_request(catalog_id));

        spawn_local(async move {
            let result = api::fetch_table_page(&req).await;
            gate.update_value(|g| g.finish());
            set_is_loading.set(false);
            match result {
                Ok(resp) => {
                    set_items.set(resp.items);
                    let clamped = state.try_update(|s| s.set_total(resp.total)).unwrap_or(false);
                    if clamped {
                        // the current page emptied out, fetch the new last page
                        reload.update(|n| *n += 1);
                    }
                }
                Err(e) => notices.report(&e),
            }
        });
    };

    Effect::new(move |_| {
        reload.track();
        ctx.table_reload.track();
        load();
    });

    // ---- inline editing ----

    let commit_edit = Callback::new(move |(item_id, column): (CatalogItemId, CatalogColumn)| {
        let outcome = edit
            .try_update(|e| match e {
                Some(session) if session.is_for(item_id, column) => Some(session.commit()),
                _ => None,
            })
            .flatten();
        let req = match outcome {
            Some(CommitOutcome::Save(req)) => req,
            Some(CommitOutcome::Unchanged) => {
                edit.set(None);
                return;
            }
            Some(CommitOutcome::Busy) | None => return,
        };

        spawn_local(async move {
            match api::update_item(&req).await {
                Ok(_) => {
                    let saved = req.value_of(column).map(str::to_string);
                    set_items.update(|rows| {
                        if let Some(row) = rows.iter_mut().find(|r| r.id == item_id) {
                            row.set_value(column, saved);
                        }
                    });
                    edit.update(|e| {
                        if e.as_ref().is_some_and(|s| s.is_for(item_id, column)) {
                            *e = None;
                        }
                    });
                    log::debug!("item {} {} updated", item_id, column);
                }
                Err(err) => {
                    edit.update(|e| {
                        if let Some(s) = e.as_mut().filter(|s| s.is_for(item_id, column)) {
                            s.fail();
                        }
                    });
                    notices.report(&err);
                    TimeoutFuture::new(EDIT_ERROR_FLASH_MS).await;
                    edit.try_update(|e| {
                        if let Some(s) = e.as_mut().filter(|s| s.is_for(item_id, column)) {
                            s.clear_error();
                        }
                    });
                }
            }
        });
    });

    let begin_edit = Callback::new(move |(item_id, column): (CatalogItemId, CatalogColumn)| {
        let open = edit.with_untracked(|e| {
            e.as_ref()
                .filter(|s| !s.is_saving())
                .map(|s| (s.item_id, s.column))
        });
        if let Some(cell) = open {
            if cell == (item_id, column) {
                return;
            }
            commit_edit.run(cell);
        }
        let session = items.with_untracked(|rows| {
            rows.iter()
                .find(|r| r.id == item_id)
                .and_then(|item| EditSession::begin(item, column))
        });
        if session.is_some() {
            edit.set(session);
        }
    });

    let delete = Callback::new(move |item_id: CatalogItemId| {
        if !confirm("Are you sure you want to delete this item? This cannot be undone.") {
            return;
        }
        spawn_local(async move {
            match api::delete_item(item_id).await {
                Ok(_) => {
                    notices.success("Item deleted.");
                    reload.update(|n| *n += 1);
                }
                Err(e) => notices.report(&e),
            }
        });
    });

    let actions = RowActions {
        edit,
        begin_edit,
        commit_edit,
        cancel_edit: Callback::new(move |_| edit.set(None)),
        open_upload: Callback::new(move |target: ImageTarget| upload_target.set(Some(target))),
        delete,
    };

    // ---- toolbar handlers ----

    let on_search = Callback::new(move |q: String| {
        update_and_reload(state, reload, |s| s.set_search(&q));
    });
    let on_apply_filters = Callback::new(move |filters: Vec<FilterCondition>| {
        update_and_reload(state, reload, |s| s.apply_filters(filters));
    });
    let on_clear_filters = Callback::new(move |_: ()| {
        update_and_reload(state, reload, |s| s.clear_filters());
    });
    let on_apply_columns = Callback::new(move |columns: Vec<CatalogColumn>| {
        column_settings.set(None);
        update_and_reload(state, reload, |s| s.apply_columns(columns));
    });
    let sort_by = move |column: SortColumn| {
        update_and_reload(state, reload, |s| s.toggle_sort(column));
    };

    let visible = Memo::new(move |_| state.with(|s| s.visible_columns.clone()));
    let settings_open = Memo::new(move |_| column_settings.with(Option::is_some));

    let sort_header = move |column: SortColumn, label: &'static str| {
        view! {
            <th class="sortable" on:click=move |_| sort_by(column)>
                {label}
                <span class=move || state.with(|s| get_sort_class(s.sort_column, column))>
                    {move || state.with(|s| get_sort_indicator(s.sort_column, column, s.sort_direction))}
                </span>
            </th>
        }
    };

    view! {
        <div class="catalog-table">
            <div class="catalog-table__toolbar">
                <Flex gap=FlexGap::Small>
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.search.clone()))
                        on_change=on_search
                    />
                    <Button on_click=move |_| {
                        let current = state.with_untracked(|s| s.visible_columns.clone());
                        column_settings.set(Some(ColumnSettings::from_visible(&current)));
                    }>
                        {icon("columns")}
                        " Columns"
                    </Button>
                    <Button
                        on_click=move |_| reload.update(|n| *n += 1)
                        disabled=Signal::derive(move || is_loading.get())
                    >
                        {icon("refresh")}
                        {move || if is_loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                    <Button on_click=move |_| notices.info(
                        "Catalog items are created by importing the sheet. Existing rows can be edited inline.",
                    )>
                        {icon("plus")}
                        " Add item"
                    </Button>
                </Flex>
            </div>

            <AdvancedFilter
                applied=Signal::derive(move || state.with(|s| s.filters.clone()))
                on_apply=on_apply_filters
                on_clear=on_clear_filters
            />

            <Show when=move || settings_open.get()>
                <ColumnSettingsPanel settings=column_settings on_apply=on_apply_columns />
            </Show>

            <div class=move || if is_loading.get() { "table-wrapper table-wrapper--loading" } else { "table-wrapper" }>
                <table class="wp-list-table widefat striped catalog-table__grid">
                    <thead>
                        <tr>
                            {sort_header(SortColumn::RowId, "ID")}
                            {move || visible.get().into_iter().map(|c| sort_header(SortColumn::Field(c), c.label())).collect_view()}
                            <th class="column-actions">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let columns = visible.get();
                            let rows = items.get();
                            if rows.is_empty() {
                                let span = columns.len() + 2;
                                let text = if state.with_untracked(|s| s.is_loaded) { "No items found." } else { "Loading..." };
                                return view! {
                                    <tr class="no-items"><td colspan=span.to_string()>{text}</td></tr>
                                }.into_any();
                            }
                            rows.into_iter()
                                .map(|item| view! { <CatalogRow item=item columns=columns.clone() actions=actions /> })
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || state.with(|s| s.page))
                total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                range_label=Signal::derive(move || state.with(|s| s.range_label()))
                page_size=Signal::derive(move || state.with(|s| s.page_size))
                on_page_change=Callback::new(move |page: usize| {
                    update_and_reload(state, reload, |s| s.go_to_page(page));
                })
                on_page_size_change=Callback::new(move |size: usize| {
                    update_and_reload(state, reload, |s| s.set_page_size(size));
                })
                page_size_options=PAGE_SIZE_OPTIONS.to_vec()
                disabled=Signal::derive(move || is_loading.get())
            />

            {move || {
                let target = upload_target.get()?;
                let catalog_id = ctx.catalog_id_untracked()?;
                Some(view! {
                    <ImageUploadDialog
                        catalog_id=catalog_id
                        target=target
                        on_close=Callback::new(move |_| upload_target.set(None))
                        on_uploaded=Callback::new(move |(item_id, column, url): (CatalogItemId, CatalogColumn, String)| {
                            set_items.update(|rows| {
                                if let Some(row) = rows.iter_mut().find(|r| r.id == item_id) {
                                    row.set_value(column, Some(url));
                                }
                            });
                        })
                    />
                })
            }}
        </div>
    }
}

#[component]
fn CatalogRow(item: CatalogItem, columns: Vec<CatalogColumn>, actions: RowActions) -> impl IntoView {
    let item_id = item.id;

    view! {
        <tr>
            <td class="column-id">{item_id.to_string()}</td>
            {columns.into_iter().map(|c| {
                let value = item.value(c).map(str::to_string);
                let column = TableColumn::of(c);
                if c.is_image() {
                    view! { <ImageCell item_id=item_id column=c value=value actions=actions /> }.into_any()
                } else {
                    view! { <DataCell item_id=item_id column=column value=value actions=actions /> }.into_any()
                }
            }).collect_view()}
            <td class="column-actions">
                <button
                    type="button"
                    class="button-link button-link-delete"
                    title="Delete"
                    on:click=move |_| actions.delete.run(item_id)
                >
                    {icon("trash")}
                </button>
            </td>
        </tr>
    }
}

#[component]
fn DataCell(
    item_id: CatalogItemId,
    column: TableColumn,
    value: Option<String>,
    actions: RowActions,
) -> impl IntoView {
    let col = column.column;
    let editing_here = Memo::new(move |_| {
        actions
            .edit
            .with(|e| e.as_ref().is_some_and(|s| s.is_for(item_id, col)))
    });
    let text = value.unwrap_or_default();
    let cell_class = match column.kind {
        ColumnType::Number => "cell-editable cell-number",
        ColumnType::Text => "cell-editable",
    };

    view! {
        <td
            class=cell_class
            title="Double-click to edit"
            on:dblclick=move |_| actions.begin_edit.run((item_id, col))
        >
            {move || if editing_here.get() {
                view! { <CellEditor item_id=item_id column=column actions=actions /> }.into_any()
            } else {
                let shown = truncate(&text, 60);
                view! { <span class="cell-value" title=text.clone()>{shown}</span> }.into_any()
            }}
        </td>
    }
}

#[component]
fn CellEditor(item_id: CatalogItemId, column: TableColumn, actions: RowActions) -> impl IntoView {
    let col = column.column;
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let initial = actions
        .edit
        .with_untracked(|e| e.as_ref().map(|s| s.draft.clone()).unwrap_or_default());

    Effect::new(move |_| {
        if let Some(el) = input_ref.get() {
            let _ = el.focus();
            el.select();
        }
    });

    // a failed save hands the input back focused, so the next blur commits again
    let failed = Memo::new(move |_| actions.edit.with(|e| e.as_ref().is_some_and(|s| s.needs_refocus())));
    Effect::new(move |_| {
        if failed.get() {
            if let Some(el) = input_ref.get_untracked() {
                let _ = el.focus();
            }
        }
    });

    let input_class = move || {
        actions.edit.with(|e| match e {
            Some(s) if s.error => "cell-editor cell-editor--error",
            Some(s) if s.is_saving() => "cell-editor cell-editor--saving",
            _ => "cell-editor",
        })
    };

    view! {
        <input
            node_ref=input_ref
            type=column.input_type()
            step="any"
            class=input_class
            value=initial
            prop:readOnly=move || actions.edit.with(|e| e.as_ref().is_some_and(|s| s.is_saving()))
            on:input=move |ev| {
                let v = event_target_value(&ev);
                actions.edit.update(|e| {
                    if let Some(s) = e.as_mut() {
                        s.set_draft(v);
                    }
                });
            }
            on:keydown=move |ev: leptos::ev::KeyboardEvent| match ev.key().as_str() {
                "Enter" => {
                    ev.prevent_default();
                    actions.commit_edit.run((item_id, col));
                }
                "Escape" => {
                    ev.prevent_default();
                    actions.cancel_edit.run(());
                }
                _ => {}
            }
            on:blur=move |_| {
                spawn_local(async move {
                    TimeoutFuture::new(EDIT_BLUR_GRACE_MS).await;
                    actions.commit_edit.run((item_id, col));
                });
            }
        />
    }
}

#[component]
fn ImageCell(
    item_id: CatalogItemId,
    column: CatalogColumn,
    value: Option<String>,
    actions: RowActions,
) -> impl IntoView {
    let url = value.filter(|v| !v.trim().is_empty());
    let target = ImageTarget {
        item_id,
        column,
        current_url: url.clone(),
    };

    view! {
        <td
            class="cell-image"
            title="Click to upload an image"
            on:click=move |_| actions.open_upload.run(target.clone())
        >
            {match url {
                Some(src) => {
                    let full = src.clone();
                    view! {
                        <img
                            class="cell-image__thumb"
                            src=src
                            alt=""
                            title="Open full size"
                            on:click=move |ev| {
                                ev.stop_propagation();
                                open_in_new_tab(&full);
                            }
                        />
                        <span class="cell-image__upload">{icon("upload")}</span>
                    }.into_any()
                }
                None => view! { <span class="cell-image__empty">{icon("image")}</span> }.into_any(),
            }}
        </td>
    }
}

/// Column chooser with presets; changes apply only on "Apply"
#[component]
fn ColumnSettingsPanel(
    settings: RwSignal<Option<ColumnSettings>>,
    on_apply: Callback<Vec<CatalogColumn>>,
) -> impl IntoView {
    let is_checked = move |c: CatalogColumn| settings.with(|s| s.as_ref().is_some_and(|s| s.is_checked(c)));

    let apply = move |_| {
        let resolved = settings.with_untracked(|s| s.as_ref().map(ColumnSettings::resolve));
        match resolved {
            Some(columns) if !columns.is_empty() => on_apply.run(columns),
            Some(_) => log::debug!("column settings left empty, not applied"),
            None => {}
        }
    };

    view! {
        <div class="column-settings postbox">
            <div class="column-settings__presets">
                {ColumnPreset::ALL.into_iter().map(|preset| view! {
                    <button
                        type="button"
                        class=move || {
                            let active = settings.with(|s| s.as_ref().and_then(|s| s.last_preset()) == Some(preset));
                            if active { "button button-primary" } else { "button" }
                        }
                        on:click=move |_| settings.update(|s| {
                            if let Some(s) = s.as_mut() {
                                s.apply_preset(preset);
                            }
                        })
                    >
                        {preset.label()}
                    </button>
                }).collect_view()}
            </div>
            <div class="column-settings__list">
                {master_columns().into_iter().map(|tc| {
                    let c = tc.column;
                    view! {
                        <label class="column-settings__item">
                            <input
                                type="checkbox"
                                prop:checked=move || is_checked(c)
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    settings.update(|s| {
                                        if let Some(s) = s.as_mut() {
                                            s.toggle(c, on);
                                        }
                                    });
                                }
                            />
                            {tc.label}
                        </label>
                    }
                }).collect_view()}
            </div>
            <Flex gap=FlexGap::Small>
                <Button appearance=ButtonAppearance::Primary on_click=apply>
                    "Apply"
                </Button>
                <Button on_click=move |_| settings.set(None)>
                    "Cancel"
                </Button>
            </Flex>
        </div>
    }
}
