use contracts::domain::a001_catalog_item::CatalogColumn;
use contracts::shared::ajax::CatalogError;
use contracts::shared::filter::{FilterCondition, FilterLogic, FilterOperator};
use leptos::prelude::*;
use thaw::*;

use super::model::{FilterModel, ValueInput};
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::icons::icon;
use crate::shared::notices::use_notices;

/// Chained condition builder above the data grid
#[component]
pub fn AdvancedFilter(
    /// Conditions the grid currently uses
    #[prop(into)]
    applied: Signal<Vec<FilterCondition>>,
    on_apply: Callback<Vec<FilterCondition>>,
    on_clear: Callback<()>,
) -> impl IntoView {
    let notices = use_notices();
    let model = RwSignal::new(FilterModel::new());
    let is_expanded = RwSignal::new(false);

    let active_count = Signal::derive(move || applied.with(|a| a.len()));

    let add_row = move |_| {
        model.update(|m| {
            m.add();
        });
        is_expanded.set(true);
    };

    let apply = move |_| {
        let collected = model.with_untracked(|m| m.collect());
        if collected.is_empty() {
            notices.report(&CatalogError::validation(
                "Please add at least one complete filter condition.",
            ));
            return;
        }
        let count = collected.len();
        log::debug!("applying {} filter conditions", count);
        on_apply.run(collected);
        notices.success(format!(
            "{} filter condition{} applied.",
            count,
            if count == 1 { "" } else { "s" }
        ));
    };

    let clear_all = move |_| {
        model.update(|m| m.clear());
        on_clear.run(());
    };

    let remove_applied = move |id: u32| {
        model.update(|m| m.remove(id));
        let remaining = applied.with_untracked(|a| FilterModel::without_applied(a, id));
        if remaining.is_empty() {
            on_clear.run(());
        } else {
            on_apply.run(remaining);
        }
    };

    let filter_tags = move || {
        applied
            .get()
            .into_iter()
            .map(|c| {
                let id = c.id;
                view! {
                    <FilterTag
                        label=c.display_text()
                        on_remove=Callback::new(move |_| remove_applied(id))
                    />
                }
            })
            .collect_view()
    };

    view! {
        <div class="filter-panel-tags">{filter_tags}</div>
        <FilterPanel is_expanded=is_expanded active_filters_count=active_count>
            <div class="advanced-filter">
                <For
                    each=move || model.with(|m| m.rows().iter().map(|r| r.id).collect::<Vec<_>>())
                    key=|id| *id
                    children=move |id| view! { <FilterRowEditor model=model id=id /> }
                />
                <Show when=move || model.with(|m| m.is_empty())>
                    <p class="advanced-filter__empty">"No conditions yet. Add one to narrow the catalog."</p>
                </Show>
                <Flex gap=FlexGap::Small>
                    <Button on_click=add_row>
                        {icon("plus")}
                        " Add condition"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=apply>
                        "Apply filters"
                    </Button>
                    <Button on_click=clear_all>
                        "Clear all"
                    </Button>
                </Flex>
            </div>
        </FilterPanel>
    }
}

#[component]
fn FilterRowEditor(model: RwSignal<FilterModel>, id: u32) -> impl IntoView {
    // memos keep the inputs mounted while the user types
    let shows_logic = Memo::new(move |_| model.with(|m| m.shows_logic(id)));
    let input = Memo::new(move |_| model.with(|m| m.input_for(id)));

    let read = move |f: fn(&super::model::FilterRow) -> String| {
        model.with(|m| m.row(id).map(f).unwrap_or_default())
    };

    let value_box = move |second: bool, html_type: &'static str| {
        view! {
            <input
                class="advanced-filter__value"
                type=html_type
                placeholder=if second { "and..." } else { "Value" }
                prop:value=move || {
                    if second { read(|r| r.value2.clone()) } else { read(|r| r.value.clone()) }
                }
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    model.update(|m| {
                        if second { m.set_value2(id, v) } else { m.set_value(id, v) }
                    });
                }
            />
        }
    };

    view! {
        <div class="advanced-filter__row">
            {move || if shows_logic.get() {
                view! {
                    <select
                        class="advanced-filter__logic"
                        prop:value=move || read(|r| r.logic.as_str().to_string())
                        on:change=move |ev| {
                            if let Ok(logic) = event_target_value(&ev).parse::<FilterLogic>() {
                                model.update(|m| m.set_logic(id, logic));
                            }
                        }
                    >
                        <option value="AND">"AND"</option>
                        <option value="OR">"OR"</option>
                    </select>
                }.into_any()
            } else {
                view! { <span class="advanced-filter__where">"WHERE"</span> }.into_any()
            }}

            <select
                class="advanced-filter__column"
                prop:value=move || read(|r| r.column.map(|c| c.key().to_string()).unwrap_or_default())
                on:change=move |ev| {
                    let column = CatalogColumn::from_key(&event_target_value(&ev));
                    model.update(|m| m.set_column(id, column));
                }
            >
                <option value="">"Select column..."</option>
                {CatalogColumn::all().iter().map(|c| view! {
                    <option value=c.key()>{c.label()}</option>
                }).collect_view()}
            </select>

            <select
                class="advanced-filter__operator"
                prop:value=move || read(|r| r.operator.map(|o| o.as_str().to_string()).unwrap_or_default())
                on:change=move |ev| {
                    let op = event_target_value(&ev).parse::<FilterOperator>().ok();
                    model.update(|m| m.set_operator(id, op));
                }
            >
                <option value="">"Select operator..."</option>
                {FilterOperator::ALL.iter().map(|op| view! {
                    <option value=op.as_str()>{op.label()}</option>
                }).collect_view()}
            </select>

            {move || match input.get() {
                ValueInput::Hidden => view! { <></> }.into_any(),
                ValueInput::Single(kind) => value_box(false, kind.html_type()).into_any(),
                ValueInput::Range(kind) => view! {
                    <span class="advanced-filter__range">
                        {value_box(false, kind.html_type())}
                        <span>"and"</span>
                        {value_box(true, kind.html_type())}
                    </span>
                }.into_any(),
            }}

            <button
                type="button"
                class="button-link advanced-filter__remove"
                title="Remove condition"
                on:click=move |_| model.update(|m| m.remove(id))
            >
                {icon("trash")}
            </button>
        </div>
    }
}
