/// List helpers shared by the data grid: sort indicators and debounced search
use contracts::projections::p900_catalog_table::{SortColumn, SortDirection};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use super::config::SEARCH_DEBOUNCE_MS;

/// Arrow shown next to a sortable header
pub fn get_sort_indicator(
    current: SortColumn,
    field: SortColumn,
    direction: SortDirection,
) -> &'static str {
    if current == field {
        match direction {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current: SortColumn, field: SortColumn) -> &'static str {
    if current == field {
        "sort-icon sort-icon--active"
    } else {
        "sort-icon"
    }
}

/// Shorten long cell text for display
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}…", truncated)
    }
}

/// Search box that reports its value after a quiet period
#[component]
pub fn SearchInput(
    /// Value applied to the grid, used for the "active" highlight
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search products...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    // dropping the pending Timeout cancels it
    let debounce_timeout = StoredValue::new_local(None::<Timeout>);

    let cancel_pending = move || {
        debounce_timeout.update_value(|t| {
            t.take();
        });
    };

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let pending = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            on_change.run(new_value);
        });
        debounce_timeout.set_value(Some(pending));
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_| {
        cancel_pending();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="search"
                placeholder=placeholder
                class=move || if is_filter_active() { "search-input__field search-input__field--active" } else { "search-input__field" }
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button
                    type="button"
                    class="search-input__clear"
                    on:click=clear_filter
                    title="Clear"
                >
                    {super::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_catalog_item::CatalogColumn;

    #[test]
    fn test_sort_indicator() {
        let name = SortColumn::Field(CatalogColumn::ProductName);
        assert_eq!(get_sort_indicator(name, name, SortDirection::Asc), " ▲");
        assert_eq!(get_sort_indicator(name, name, SortDirection::Desc), " ▼");
        assert_eq!(get_sort_indicator(SortColumn::RowId, name, SortDirection::Asc), " ⇅");
        assert_eq!(get_sort_class(name, name), "sort-icon sort-icon--active");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Lamp", 10), "Lamp");
        assert_eq!(truncate("Лампа настольная", 5), "Лампа…");
    }
}
