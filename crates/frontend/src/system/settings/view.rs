use leptos::prelude::*;

use crate::shared::config::AdminConfig;
use crate::usecases::u501_import_from_sheets::SheetSourceForm;

/// Plugin settings screen: sheet coordinates with a live URL check and a
/// connection test. The surrounding options form is rendered by WordPress.
#[component]
pub fn SettingsPage() -> impl IntoView {
    let cfg = AdminConfig::current();
    let url = RwSignal::new(cfg.sheet_url);
    let name = RwSignal::new(cfg.sheet_name);

    view! {
        <div class="catalog-master-settings">
            <h2>"Google Sheets source"</h2>
            <p class="description">
                "The spreadsheet must be shared as \"Anyone with the link can view\"."
            </p>
            <SheetSourceForm url=url name=name />
        </div>
    }
}
