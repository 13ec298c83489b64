use crate::domain::a001_catalog_item::ui::table::CatalogTable;
use crate::domain::a002_column_mapping::ui::ColumnMappingEditor;
use crate::layout::global_context::{use_catalog_context, CatalogContext};
use crate::layout::tabs::router::{catalog_tab_ids, CATALOG_TABS};
use crate::layout::tabs::{TabNav, TabPanel, TabsContext};
use crate::shared::config::{AdminConfig, AdminPage};
use crate::shared::notices::{NoticeHost, NoticeService};
use crate::system::settings::SettingsPage;
use crate::usecases::u501_import_from_sheets::SheetSourceForm;
use crate::usecases::u502_export_catalog::ExportPanel;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let cfg = AdminConfig::current();

    // Notices are shared by every screen
    provide_context(NoticeService::new());

    let page = match cfg.page {
        AdminPage::CatalogEdit => {
            provide_context(CatalogContext::new(&cfg));
            provide_context(TabsContext::new(&catalog_tab_ids()));
            view! { <CatalogEditor /> }.into_any()
        }
        AdminPage::Settings => view! { <SettingsPage /> }.into_any(),
    };

    view! {
        <div class="catalog-master">
            <NoticeHost />
            {page}
        </div>
    }
}

/// Tabbed catalog editor
#[component]
fn CatalogEditor() -> impl IntoView {
    let ctx = use_catalog_context();

    view! {
        <TabNav tabs=&CATALOG_TABS />
        <TabPanel id="settings">
            <SheetSourceForm url=ctx.sheet_url name=ctx.sheet_name />
        </TabPanel>
        <TabPanel id="mapping">
            <ColumnMappingEditor />
        </TabPanel>
        <TabPanel id="data">
            <Show
                when=move || ctx.has_data.get()
                fallback=|| view! {
                    <div class="catalog-no-data">
                        <p>"No data imported yet. Map the sheet columns and run an import first."</p>
                    </div>
                }
            >
                <CatalogTable />
            </Show>
        </TabPanel>
        <TabPanel id="export">
            <ExportPanel />
        </TabPanel>
    }
}
