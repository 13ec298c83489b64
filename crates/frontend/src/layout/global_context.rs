use contracts::domain::a002_column_mapping::MappingPair;
use leptos::prelude::*;

use crate::shared::config::AdminConfig;

/// Cross-component state of the catalog editor.
///
/// Components publish by writing these signals and subscribe through
/// effects; nothing holds a reference to the orchestrator.
#[derive(Clone, Copy)]
pub struct CatalogContext {
    pub catalog_id: RwSignal<Option<u64>>,
    pub sheet_url: RwSignal<String>,
    pub sheet_name: RwSignal<String>,
    /// Headers discovered in the spreadsheet, in sheet order
    pub source_headers: RwSignal<Vec<String>>,
    /// Last saved mapping
    pub mapping: RwSignal<Vec<MappingPair>>,
    pub has_data: RwSignal<bool>,
    /// Revision counter; the data grid reloads whenever it changes
    pub table_reload: RwSignal<u64>,
}

impl CatalogContext {
    pub fn new(cfg: &AdminConfig) -> Self {
        Self {
            catalog_id: RwSignal::new(cfg.catalog_id),
            sheet_url: RwSignal::new(cfg.sheet_url.clone()),
            sheet_name: RwSignal::new(cfg.sheet_name.clone()),
            source_headers: RwSignal::new(Vec::new()),
            mapping: RwSignal::new(Vec::new()),
            has_data: RwSignal::new(cfg.has_data),
            table_reload: RwSignal::new(0),
        }
    }

    pub fn request_table_reload(&self) {
        self.table_reload.update(|rev| *rev += 1);
    }

    pub fn catalog_id_untracked(&self) -> Option<u64> {
        self.catalog_id.get_untracked()
    }
}

pub fn use_catalog_context() -> CatalogContext {
    use_context::<CatalogContext>().expect("CatalogContext not provided in context")
}
