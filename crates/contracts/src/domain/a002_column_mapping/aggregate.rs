use serde::{Deserialize, Serialize};

use crate::domain::a001_catalog_item::CatalogColumn;

/// One persisted association of a spreadsheet header to a catalog field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingPair {
    /// Header label exactly as it appears in the sheet's first row
    pub source_column: String,
    pub catalog_column: CatalogColumn,
}

impl MappingPair {
    pub fn new(source_column: impl Into<String>, catalog_column: CatalogColumn) -> Self {
        Self {
            source_column: source_column.into(),
            catalog_column,
        }
    }
}
