use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::domain::a001_catalog_item::aggregate::{CatalogItem, CatalogItemId};
use crate::domain::a001_catalog_item::CatalogColumn;
use crate::shared::filter::FilterCondition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sortable key of the catalog table: the row id or any catalog field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    RowId,
    Field(CatalogColumn),
}

impl SortColumn {
    pub fn key(&self) -> &'static str {
        match self {
            SortColumn::RowId => "id",
            SortColumn::Field(column) => column.key(),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        if key == "id" {
            return Some(SortColumn::RowId);
        }
        CatalogColumn::from_key(key).map(SortColumn::Field)
    }
}

impl Serialize for SortColumn {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for SortColumn {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        SortColumn::from_key(&key)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown sort column: {key}")))
    }
}

/// One page request of the catalog data table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePageRequest {
    pub catalog_id: u64,
    pub page: usize,
    pub per_page: usize,
    #[serde(default)]
    pub search: String,
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterCondition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TablePageResponse {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    /// Total rows matching search and filters, across all pages
    #[serde(default)]
    pub total: usize,
}

/// Field updates of one item, sent as `data[<column key>]=<value>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    pub item_id: CatalogItemId,
    pub data: BTreeMap<String, String>,
}

impl UpdateItemRequest {
    /// Inline edits change exactly one cell
    pub fn single(item_id: CatalogItemId, column: CatalogColumn, value: impl Into<String>) -> Self {
        let mut data = BTreeMap::new();
        data.insert(column.key().to_string(), value.into());
        Self { item_id, data }
    }

    pub fn value_of(&self, column: CatalogColumn) -> Option<&str> {
        self.data.get(column.key()).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteItemRequest {
    pub item_id: CatalogItemId,
}

/// Non-file fields sent alongside the uploaded image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadImageRequest {
    pub catalog_id: u64,
    pub item_id: CatalogItemId,
    pub field: CatalogColumn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadImageResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_column_wire_names() {
        assert_eq!(serde_json::to_value(SortColumn::RowId).unwrap(), json!("id"));
        assert_eq!(
            serde_json::to_value(SortColumn::Field(CatalogColumn::ProductName)).unwrap(),
            json!("product_name")
        );
        let parsed: SortColumn = serde_json::from_value(json!("id")).unwrap();
        assert_eq!(parsed, SortColumn::RowId);
        let parsed: SortColumn = serde_json::from_value(json!("product_qty")).unwrap();
        assert_eq!(parsed, SortColumn::Field(CatalogColumn::ProductQty));
    }

    #[test]
    fn test_sort_direction_toggle() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }

    #[test]
    fn test_update_is_keyed_by_field() {
        let req = UpdateItemRequest::single(CatalogItemId(5), CatalogColumn::ProductName, "Desk lamp");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"item_id": 5, "data": {"product_name": "Desk lamp"}})
        );
        assert_eq!(req.value_of(CatalogColumn::ProductName), Some("Desk lamp"));
        assert_eq!(req.value_of(CatalogColumn::ProductPrice), None);
    }

    #[test]
    fn test_page_response_defaults() {
        let resp: TablePageResponse = serde_json::from_value(json!({"total": 3})).unwrap();
        assert!(resp.items.is_empty());
        assert_eq!(resp.total, 3);
    }
}
