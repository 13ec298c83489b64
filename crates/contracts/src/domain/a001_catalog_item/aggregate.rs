use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::columns::CatalogColumn;

// ============================================================================
// ID Type
// ============================================================================

/// Stable row id assigned by the catalog table on import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogItemId(#[serde(deserialize_with = "de_lenient_u64")] pub u64);

impl std::fmt::Display for CatalogItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// One imported catalog row.
///
/// `$wpdb` hands every column back as a string, so all fields accept either
/// JSON strings or numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogItemId,

    #[serde(default, deserialize_with = "de_lenient_string")]
    pub product_id: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub product_price: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub product_qty: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub product_image_url: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub product_sort_order: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub product_description: Option<String>,

    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_id_1: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_name_1: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_image_url_1: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_sort_order_1: Option<String>,

    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_id_2: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_name_2: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_image_url_2: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_sort_order_2: Option<String>,

    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_id_3: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_name_3: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_image_url_3: Option<String>,
    #[serde(default, deserialize_with = "de_lenient_string")]
    pub category_sort_order_3: Option<String>,
}

impl CatalogItem {
    /// Raw cell value of a catalog field
    pub fn value(&self, column: CatalogColumn) -> Option<&str> {
        self.slot(column).as_deref()
    }

    /// Replace a field after a successful inline edit or image upload
    pub fn set_value(&mut self, column: CatalogColumn, value: Option<String>) {
        *self.slot_mut(column) = value;
    }

    fn slot(&self, column: CatalogColumn) -> &Option<String> {
        match column {
            CatalogColumn::ProductId => &self.product_id,
            CatalogColumn::ProductName => &self.product_name,
            CatalogColumn::ProductPrice => &self.product_price,
            CatalogColumn::ProductQty => &self.product_qty,
            CatalogColumn::ProductImageUrl => &self.product_image_url,
            CatalogColumn::ProductSortOrder => &self.product_sort_order,
            CatalogColumn::ProductDescription => &self.product_description,
            CatalogColumn::CategoryId1 => &self.category_id_1,
            CatalogColumn::CategoryName1 => &self.category_name_1,
            CatalogColumn::CategoryImageUrl1 => &self.category_image_url_1,
            CatalogColumn::CategorySortOrder1 => &self.category_sort_order_1,
            CatalogColumn::CategoryId2 => &self.category_id_2,
            CatalogColumn::CategoryName2 => &self.category_name_2,
            CatalogColumn::CategoryImageUrl2 => &self.category_image_url_2,
            CatalogColumn::CategorySortOrder2 => &self.category_sort_order_2,
            CatalogColumn::CategoryId3 => &self.category_id_3,
            CatalogColumn::CategoryName3 => &self.category_name_3,
            CatalogColumn::CategoryImageUrl3 => &self.category_image_url_3,
            CatalogColumn::CategorySortOrder3 => &self.category_sort_order_3,
        }
    }

    fn slot_mut(&mut self, column: CatalogColumn) -> &mut Option<String> {
        match column {
            CatalogColumn::ProductId => &mut self.product_id,
            CatalogColumn::ProductName => &mut self.product_name,
            CatalogColumn::ProductPrice => &mut self.product_price,
            CatalogColumn::ProductQty => &mut self.product_qty,
            CatalogColumn::ProductImageUrl => &mut self.product_image_url,
            CatalogColumn::ProductSortOrder => &mut self.product_sort_order,
            CatalogColumn::ProductDescription => &mut self.product_description,
            CatalogColumn::CategoryId1 => &mut self.category_id_1,
            CatalogColumn::CategoryName1 => &mut self.category_name_1,
            CatalogColumn::CategoryImageUrl1 => &mut self.category_image_url_1,
            CatalogColumn::CategorySortOrder1 => &mut self.category_sort_order_1,
            CatalogColumn::CategoryId2 => &mut self.category_id_2,
            CatalogColumn::CategoryName2 => &mut self.category_name_2,
            CatalogColumn::CategoryImageUrl2 => &mut self.category_image_url_2,
            CatalogColumn::CategorySortOrder2 => &mut self.category_sort_order_2,
            CatalogColumn::CategoryId3 => &mut self.category_id_3,
            CatalogColumn::CategoryName3 => &mut self.category_name_3,
            CatalogColumn::CategoryImageUrl3 => &mut self.category_image_url_3,
            CatalogColumn::CategorySortOrder3 => &mut self.category_sort_order_3,
        }
    }
}

fn de_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    })
}

fn de_lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("invalid item id: {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid item id: {s}"))),
        other => Err(D::Error::custom(format!("invalid item id: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wpdb_string_row_is_accepted() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": "42",
            "product_id": "SKU-1",
            "product_name": "Lamp",
            "product_price": "12.50",
            "product_qty": 3,
            "category_name_2": null
        }))
        .unwrap();

        assert_eq!(item.id, CatalogItemId(42));
        assert_eq!(item.value(CatalogColumn::ProductPrice), Some("12.50"));
        assert_eq!(item.value(CatalogColumn::ProductQty), Some("3"));
        assert_eq!(item.value(CatalogColumn::CategoryName2), None);
        assert_eq!(item.value(CatalogColumn::CategoryName3), None);
    }

    #[test]
    fn test_set_value_updates_the_matching_field() {
        let mut item = CatalogItem::default();
        item.set_value(CatalogColumn::CategoryImageUrl1, Some("https://x/1.png".into()));
        assert_eq!(item.category_image_url_1.as_deref(), Some("https://x/1.png"));
        assert_eq!(item.value(CatalogColumn::CategoryImageUrl1), Some("https://x/1.png"));
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        let res: Result<CatalogItem, _> = serde_json::from_value(json!({"id": "abc"}));
        assert!(res.is_err());
    }
}
