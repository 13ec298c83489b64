use serde::{Deserialize, Serialize};

/// Semantic type of a catalog field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Number,
}

/// Which part of the catalog row a field belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnGroup {
    Product,
    Category1,
    Category2,
    Category3,
}

impl ColumnGroup {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnGroup::Product => "Product",
            ColumnGroup::Category1 => "Category 1",
            ColumnGroup::Category2 => "Category 2",
            ColumnGroup::Category3 => "Category 3",
        }
    }
}

/// Fixed destination fields of an imported catalog row.
///
/// Seven product fields followed by three identical category slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogColumn {
    ProductId,
    ProductName,
    ProductPrice,
    ProductQty,
    ProductImageUrl,
    ProductSortOrder,
    ProductDescription,
    #[serde(rename = "category_id_1")]
    CategoryId1,
    #[serde(rename = "category_name_1")]
    CategoryName1,
    #[serde(rename = "category_image_url_1")]
    CategoryImageUrl1,
    #[serde(rename = "category_sort_order_1")]
    CategorySortOrder1,
    #[serde(rename = "category_id_2")]
    CategoryId2,
    #[serde(rename = "category_name_2")]
    CategoryName2,
    #[serde(rename = "category_image_url_2")]
    CategoryImageUrl2,
    #[serde(rename = "category_sort_order_2")]
    CategorySortOrder2,
    #[serde(rename = "category_id_3")]
    CategoryId3,
    #[serde(rename = "category_name_3")]
    CategoryName3,
    #[serde(rename = "category_image_url_3")]
    CategoryImageUrl3,
    #[serde(rename = "category_sort_order_3")]
    CategorySortOrder3,
}

impl CatalogColumn {
    /// Schema order; mapping selects and status chips follow it
    pub const ALL: [CatalogColumn; 19] = [
        CatalogColumn::ProductId,
        CatalogColumn::ProductName,
        CatalogColumn::ProductPrice,
        CatalogColumn::ProductQty,
        CatalogColumn::ProductImageUrl,
        CatalogColumn::ProductSortOrder,
        CatalogColumn::ProductDescription,
        CatalogColumn::CategoryId1,
        CatalogColumn::CategoryName1,
        CatalogColumn::CategoryImageUrl1,
        CatalogColumn::CategorySortOrder1,
        CatalogColumn::CategoryId2,
        CatalogColumn::CategoryName2,
        CatalogColumn::CategoryImageUrl2,
        CatalogColumn::CategorySortOrder2,
        CatalogColumn::CategoryId3,
        CatalogColumn::CategoryName3,
        CatalogColumn::CategoryImageUrl3,
        CatalogColumn::CategorySortOrder3,
    ];

    pub fn all() -> &'static [CatalogColumn] {
        &Self::ALL
    }

    /// Identifier used on the wire and in the catalog table
    pub fn key(&self) -> &'static str {
        match self {
            CatalogColumn::ProductId => "product_id",
            CatalogColumn::ProductName => "product_name",
            CatalogColumn::ProductPrice => "product_price",
            CatalogColumn::ProductQty => "product_qty",
            CatalogColumn::ProductImageUrl => "product_image_url",
            CatalogColumn::ProductSortOrder => "product_sort_order",
            CatalogColumn::ProductDescription => "product_description",
            CatalogColumn::CategoryId1 => "category_id_1",
            CatalogColumn::CategoryName1 => "category_name_1",
            CatalogColumn::CategoryImageUrl1 => "category_image_url_1",
            CatalogColumn::CategorySortOrder1 => "category_sort_order_1",
            CatalogColumn::CategoryId2 => "category_id_2",
            CatalogColumn::CategoryName2 => "category_name_2",
            CatalogColumn::CategoryImageUrl2 => "category_image_url_2",
            CatalogColumn::CategorySortOrder2 => "category_sort_order_2",
            CatalogColumn::CategoryId3 => "category_id_3",
            CatalogColumn::CategoryName3 => "category_name_3",
            CatalogColumn::CategoryImageUrl3 => "category_image_url_3",
            CatalogColumn::CategorySortOrder3 => "category_sort_order_3",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CatalogColumn::ProductId => "Product ID",
            CatalogColumn::ProductName => "Product Name",
            CatalogColumn::ProductPrice => "Product Price",
            CatalogColumn::ProductQty => "Product Quantity",
            CatalogColumn::ProductImageUrl => "Product Image",
            CatalogColumn::ProductSortOrder => "Product Sort Order",
            CatalogColumn::ProductDescription => "Product Description",
            CatalogColumn::CategoryId1 => "Category 1 ID",
            CatalogColumn::CategoryName1 => "Category 1 Name",
            CatalogColumn::CategoryImageUrl1 => "Category 1 Image",
            CatalogColumn::CategorySortOrder1 => "Category 1 Sort Order",
            CatalogColumn::CategoryId2 => "Category 2 ID",
            CatalogColumn::CategoryName2 => "Category 2 Name",
            CatalogColumn::CategoryImageUrl2 => "Category 2 Image",
            CatalogColumn::CategorySortOrder2 => "Category 2 Sort Order",
            CatalogColumn::CategoryId3 => "Category 3 ID",
            CatalogColumn::CategoryName3 => "Category 3 Name",
            CatalogColumn::CategoryImageUrl3 => "Category 3 Image",
            CatalogColumn::CategorySortOrder3 => "Category 3 Sort Order",
        }
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            CatalogColumn::ProductPrice
            | CatalogColumn::ProductQty
            | CatalogColumn::ProductSortOrder
            | CatalogColumn::CategorySortOrder1
            | CatalogColumn::CategorySortOrder2
            | CatalogColumn::CategorySortOrder3 => ColumnType::Number,
            _ => ColumnType::Text,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.column_type() == ColumnType::Number
    }

    pub fn is_image(&self) -> bool {
        matches!(
            self,
            CatalogColumn::ProductImageUrl
                | CatalogColumn::CategoryImageUrl1
                | CatalogColumn::CategoryImageUrl2
                | CatalogColumn::CategoryImageUrl3
        )
    }

    pub fn group(&self) -> ColumnGroup {
        match self {
            CatalogColumn::ProductId
            | CatalogColumn::ProductName
            | CatalogColumn::ProductPrice
            | CatalogColumn::ProductQty
            | CatalogColumn::ProductImageUrl
            | CatalogColumn::ProductSortOrder
            | CatalogColumn::ProductDescription => ColumnGroup::Product,
            CatalogColumn::CategoryId1
            | CatalogColumn::CategoryName1
            | CatalogColumn::CategoryImageUrl1
            | CatalogColumn::CategorySortOrder1 => ColumnGroup::Category1,
            CatalogColumn::CategoryId2
            | CatalogColumn::CategoryName2
            | CatalogColumn::CategoryImageUrl2
            | CatalogColumn::CategorySortOrder2 => ColumnGroup::Category2,
            CatalogColumn::CategoryId3
            | CatalogColumn::CategoryName3
            | CatalogColumn::CategoryImageUrl3
            | CatalogColumn::CategorySortOrder3 => ColumnGroup::Category3,
        }
    }
}

impl std::fmt::Display for CatalogColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_has_nineteen_unique_columns() {
        let mut keys: Vec<&str> = CatalogColumn::all().iter().map(|c| c.key()).collect();
        assert_eq!(keys.len(), 19);
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 19);
    }

    #[test]
    fn test_serde_name_matches_key() {
        for column in CatalogColumn::all() {
            let json = serde_json::to_string(column).unwrap();
            assert_eq!(json, format!("\"{}\"", column.key()));
            assert_eq!(CatalogColumn::from_key(column.key()), Some(*column));
        }
    }

    #[test]
    fn test_groups_and_types() {
        assert_eq!(CatalogColumn::ProductPrice.column_type(), ColumnType::Number);
        assert_eq!(CatalogColumn::ProductName.column_type(), ColumnType::Text);
        assert_eq!(CatalogColumn::CategoryName2.group(), ColumnGroup::Category2);
        let product = CatalogColumn::all()
            .iter()
            .filter(|c| c.group() == ColumnGroup::Product)
            .count();
        assert_eq!(product, 7);
        assert!(CatalogColumn::CategoryImageUrl3.is_image());
    }
}
