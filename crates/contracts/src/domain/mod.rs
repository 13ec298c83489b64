pub mod a001_catalog_item;
pub mod a002_column_mapping;
