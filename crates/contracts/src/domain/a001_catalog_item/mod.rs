pub mod aggregate;
pub mod columns;

pub use aggregate::CatalogItem;
pub use columns::{CatalogColumn, ColumnGroup, ColumnType};
