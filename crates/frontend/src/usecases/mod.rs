pub mod u501_import_from_sheets;
pub mod u502_export_catalog;
