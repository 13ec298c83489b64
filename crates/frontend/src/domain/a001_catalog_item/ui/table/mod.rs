pub mod columns;
pub mod image_upload;
pub mod inline_edit;
pub mod load_gate;
pub mod state;
mod view;

pub use view::CatalogTable;
