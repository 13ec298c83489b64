pub mod model;
mod view;

pub use model::MappingModel;
pub use view::ColumnMappingEditor;
