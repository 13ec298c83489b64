pub mod model;
mod view;

pub use model::{FilterModel, FilterRow, InputKind, ValueInput};
pub use view::AdvancedFilter;
