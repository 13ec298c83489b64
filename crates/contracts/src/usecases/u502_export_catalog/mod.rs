pub mod dto;

pub use dto::{ExportFormat, ExportRequest, ExportResponse};
