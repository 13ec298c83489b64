pub mod request;
pub mod response;
pub mod sheet_url;

pub use request::{ImportRequest, SheetSourceRequest};
pub use response::{ConnectionInfo, HeadersResponse, ImportResponse};
pub use sheet_url::validate_sheet_url;
