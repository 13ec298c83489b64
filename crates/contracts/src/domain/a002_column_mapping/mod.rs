pub mod aggregate;
pub mod request;

pub use aggregate::MappingPair;
pub use request::{GetMappingRequest, MappingResponse, SaveMappingRequest};
