pub mod ajax;
pub mod filter;
