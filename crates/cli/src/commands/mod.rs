pub mod extract;
pub mod headers;
