pub mod resolved;
pub mod types;
