//! Schema Type Definitions
//!
//! This crate contains the data model of a nano schema file: enumerations,
//! messages, and their enum-typed fields. It provides pure data structures
//! without any descriptor resolution or code generation logic.

pub mod types;

// Re-export commonly used types at the crate root
pub use types::*;
