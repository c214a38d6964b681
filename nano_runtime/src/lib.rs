//! Wire runtime for code emitted by `nano_gen`.
//!
//! Generated messages store enumerations as plain `i32` values and use the
//! streams in this crate to parse, serialize and size themselves.

pub mod error;
pub mod input;
pub mod lookahead;
pub mod output;
pub mod wire;

pub use error::{DecodeError, DecodeResult};
pub use input::CodedInputStream;
pub use lookahead::{packed_repeated_field_array_length, repeated_field_array_length};
pub use output::CodedOutputStream;
pub use wire::{
    WireType, compute_int32_size_no_tag, compute_raw_varint32_size, compute_raw_varint64_size,
    make_tag, tag_size,
};
