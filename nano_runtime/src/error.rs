use thiserror::Error;

/// Result alias used by every stream operation that can fail.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Failures raised while reading wire bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Truncated message: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("Malformed varint at offset {offset}")]
    MalformedVarint { offset: usize },

    #[error("Invalid tag value: {0}")]
    InvalidTag(u32),

    #[error("Unsupported wire type {wire_type} in tag {tag}")]
    UnsupportedWireType { tag: u32, wire_type: u32 },

    #[error("Length prefix {length} exceeds the {available} bytes left in the current limit")]
    LimitExceeded { length: usize, available: usize },
}
