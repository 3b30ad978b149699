use thiserror::Error;

/// Errors produced while decoding or validating dCBOR.
///
/// Every variant carries enough context (a byte offset, or the
/// conflicting values) to let a caller point at the offending input
/// without re-parsing it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("malformed CBOR at offset {0}")]
    DecodeMalformed(usize),

    #[error("non-canonical CBOR encoding at offset {0}")]
    DecodeNonCanonical(usize),

    #[error("duplicate map key at offset {0}")]
    DuplicateMapKey(usize),

    #[error("trailing data after CBOR item at offset {0}")]
    TrailingInput(usize),

    #[error("unexpected end of input while decoding at offset {0}")]
    Underrun(usize),

    #[error("tag {0} is already registered under a different name")]
    TagConflict(u64),

    #[error("invalid UTF-8 text string at offset {0}")]
    InvalidUtf8(usize),

    #[error("value out of range for requested conversion")]
    OutOfRange,

    #[error("wrong CBOR case: expected {expected}, found {found}")]
    WrongCase { expected: &'static str, found: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
