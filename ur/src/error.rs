use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("UR string did not begin with the \"ur:\" scheme")]
    InvalidScheme,
    #[error("UR type was not specified")]
    TypeUnspecified,
    #[error("UR type is not a non-empty sequence of [a-z0-9-]")]
    InvalidType,
    #[error("UR is a multipart sequence, not a single part")]
    NotSinglePart,
    #[error("expected UR type \"{expected}\", found \"{found}\"")]
    UnexpectedType { expected: String, found: String },
    #[error("bytewords checksum did not match")]
    BytewordsChecksum,
    #[error("bytewords text contained a word not in the alphabet")]
    BytewordsUnknownWord,
    #[error("multipart UR parts disagree on seqLen, messageLen, or checksum")]
    MultipartInconsistent,
    #[error("multipart UR reassembled but its checksum does not match")]
    MultipartChecksumMismatch,
    #[error(transparent)]
    Cbor(#[from] dcbor::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
