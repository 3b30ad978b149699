use thiserror::Error;

use crate::digest::Digest;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("expected envelope case {expected}, found {actual}")]
    UnexpectedCase { expected: &'static str, actual: &'static str },
    #[error("no assertion found with predicate digest {0}")]
    AssertionMissing(Digest),
    #[error("more than one assertion found with predicate digest {0}")]
    DuplicateAssertion(Digest),
    #[error("envelope digest did not match the expected value")]
    DigestMismatch,
    #[error("envelope is already compressed")]
    AlreadyCompressed,
    #[error("envelope is elided and cannot be transformed in place")]
    AlreadyElided,
    #[error("envelope is already encrypted")]
    AlreadyEncrypted,
    #[error("envelope is not compressed")]
    NotCompressed,
    #[error("envelope's subject is not encrypted")]
    NotEncrypted,
    #[error("envelope is not wrapped")]
    NotWrapped,
    #[error("more than one assertion matched an ambiguous query")]
    AmbiguousPredicate,
    #[error("no assertion found for the given predicate")]
    NonexistentPredicate,
    #[error("signature did not verify")]
    UnverifiedSignature,
    #[error("no recipient matched the given private key")]
    NoMatchingRecipient,
    #[error("not enough valid SSKR shares were present to reconstruct the secret")]
    InvalidShares,
    #[error("invalid SSKR split specification: {0}")]
    InvalidSskrSpec(&'static str),
    #[error("AEAD authentication failed")]
    AeadAuthFail,
    #[error("expected a {expected}-byte key, found {found}")]
    KeySize { expected: usize, found: usize },
    #[error(transparent)]
    Cbor(#[from] dcbor::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
