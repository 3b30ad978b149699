//! Signing: the `Signer`/`Verifier` seam the envelope `sign`/`verify`
//! operators are built on, and the Ed25519 `Signature` type that travels
//! as an envelope leaf.

use dcbor::prelude::*;

use crate::error::{Error, Result};

/// Anything that can produce an Ed25519 signature over a message.
/// Implemented by [`crate::crypto::PrivateKey`].
pub trait Signer {
    fn sign(&self, message: &[u8]) -> Signature;
}

/// Anything that can check an Ed25519 signature over a message.
/// Implemented by [`crate::crypto::PublicKey`].
pub trait Verifier {
    fn verify(&self, signature: &Signature, message: &[u8]) -> bool;
}

/// An Ed25519 signature, stored as an envelope leaf (a 64-byte string).
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(pub(crate) ed25519_dalek::Signature);

impl Signature {
    pub fn to_cbor(&self) -> CBOR { CBOR::from(self.0.to_bytes().to_vec()) }

    pub fn from_cbor(cbor: CBOR) -> Result<Self> {
        let bytes = cbor
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?;
        let array: [u8; 64] = bytes.try_into().map_err(|_| Error::Cbor(dcbor::Error::OutOfRange))?;
        Ok(Self(ed25519_dalek::Signature::from_bytes(&array)))
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", hex::encode(self.0.to_bytes()))
    }
}
