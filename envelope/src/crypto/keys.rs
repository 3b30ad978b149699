//! Key material: an agreement keypair (X25519, for sealed messages) and a
//! signing keypair (Ed25519), generated and carried together the way the
//! rest of the suite expects a single identity to own both.

use dcbor::prelude::*;
use ed25519_dalek::Signer as DalekSigner;
use ed25519_dalek::Verifier as DalekVerifier;
use rand::rngs::OsRng;

use crate::crypto::signature::{Signature, Signer, Verifier};
use crate::error::{Error, Result};

/// A private identity: an X25519 agreement secret plus an Ed25519 signing
/// key. [`Self::public_key`] derives the corresponding [`PublicKey`].
pub struct PrivateKey {
    agreement: x25519_dalek::StaticSecret,
    signing: ed25519_dalek::SigningKey,
}

impl PrivateKey {
    pub fn new() -> Self {
        Self {
            agreement: x25519_dalek::StaticSecret::random_from_rng(OsRng),
            signing: ed25519_dalek::SigningKey::generate(&mut OsRng),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            agreement: x25519_dalek::PublicKey::from(&self.agreement),
            verifying: self.signing.verifying_key(),
        }
    }

    pub(crate) fn agreement_secret(&self) -> &x25519_dalek::StaticSecret { &self.agreement }
}

impl Default for PrivateKey {
    fn default() -> Self { Self::new() }
}

impl Signer for PrivateKey {
    fn sign(&self, message: &[u8]) -> Signature { Signature(self.signing.sign(message)) }
}

/// The public half of a [`PrivateKey`]: an X25519 agreement public key
/// (used as the recipient of a [`crate::crypto::SealedMessage`]) plus an
/// Ed25519 verifying key.
#[derive(Clone)]
pub struct PublicKey {
    agreement: x25519_dalek::PublicKey,
    verifying: ed25519_dalek::VerifyingKey,
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.agreement.as_bytes() == other.agreement.as_bytes()
            && self.verifying.to_bytes() == other.verifying.to_bytes()
    }
}

impl Eq for PublicKey {}

impl PublicKey {
    pub(crate) fn agreement_public(&self) -> &x25519_dalek::PublicKey { &self.agreement }

    pub fn to_cbor(&self) -> CBOR {
        cbor_array([
            CBOR::from(self.agreement.as_bytes().to_vec()),
            CBOR::from(self.verifying.to_bytes().to_vec()),
        ])
    }

    pub fn from_cbor(cbor: CBOR) -> Result<Self> {
        let items = cbor
            .as_array()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "a two-element array", found: "other" }))?;
        if items.len() != 2 {
            return Err(Error::Cbor(dcbor::Error::OutOfRange));
        }
        let agreement_bytes = items[0]
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?;
        let agreement_array: [u8; 32] =
            agreement_bytes.try_into().map_err(|_| Error::Cbor(dcbor::Error::OutOfRange))?;
        let verifying_bytes = items[1]
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?;
        let verifying_array: [u8; 32] =
            verifying_bytes.try_into().map_err(|_| Error::Cbor(dcbor::Error::OutOfRange))?;
        let verifying = ed25519_dalek::VerifyingKey::from_bytes(&verifying_array)
            .map_err(|_| Error::Cbor(dcbor::Error::OutOfRange))?;
        Ok(Self { agreement: x25519_dalek::PublicKey::from(agreement_array), verifying })
    }
}

impl Verifier for PublicKey {
    fn verify(&self, signature: &Signature, message: &[u8]) -> bool {
        self.verifying.verify(message, &signature.0).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_round_trips_through_cbor() {
        let private = PrivateKey::new();
        let public = private.public_key();
        let decoded = PublicKey::from_cbor(public.to_cbor()).unwrap();
        assert!(public == decoded);
    }
}
