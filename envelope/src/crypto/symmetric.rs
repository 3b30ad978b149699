//! Symmetric (content) key and the envelope-level AEAD wire format.

use chacha20poly1305::aead::{Aead, Payload};
use chacha20poly1305::{ChaCha20Poly1305, KeyInit, Nonce as AeadNonce};
use dcbor::prelude::*;
use rand::RngCore;

use crate::digest::Digest;
use crate::error::{Error, Result};

const NONCE_LEN: usize = 12;

/// A 256-bit ChaCha20-Poly1305 key used to encrypt an envelope's subject.
#[derive(Clone, PartialEq, Eq)]
pub struct SymmetricKey([u8; 32]);

impl SymmetricKey {
    pub fn new() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self { Self(bytes) }

    pub fn data(&self) -> &[u8; 32] { &self.0 }

    /// Encrypts `plaintext`, binding `digest` as associated data so a
    /// successful decryption proves the plaintext hashes to `digest`.
    pub fn encrypt_with_digest(&self, plaintext: impl AsRef<[u8]>, digest: &Digest) -> EncryptedMessage {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        self.encrypt_with_digest_and_nonce(plaintext, digest, nonce_bytes)
    }

    pub(crate) fn encrypt_with_digest_and_nonce(
        &self,
        plaintext: impl AsRef<[u8]>,
        digest: &Digest,
        nonce_bytes: [u8; NONCE_LEN],
    ) -> EncryptedMessage {
        let cipher = ChaCha20Poly1305::new_from_slice(&self.0).expect("key is 32 bytes");
        let nonce = AeadNonce::from_slice(&nonce_bytes);
        let ciphertext = cipher
            .encrypt(nonce, Payload { msg: plaintext.as_ref(), aad: digest.as_bytes() })
            .expect("ChaCha20-Poly1305 encryption does not fail on well-formed input");
        EncryptedMessage { ciphertext, nonce: nonce_bytes, digest: *digest }
    }

    pub fn decrypt(&self, message: &EncryptedMessage) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new_from_slice(&self.0).expect("key is 32 bytes");
        let nonce = AeadNonce::from_slice(&message.nonce);
        cipher
            .decrypt(nonce, Payload { msg: &message.ciphertext, aad: message.digest.as_bytes() })
            .map_err(|_| Error::AeadAuthFail)
    }
}

impl Default for SymmetricKey {
    fn default() -> Self { Self::new() }
}

impl From<SymmetricKey> for CBOR {
    fn from(key: SymmetricKey) -> Self { CBOR::from(key.0.to_vec()) }
}

impl TryFrom<CBOR> for SymmetricKey {
    type Error = dcbor::Error;

    fn try_from(cbor: CBOR) -> std::result::Result<Self, Self::Error> {
        let bytes: Vec<u8> = cbor.try_into()?;
        let array: [u8; 32] = bytes.try_into().map_err(|_| dcbor::Error::OutOfRange)?;
        Ok(Self(array))
    }
}

/// The result of sealing an envelope case's CBOR with a [`SymmetricKey`]:
/// ciphertext, nonce, and the digest of the plaintext it was sealed from
/// (so the digest-preservation invariant can be checked on decryption).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedMessage {
    ciphertext: Vec<u8>,
    nonce: [u8; NONCE_LEN],
    digest: Digest,
}

impl EncryptedMessage {
    pub fn digest(&self) -> Digest { self.digest }

    pub fn to_cbor(&self) -> CBOR {
        cbor_array([
            CBOR::from(self.ciphertext.clone()),
            CBOR::from(self.nonce.to_vec()),
            CBOR::from(self.digest.as_bytes().to_vec()),
        ])
    }

    pub fn from_cbor(cbor: CBOR) -> Result<Self> {
        let items = cbor
            .as_array()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "a three-element array", found: "other" }))?;
        if items.len() != 3 {
            return Err(Error::Cbor(dcbor::Error::OutOfRange));
        }
        let ciphertext = items[0]
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?
            .to_vec();
        let nonce_bytes = items[1]
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?;
        let nonce: [u8; NONCE_LEN] =
            nonce_bytes.try_into().map_err(|_| Error::Cbor(dcbor::Error::OutOfRange))?;
        let digest_bytes = items[2]
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?;
        let digest_array: [u8; 32] =
            digest_bytes.try_into().map_err(|_| Error::Cbor(dcbor::Error::OutOfRange))?;
        Ok(Self { ciphertext, nonce, digest: Digest::from_bytes(digest_array) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_aead() {
        let key = SymmetricKey::new();
        let digest = Digest::from_image(b"subject bytes");
        let message = key.encrypt_with_digest(b"hello", &digest);
        assert_eq!(key.decrypt(&message).unwrap(), b"hello");
    }

    #[test]
    fn wrong_key_fails_to_decrypt() {
        let key = SymmetricKey::new();
        let other = SymmetricKey::new();
        let digest = Digest::from_image(b"subject bytes");
        let message = key.encrypt_with_digest(b"hello", &digest);
        assert!(other.decrypt(&message).is_err());
    }
}
