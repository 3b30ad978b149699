//! Sealed messages: ephemeral-X25519 + HKDF-SHA256 + ChaCha20-Poly1305
//! encryption of a short plaintext (typically a content key) to a single
//! recipient's public key, with no interaction required from the
//! recipient and no way for one recipient to learn about another.

use chacha20poly1305::aead::{Aead, Payload};
use chacha20poly1305::{ChaCha20Poly1305, KeyInit, Nonce as AeadNonce};
use dcbor::prelude::*;
use hkdf::Hkdf;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

use crate::crypto::keys::{PrivateKey, PublicKey};
use crate::error::{Error, Result};

const NONCE_LEN: usize = 12;
const HKDF_INFO: &[u8] = b"gordian-envelope-sealed-message";

/// A symmetric-key-sized plaintext sealed to one recipient's public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    ephemeral_public: [u8; 32],
    ciphertext: Vec<u8>,
    nonce: [u8; NONCE_LEN],
}

impl SealedMessage {
    pub fn new(plaintext: impl AsRef<[u8]>, recipient: &PublicKey) -> Self {
        let ephemeral_secret = x25519_dalek::StaticSecret::random_from_rng(OsRng);
        let ephemeral_public = x25519_dalek::PublicKey::from(&ephemeral_secret);
        let shared = ephemeral_secret.diffie_hellman(recipient.agreement_public());
        let key = derive_key(shared.as_bytes(), ephemeral_public.as_bytes());

        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let cipher = ChaCha20Poly1305::new_from_slice(&key).expect("key is 32 bytes");
        let ciphertext = cipher
            .encrypt(AeadNonce::from_slice(&nonce_bytes), Payload { msg: plaintext.as_ref(), aad: &[] })
            .expect("ChaCha20-Poly1305 encryption does not fail on well-formed input");

        Self { ephemeral_public: *ephemeral_public.as_bytes(), ciphertext, nonce: nonce_bytes }
    }

    pub fn decrypt(&self, recipient: &PrivateKey) -> Result<Vec<u8>> {
        let ephemeral_public = x25519_dalek::PublicKey::from(self.ephemeral_public);
        let shared = recipient.agreement_secret().diffie_hellman(&ephemeral_public);
        let key = derive_key(shared.as_bytes(), &self.ephemeral_public);

        let cipher = ChaCha20Poly1305::new_from_slice(&key).expect("key is 32 bytes");
        cipher
            .decrypt(AeadNonce::from_slice(&self.nonce), Payload { msg: &self.ciphertext, aad: &[] })
            .map_err(|_| Error::AeadAuthFail)
    }

    pub fn to_cbor(&self) -> CBOR {
        cbor_array([
            CBOR::from(self.ephemeral_public.to_vec()),
            CBOR::from(self.ciphertext.clone()),
            CBOR::from(self.nonce.to_vec()),
        ])
    }

    pub fn from_cbor(cbor: CBOR) -> Result<Self> {
        let items = cbor
            .as_array()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "a three-element array", found: "other" }))?;
        if items.len() != 3 {
            return Err(Error::Cbor(dcbor::Error::OutOfRange));
        }
        let ephemeral_bytes = items[0]
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?;
        let ephemeral_public: [u8; 32] =
            ephemeral_bytes.try_into().map_err(|_| Error::Cbor(dcbor::Error::OutOfRange))?;
        let ciphertext = items[1]
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?
            .to_vec();
        let nonce_bytes = items[2]
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?;
        let nonce: [u8; NONCE_LEN] =
            nonce_bytes.try_into().map_err(|_| Error::Cbor(dcbor::Error::OutOfRange))?;
        Ok(Self { ephemeral_public, ciphertext, nonce })
    }
}

fn derive_key(shared_secret: &[u8], ephemeral_public: &[u8]) -> [u8; 32] {
    let hk = Hkdf::<Sha256>::new(None, shared_secret);
    let mut info = Vec::with_capacity(HKDF_INFO.len() + ephemeral_public.len());
    info.extend_from_slice(HKDF_INFO);
    info.extend_from_slice(ephemeral_public);
    let mut okm = [0u8; 32];
    hk.expand(&info, &mut okm).expect("32 bytes is a valid HKDF-SHA256 output length");
    okm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seals_and_opens_for_the_intended_recipient() {
        let recipient = PrivateKey::new();
        let sealed = SealedMessage::new(b"content key material", &recipient.public_key());
        assert_eq!(sealed.decrypt(&recipient).unwrap(), b"content key material");
    }

    #[test]
    fn a_different_recipient_cannot_open_it() {
        let recipient = PrivateKey::new();
        let other = PrivateKey::new();
        let sealed = SealedMessage::new(b"content key material", &recipient.public_key());
        assert!(sealed.decrypt(&other).is_err());
    }
}
