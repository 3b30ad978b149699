//! Public-key recipient encryption: the envelope's subject is encrypted
//! once under a random content key, and the content key is then sealed
//! to each recipient independently via `hasRecipient: SealedMessage`
//! assertions. Any one recipient's private key recovers the content key
//! and, with it, the subject; no recipient learns about the others.

use known_values::HAS_RECIPIENT;

use crate::crypto::{PrivateKey, PublicKey, SealedMessage, SymmetricKey};
use crate::envelope::Envelope;
use crate::error::{Error, Result};

impl Envelope {
    /// Adds a `hasRecipient: SealedMessage` assertion sealing
    /// `content_key` to `recipient`.
    pub fn add_recipient(&self, recipient: &PublicKey, content_key: &SymmetricKey) -> Envelope {
        let sealed = SealedMessage::new(content_key.data(), recipient);
        self.add_assertion_with(HAS_RECIPIENT, Envelope::new_leaf(sealed.to_cbor()))
    }

    /// The `SealedMessage`s from every `hasRecipient` assertion.
    pub fn recipients(&self) -> Result<Vec<SealedMessage>> {
        self.assertions_with_predicate(HAS_RECIPIENT)
            .into_iter()
            .map(|a| {
                let object = a.object().expect("assertion always has an object");
                let cbor = object
                    .leaf_cbor()
                    .cloned()
                    .ok_or(Error::UnexpectedCase { expected: "leaf", actual: "non-leaf" })?;
                SealedMessage::from_cbor(cbor)
            })
            .collect()
    }

    /// Generates a random content key, encrypts the subject with it, and
    /// adds a `hasRecipient` assertion for each of `recipients`.
    pub fn encrypt_subject_to_recipients(&self, recipients: &[&PublicKey]) -> Result<Envelope> {
        let content_key = SymmetricKey::new();
        let mut encrypted = self.encrypt_subject(&content_key)?;
        for recipient in recipients {
            encrypted = encrypted.add_recipient(recipient, &content_key);
        }
        Ok(encrypted)
    }

    pub fn encrypt_subject_to_recipient(&self, recipient: &PublicKey) -> Result<Envelope> {
        self.encrypt_subject_to_recipients(&[recipient])
    }

    /// Tries every `hasRecipient` sealed message against `recipient`'s
    /// private key until one decrypts, then uses the recovered content
    /// key to decrypt the subject.
    pub fn decrypt_subject_to_recipient(&self, recipient: &PrivateKey) -> Result<Envelope> {
        let sealed_messages = self.recipients()?;
        let content_key_bytes = sealed_messages
            .iter()
            .find_map(|sealed| sealed.decrypt(recipient).ok())
            .ok_or(Error::NoMatchingRecipient)?;
        let array: [u8; 32] =
            content_key_bytes.try_into().map_err(|_| Error::KeySize { expected: 32, found: 0 })?;
        let content_key = SymmetricKey::from_bytes(array);
        self.decrypt_subject(&content_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_recipient_independently_decrypts() {
        let bob = PrivateKey::new();
        let carol = PrivateKey::new();
        let alice = PrivateKey::new();

        let e = Envelope::from("Shared secret");
        let encrypted = e.encrypt_subject_to_recipients(&[&bob.public_key(), &carol.public_key()]).unwrap();

        assert_eq!(encrypted.decrypt_subject_to_recipient(&bob).unwrap(), e);
        assert_eq!(encrypted.decrypt_subject_to_recipient(&carol).unwrap(), e);
        assert!(matches!(
            encrypted.decrypt_subject_to_recipient(&alice),
            Err(Error::NoMatchingRecipient)
        ));
    }
}
