//! Subject encryption: replacing an envelope's content with an
//! AEAD-sealed blob while preserving its digest, the way `compress`
//! preserves it but irreversibly without the key.

use crate::crypto::{EncryptedMessage, SymmetricKey};
use crate::digest::DigestProvider;
use crate::envelope::{Envelope, EnvelopeCase};
use crate::error::{Error, Result};

impl Envelope {
    /// Returns a new envelope with its subject encrypted under `key`.
    /// Assertions are left untouched; to encrypt a whole envelope
    /// including its assertions, `wrap()` it first.
    pub fn encrypt_subject(&self, key: &SymmetricKey) -> Result<Envelope> {
        let original_digest = self.digest();
        let result = match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                if subject.is_encrypted() {
                    return Err(Error::AlreadyEncrypted);
                }
                let encrypted_subject = subject.encrypt_subject(key)?;
                Envelope::new_with_unchecked_assertions(encrypted_subject, assertions.clone())
            }
            EnvelopeCase::Encrypted(_) => return Err(Error::AlreadyEncrypted),
            EnvelopeCase::Elided(_) => return Err(Error::AlreadyElided),
            _ => {
                let digest = self.digest();
                let encoded = self.to_cbor_data();
                let message = key.encrypt_with_digest(encoded, &digest);
                Envelope::new_encrypted(message)
            }
        };
        debug_assert_eq!(result.digest(), original_digest);
        Ok(result)
    }

    /// Inverse of `encrypt_subject`. Fails if the subject isn't
    /// encrypted, if `key` doesn't authenticate, or if the decrypted
    /// content's digest doesn't match what was recorded at encryption
    /// time.
    pub fn decrypt_subject(&self, key: &SymmetricKey) -> Result<Envelope> {
        match self.subject().case() {
            EnvelopeCase::Encrypted(message) => {
                let encoded = key.decrypt(message)?;
                let expected_digest = message.digest();
                let decrypted_subject = Envelope::try_from_cbor_data(encoded)?;
                if decrypted_subject.digest() != expected_digest {
                    return Err(Error::DigestMismatch);
                }
                match self.case() {
                    EnvelopeCase::Node { assertions, digest, .. } => {
                        let result =
                            Envelope::new_with_unchecked_assertions(decrypted_subject, assertions.clone());
                        if result.digest() != *digest {
                            return Err(Error::DigestMismatch);
                        }
                        Ok(result)
                    }
                    _ => Ok(decrypted_subject),
                }
            }
            _ => Err(Error::NotEncrypted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_subject_preserves_digest_and_round_trips() {
        let e = Envelope::from("secret");
        let key = SymmetricKey::new();
        let encrypted = e.encrypt_subject(&key).unwrap();
        assert_eq!(encrypted.digest(), e.digest());
        assert!(encrypted.is_encrypted());
        let decrypted = encrypted.decrypt_subject(&key).unwrap();
        assert_eq!(decrypted, e);
    }

    #[test]
    fn wrong_key_fails_to_decrypt() {
        let e = Envelope::from("secret");
        let key = SymmetricKey::new();
        let other = SymmetricKey::new();
        let encrypted = e.encrypt_subject(&key).unwrap();
        assert!(encrypted.decrypt_subject(&other).is_err());
    }

    #[test]
    fn already_encrypted_subject_rejects_a_second_pass() {
        let e = Envelope::from("secret");
        let key = SymmetricKey::new();
        let encrypted = e.encrypt_subject(&key).unwrap();
        assert!(matches!(encrypted.encrypt_subject(&key), Err(Error::AlreadyEncrypted)));
    }
}
