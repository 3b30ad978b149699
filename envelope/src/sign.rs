//! Signing: `sign` wraps the envelope and attaches a `verifiedBy:
//! Signature` assertion over the wrapped digest; `verify` checks it and
//! unwraps back to the original. Because wrapping and the assertion
//! live outside what got signed, adding, eliding, or inspecting other
//! assertions never invalidates a signature already present.

use known_values::VERIFIED_BY;

use crate::crypto::{Signature, Signer, Verifier};
use crate::digest::DigestProvider;
use crate::envelope::Envelope;
use crate::error::{Error, Result};

impl Envelope {
    /// Wraps this envelope and adds a `verifiedBy: Signature` assertion
    /// computed over the wrapped envelope's digest.
    pub fn sign(&self, signer: &impl Signer) -> Envelope {
        let wrapped = self.wrap();
        let signature = signer.sign(wrapped.digest().as_bytes());
        wrapped.add_assertion_with(VERIFIED_BY, Envelope::new_leaf(signature.to_cbor()))
    }

    /// All `Signature`s attached via `verifiedBy` assertions.
    pub fn signatures(&self) -> Result<Vec<Signature>> {
        self.assertions_with_predicate(VERIFIED_BY)
            .into_iter()
            .map(|a| {
                let object = a.object().expect("assertion always has an object");
                Signature::from_cbor(object.leaf_cbor().cloned().ok_or(Error::UnexpectedCase {
                    expected: "leaf",
                    actual: "non-leaf",
                })?)
            })
            .collect()
    }

    /// `true` if any attached signature verifies against `verifier` over
    /// this envelope's own digest.
    pub fn is_verified_signature(&self, verifier: &impl Verifier) -> Result<bool> {
        let digest_bytes = *self.digest().as_bytes();
        Ok(self.signatures()?.iter().any(|sig| verifier.verify(sig, &digest_bytes)))
    }

    /// Verifies a signature against `verifier` and, if it checks out,
    /// unwraps back to the original (pre-`sign`) envelope.
    pub fn verify(&self, verifier: &impl Verifier) -> Result<Envelope> {
        if !self.is_verified_signature(verifier)? {
            return Err(Error::UnverifiedSignature);
        }
        self.try_unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::PrivateKey;

    #[test]
    fn sign_then_verify_recovers_the_original() {
        let signer = PrivateKey::new();
        let e = Envelope::from("Alice").add_assertion_with("knows", "Bob");
        let signed = e.sign(&signer);
        let verified = signed.verify(&signer.public_key()).unwrap();
        assert_eq!(verified, e);
    }

    #[test]
    fn verification_fails_for_the_wrong_key() {
        let signer = PrivateKey::new();
        let impostor = PrivateKey::new();
        let e = Envelope::from("Alice");
        let signed = e.sign(&signer);
        assert!(signed.verify(&impostor.public_key()).is_err());
    }

    #[test]
    fn signature_survives_elision_of_unrelated_assertions() {
        use std::collections::HashSet;

        let signer = PrivateKey::new();
        let e = Envelope::from("Alice").add_assertion_with("age", 30);
        let signed = e.sign(&signer);
        let age_assertion = signed.try_unwrap().unwrap().assertions_with_predicate("age")[0].clone();
        let mut targets = HashSet::new();
        targets.insert(age_assertion.digest());
        let redacted = signed.elide_removing(&targets);
        assert_eq!(redacted.verify(&signer.public_key()).unwrap().digest(), e.digest());
    }
}
