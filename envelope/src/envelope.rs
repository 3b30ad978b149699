use std::sync::Arc;

use dcbor::prelude::*;
use known_values::KnownValue;

use crate::assertion::Assertion;
use crate::compress::Compressed;
use crate::crypto::EncryptedMessage;
use crate::digest::{Digest, DigestProvider};
use crate::error::{Error, Result};

/// A flexible container for structured, hash-addressable data.
///
/// Envelopes are immutable: every transformation (eliding, encrypting,
/// adding an assertion) produces a new envelope rather than mutating
/// the receiver. Cloning is cheap -- an envelope is a thin handle
/// around a reference-counted case.
#[derive(Clone, Debug)]
pub struct Envelope(Arc<EnvelopeCase>);

#[derive(Debug)]
pub(crate) enum EnvelopeCase {
    Node { subject: Envelope, assertions: Vec<Envelope>, digest: Digest },
    Leaf { cbor: CBOR, digest: Digest },
    Wrapped { envelope: Envelope, digest: Digest },
    KnownValue { value: KnownValue, digest: Digest },
    Assertion(Assertion),
    Encrypted(EncryptedMessage),
    Compressed(Compressed),
    Elided(Digest),
}

impl Envelope {
    pub(crate) fn case(&self) -> &EnvelopeCase { &self.0 }

    fn from_case(case: EnvelopeCase) -> Self { Self(Arc::new(case)) }

    pub fn new_leaf(cbor: CBOR) -> Self {
        let digest = Digest::from_image(cbor.to_cbor_data());
        Self::from_case(EnvelopeCase::Leaf { cbor, digest })
    }

    pub fn new_wrapped(envelope: Envelope) -> Self {
        let digest = Digest::from_concatenated([&envelope.digest()]);
        Self::from_case(EnvelopeCase::Wrapped { envelope, digest })
    }

    pub fn new_known_value(value: KnownValue) -> Self {
        let digest = Digest::from_image(value.value().to_be_bytes());
        Self::from_case(EnvelopeCase::KnownValue { value, digest })
    }

    pub fn new_assertion(assertion: Assertion) -> Self { Self::from_case(EnvelopeCase::Assertion(assertion)) }

    pub fn new_encrypted(message: EncryptedMessage) -> Self { Self::from_case(EnvelopeCase::Encrypted(message)) }

    pub fn new_compressed(compressed: Compressed) -> Self { Self::from_case(EnvelopeCase::Compressed(compressed)) }

    pub fn new_elided(digest: Digest) -> Self { Self::from_case(EnvelopeCase::Elided(digest)) }

    /// Builds a node from a subject and assertions without validating
    /// that the assertions are well-formed; used internally once an
    /// assertion list is already known-good (e.g. decoding from CBOR,
    /// or re-assembling after an elision pass that preserved shape).
    pub(crate) fn new_with_unchecked_assertions(subject: Envelope, assertions: Vec<Envelope>) -> Self {
        assert!(!assertions.is_empty(), "a node must carry at least one assertion");
        let mut sorted = assertions;
        sorted.sort_by_key(|a| a.digest());
        let mut digests = vec![subject.digest()];
        digests.extend(sorted.iter().map(|a| a.digest()));
        let digest = Digest::from_concatenated(digests.iter());
        Self::from_case(EnvelopeCase::Node { subject, assertions: sorted, digest })
    }

    /// Builds a node, requiring every assertion to itself be an
    /// assertion (`Envelope::Assertion`) whose subject is not obscured,
    /// or an assertion whose subject is already obscured (elided,
    /// encrypted, or compressed).
    pub fn new_with_assertions(subject: Envelope, assertions: Vec<Envelope>) -> Result<Self> {
        if !assertions.iter().all(|a| a.is_subject_assertion() || a.is_subject_obscured()) {
            return Err(Error::UnexpectedCase { expected: "assertion", actual: "non-assertion" });
        }
        Ok(Self::new_with_unchecked_assertions(subject, assertions))
    }

    pub fn add_assertion(&self, assertion: impl Into<Envelope>) -> Self {
        self.add_assertion_envelope(assertion.into()).expect("assertion must be a well-formed predicate/object pair")
    }

    /// Convenience form of `add_assertion` taking a predicate and object
    /// directly instead of a prebuilt `Assertion`.
    pub fn add_assertion_with(&self, predicate: impl Into<Envelope>, object: impl Into<Envelope>) -> Self {
        self.add_assertion(Assertion::new(predicate, object))
    }

    pub fn add_assertion_envelope(&self, assertion: Envelope) -> Result<Self> {
        if !(assertion.is_subject_assertion() || assertion.is_subject_obscured()) {
            return Err(Error::UnexpectedCase { expected: "assertion", actual: "non-assertion" });
        }
        let mut assertions = self.assertions();
        if assertions.iter().any(|a| a.digest() == assertion.digest()) {
            return Ok(self.clone());
        }
        assertions.push(assertion);
        Ok(Self::new_with_unchecked_assertions(self.subject(), assertions))
    }

    /// Wraps this whole envelope (subject and assertions together) as the
    /// subject of a new `Wrapped` envelope.
    pub fn wrap(&self) -> Envelope { Envelope::new_wrapped(self.clone()) }

    /// Inverse of `wrap`: returns the enclosed envelope. Fails if this
    /// envelope is not `Wrapped`.
    pub fn try_unwrap(&self) -> Result<Envelope> {
        match self.case() {
            EnvelopeCase::Wrapped { envelope, .. } => Ok(envelope.clone()),
            _ => Err(Error::NotWrapped),
        }
    }

    /// Returns this envelope with its subject replaced by `subject`,
    /// keeping the same assertions. If this envelope has no
    /// assertions, returns `subject` directly.
    pub fn replace_subject(&self, subject: Envelope) -> Result<Envelope> {
        let assertions = self.assertions();
        if assertions.is_empty() {
            return Ok(subject);
        }
        Ok(Self::new_with_unchecked_assertions(subject, assertions))
    }

    pub fn subject(&self) -> Envelope {
        match self.case() {
            EnvelopeCase::Node { subject, .. } => subject.clone(),
            _ => self.clone(),
        }
    }

    pub fn assertions(&self) -> Vec<Envelope> {
        match self.case() {
            EnvelopeCase::Node { assertions, .. } => assertions.clone(),
            _ => vec![],
        }
    }

    pub fn has_assertions(&self) -> bool {
        match self.case() {
            EnvelopeCase::Node { assertions, .. } => !assertions.is_empty(),
            _ => false,
        }
    }

    pub fn predicate(&self) -> Option<Envelope> {
        match self.case() {
            EnvelopeCase::Assertion(assertion) => Some(assertion.predicate().clone()),
            _ => None,
        }
    }

    pub fn object(&self) -> Option<Envelope> {
        match self.case() {
            EnvelopeCase::Assertion(assertion) => Some(assertion.object().clone()),
            _ => None,
        }
    }

    pub fn leaf_cbor(&self) -> Option<&CBOR> {
        match self.case() {
            EnvelopeCase::Leaf { cbor, .. } => Some(cbor),
            _ => None,
        }
    }

    /// Decodes this envelope's subject as a leaf of CBOR type `T`.
    pub fn extract_subject<T>(&self) -> Result<T>
    where
        T: TryFrom<CBOR, Error = dcbor::Error>,
    {
        let subject = self.subject();
        let cbor = subject
            .leaf_cbor()
            .ok_or(Error::UnexpectedCase { expected: "leaf", actual: "non-leaf" })?
            .clone();
        Ok(T::try_from(cbor)?)
    }

    pub fn known_value(&self) -> Option<&KnownValue> {
        match self.case() {
            EnvelopeCase::KnownValue { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool { matches!(self.case(), EnvelopeCase::Leaf { .. }) }
    pub fn is_node(&self) -> bool { matches!(self.case(), EnvelopeCase::Node { .. }) }
    pub fn is_wrapped(&self) -> bool { matches!(self.case(), EnvelopeCase::Wrapped { .. }) }
    pub fn is_known_value(&self) -> bool { matches!(self.case(), EnvelopeCase::KnownValue { .. }) }
    pub fn is_assertion(&self) -> bool { matches!(self.case(), EnvelopeCase::Assertion(_)) }
    pub fn is_encrypted(&self) -> bool { matches!(self.case(), EnvelopeCase::Encrypted(_)) }
    pub fn is_compressed(&self) -> bool { matches!(self.case(), EnvelopeCase::Compressed(_)) }
    pub fn is_elided(&self) -> bool { matches!(self.case(), EnvelopeCase::Elided(_)) }

    pub fn is_internal(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Node { .. } | EnvelopeCase::Wrapped { .. } | EnvelopeCase::Assertion(_))
    }

    pub fn is_obscured(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Encrypted(_) | EnvelopeCase::Compressed(_) | EnvelopeCase::Elided(_))
    }

    pub fn is_subject_assertion(&self) -> bool {
        match self.case() {
            EnvelopeCase::Assertion(_) => true,
            EnvelopeCase::Node { subject, .. } => subject.is_subject_assertion(),
            _ => false,
        }
    }

    pub fn is_subject_encrypted(&self) -> bool {
        match self.case() {
            EnvelopeCase::Encrypted(_) => true,
            EnvelopeCase::Node { subject, .. } => subject.is_subject_encrypted(),
            _ => false,
        }
    }

    pub fn is_subject_compressed(&self) -> bool {
        match self.case() {
            EnvelopeCase::Compressed(_) => true,
            EnvelopeCase::Node { subject, .. } => subject.is_subject_compressed(),
            _ => false,
        }
    }

    pub fn is_subject_elided(&self) -> bool {
        match self.case() {
            EnvelopeCase::Elided(_) => true,
            EnvelopeCase::Node { subject, .. } => subject.is_subject_elided(),
            _ => false,
        }
    }

    pub fn is_subject_obscured(&self) -> bool {
        self.is_subject_encrypted() || self.is_subject_compressed() || self.is_subject_elided()
    }

    /// Assertions whose predicate digest matches `predicate`'s digest.
    pub fn assertions_with_predicate(&self, predicate: impl Into<Envelope>) -> Vec<Envelope> {
        let predicate = predicate.into();
        self.assertions()
            .into_iter()
            .filter(|a| a.predicate().map(|p| p.digest() == predicate.digest()).unwrap_or(false))
            .collect()
    }

    pub fn assertion_with_predicate(&self, predicate: impl Into<Envelope>) -> Result<Envelope> {
        let mut matches = self.assertions_with_predicate(predicate);
        match matches.len() {
            0 => Err(Error::NonexistentPredicate),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::AmbiguousPredicate),
        }
    }

    pub fn object_for_predicate(&self, predicate: impl Into<Envelope>) -> Result<Envelope> {
        Ok(self.assertion_with_predicate(predicate)?.object().expect("assertion always has an object"))
    }

    pub fn objects_for_predicate(&self, predicate: impl Into<Envelope>) -> Vec<Envelope> {
        self.assertions_with_predicate(predicate).into_iter().filter_map(|a| a.object()).collect()
    }

    /// Number of structural elements in the envelope, including itself.
    pub fn elements_count(&self) -> usize {
        fn count(envelope: &Envelope, total: &mut usize) {
            *total += 1;
            match envelope.case() {
                EnvelopeCase::Node { subject, assertions, .. } => {
                    count(subject, total);
                    for a in assertions {
                        count(a, total);
                    }
                }
                EnvelopeCase::Wrapped { envelope, .. } => count(envelope, total),
                EnvelopeCase::Assertion(assertion) => {
                    count(assertion.predicate(), total);
                    count(assertion.object(), total);
                }
                _ => {}
            }
        }
        let mut total = 0;
        count(self, &mut total);
        total
    }
}

impl DigestProvider for Envelope {
    fn digest(&self) -> Digest {
        match self.case() {
            EnvelopeCase::Node { digest, .. } => *digest,
            EnvelopeCase::Leaf { digest, .. } => *digest,
            EnvelopeCase::Wrapped { digest, .. } => *digest,
            EnvelopeCase::KnownValue { digest, .. } => *digest,
            EnvelopeCase::Assertion(assertion) => assertion.digest(),
            EnvelopeCase::Encrypted(message) => message.digest(),
            EnvelopeCase::Compressed(compressed) => compressed.digest(),
            EnvelopeCase::Elided(digest) => *digest,
        }
    }
}

impl From<CBOR> for Envelope {
    fn from(cbor: CBOR) -> Self { Envelope::new_leaf(cbor) }
}

impl From<&str> for Envelope {
    fn from(s: &str) -> Self { Envelope::new_leaf(CBOR::from(s)) }
}

impl From<String> for Envelope {
    fn from(s: String) -> Self { Envelope::new_leaf(CBOR::from(s)) }
}

impl From<KnownValue> for Envelope {
    fn from(value: KnownValue) -> Self { Envelope::new_known_value(value) }
}

impl From<Assertion> for Envelope {
    fn from(assertion: Assertion) -> Self { Envelope::new_assertion(assertion) }
}

macro_rules! impl_leaf_from {
    ($($t:ty),+ $(,)?) => {
        $(
            impl From<$t> for Envelope {
                fn from(value: $t) -> Self { Envelope::new_leaf(CBOR::from(value)) }
            }
        )+
    };
}

impl_leaf_from!(u8, u16, u32, u64, usize, i8, i16, i32, i64, bool, f64);

impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool { self.digest() == other.digest() }
}

impl Eq for Envelope {}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(s: &str) -> Envelope { Envelope::from(s) }

    #[test]
    fn subject_of_a_leaf_is_itself() {
        let e = leaf("Alice");
        assert_eq!(e.subject(), e);
    }

    #[test]
    fn node_digest_depends_on_sorted_assertion_digests() {
        let a1 = Envelope::new_assertion(Assertion::new(leaf("knows"), leaf("Bob")));
        let a2 = Envelope::new_assertion(Assertion::new(leaf("knows"), leaf("Carol")));
        let subject = leaf("Alice");
        let forward = Envelope::new_with_unchecked_assertions(subject.clone(), vec![a1.clone(), a2.clone()]);
        let backward = Envelope::new_with_unchecked_assertions(subject, vec![a2, a1]);
        assert_eq!(forward.digest(), backward.digest());
    }

    #[test]
    fn wrapping_changes_the_digest() {
        let e = leaf("Alice");
        let wrapped = Envelope::new_wrapped(e.clone());
        assert_ne!(e.digest(), wrapped.digest());
    }

    #[test]
    fn object_for_predicate_finds_the_right_assertion() {
        let subject = leaf("Alice")
            .add_assertion(Assertion::new(leaf("knows"), leaf("Bob")));
        assert_eq!(subject.object_for_predicate(leaf("knows")).unwrap(), leaf("Bob"));
    }
}
