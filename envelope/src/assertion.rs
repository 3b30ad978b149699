use dcbor::prelude::*;

use crate::digest::{Digest, DigestProvider};
use crate::envelope::Envelope;
use crate::error::{Error, Result};

/// A single predicate/object pair attached to a subject.
///
/// Public but opaque: callers manipulate assertions through `Envelope`'s
/// own API rather than constructing them directly.
#[derive(Clone, Debug)]
pub struct Assertion {
    predicate: Box<Envelope>,
    object: Box<Envelope>,
    digest: Digest,
}

impl Assertion {
    /// Creates an assertion and computes `digest = SHA256(predicate.digest() ++ object.digest())`.
    pub fn new(predicate: impl Into<Envelope>, object: impl Into<Envelope>) -> Self {
        let predicate = predicate.into();
        let object = object.into();
        let digest = Digest::from_concatenated([&predicate.digest(), &object.digest()]);
        Self { predicate: Box::new(predicate), object: Box::new(object), digest }
    }

    pub fn predicate(&self) -> &Envelope { &self.predicate }

    pub fn object(&self) -> &Envelope { &self.object }

    pub fn untagged_cbor(&self) -> CBOR {
        let mut map = Map::new();
        map.insert(self.predicate.tagged_cbor(), self.object.tagged_cbor());
        CBOR::from(map)
    }

    pub fn to_cbor(&self) -> CBOR { self.untagged_cbor() }

    pub fn try_from_cbor(cbor: CBOR) -> Result<Self> {
        match cbor.as_case() {
            CBORCase::Map(map) if map.len() == 1 => {
                let (predicate, object) = map.iter().next().expect("map has one entry");
                let predicate = Envelope::from_tagged_cbor(predicate.clone())?;
                let object = Envelope::from_tagged_cbor(object.clone())?;
                Ok(Self::new(predicate, object))
            }
            _ => Err(Error::Cbor(dcbor::Error::WrongCase {
                expected: "a single-entry map",
                found: "other",
            })),
        }
    }
}

impl DigestProvider for Assertion {
    fn digest(&self) -> Digest { self.digest }
}

impl PartialEq for Assertion {
    fn eq(&self, other: &Self) -> bool { self.digest == other.digest }
}

impl Eq for Assertion {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_concatenation_of_predicate_and_object() {
        let predicate = Envelope::new_leaf(CBOR::from("knows"));
        let object = Envelope::new_leaf(CBOR::from("Bob"));
        let assertion = Assertion::new(predicate.clone(), object.clone());
        let expected = Digest::from_concatenated([&predicate.digest(), &object.digest()]);
        assert_eq!(assertion.digest(), expected);
    }

    #[test]
    fn round_trips_through_cbor() {
        let assertion = Assertion::new(Envelope::new_leaf(CBOR::from("knows")), Envelope::new_leaf(CBOR::from("Bob")));
        let cbor = assertion.to_cbor();
        let decoded = Assertion::try_from_cbor(cbor).unwrap();
        assert_eq!(assertion, decoded);
    }
}
