//! CBOR encoding of envelopes. Every envelope is tagged with
//! [`TAG_ENVELOPE`]; within that tag, each case has a distinguishable
//! CBOR shape:
//!
//! - `Node` is an array: `[subject, assertion, assertion, ...]`.
//! - `Leaf` is tagged #6.24, the IANA tag for embedded CBOR.
//! - `Wrapped` is itself tagged `TAG_ENVELOPE` (so a wrapped envelope's
//!   untagged form is another envelope's tagged form).
//! - `Assertion` is a single-entry map `{predicate: object}`.
//! - `KnownValue` is a bare unsigned integer.
//! - `Encrypted` is tagged [`TAG_ENCRYPTED`].
//! - `Compressed` is tagged [`TAG_COMPRESSED`].
//! - `Elided` is a 32-byte byte string.

use dcbor::prelude::*;
use known_values::KnownValue;

use crate::assertion::Assertion;
use crate::compress::Compressed;
use crate::crypto::EncryptedMessage;
use crate::digest::Digest;
use crate::envelope::{Envelope, EnvelopeCase};
use crate::error::{Error, Result};

pub const TAG_ENVELOPE: u64 = 200;
pub const TAG_LEAF: u64 = 24;
pub const TAG_ENCRYPTED: u64 = 201;
pub const TAG_COMPRESSED: u64 = 202;

impl Envelope {
    /// The untagged CBOR for this envelope's case -- used both as the
    /// hashed image for `Leaf`/`Wrapped`/`Node` digests and as the
    /// content of the outer `TAG_ENVELOPE` wrapper.
    pub fn untagged_cbor(&self) -> CBOR {
        match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                let mut items = vec![subject.untagged_cbor()];
                items.extend(assertions.iter().map(|a| a.untagged_cbor()));
                cbor_array(items)
            }
            EnvelopeCase::Leaf { cbor, .. } => CBOR::tagged(TAG_LEAF, cbor.clone()),
            EnvelopeCase::Wrapped { envelope, .. } => envelope.tagged_cbor(),
            EnvelopeCase::Assertion(assertion) => assertion.to_cbor(),
            EnvelopeCase::KnownValue { value, .. } => CBOR::from(value.value()),
            EnvelopeCase::Encrypted(message) => CBOR::tagged(TAG_ENCRYPTED, message.to_cbor()),
            EnvelopeCase::Compressed(compressed) => CBOR::tagged(TAG_COMPRESSED, compressed.to_cbor()),
            EnvelopeCase::Elided(digest) => CBOR::from(digest.as_bytes().to_vec()),
        }
    }

    pub fn tagged_cbor(&self) -> CBOR { CBOR::tagged(TAG_ENVELOPE, self.untagged_cbor()) }

    pub fn to_cbor_data(&self) -> Vec<u8> { self.tagged_cbor().to_cbor_data() }

    pub fn from_tagged_cbor(cbor: CBOR) -> Result<Envelope> {
        match cbor.as_case() {
            CBORCase::Tagged(tag, item) if tag.value() == TAG_ENVELOPE => Self::from_untagged_cbor(item.clone()),
            _ => Err(Error::Cbor(dcbor::Error::WrongCase {
                expected: "tagged envelope",
                found: "other",
            })),
        }
    }

    pub fn try_from_cbor_data(data: impl AsRef<[u8]>) -> Result<Envelope> {
        Self::from_tagged_cbor(CBOR::try_from_data(data)?)
    }

    pub fn from_untagged_cbor(cbor: CBOR) -> Result<Envelope> {
        match cbor.as_case() {
            CBORCase::Tagged(tag, item) => match tag.value() {
                TAG_LEAF => Ok(Envelope::new_leaf(item.clone())),
                TAG_ENVELOPE => Ok(Envelope::new_wrapped(Self::from_untagged_cbor(item.clone())?)),
                TAG_ENCRYPTED => {
                    let message = EncryptedMessage::from_cbor(item.clone())?;
                    Ok(Envelope::new_encrypted(message))
                }
                TAG_COMPRESSED => {
                    let compressed = Compressed::from_cbor(item.clone())?;
                    Ok(Envelope::new_compressed(compressed))
                }
                _ => Err(Error::Cbor(dcbor::Error::WrongCase {
                    expected: "a known envelope tag",
                    found: "an unrecognized tag",
                })),
            },
            CBORCase::ByteString(bytes) => {
                let array: [u8; 32] =
                    bytes.as_slice().try_into().map_err(|_| Error::Cbor(dcbor::Error::OutOfRange))?;
                Ok(Envelope::new_elided(Digest::from_bytes(array)))
            }
            CBORCase::Array(items) => {
                if items.len() < 2 {
                    return Err(Error::Cbor(dcbor::Error::OutOfRange));
                }
                let subject = Self::from_untagged_cbor(items[0].clone())?;
                let assertions = items[1..]
                    .iter()
                    .cloned()
                    .map(Self::from_untagged_cbor)
                    .collect::<Result<Vec<_>>>()?;
                Envelope::new_with_assertions(subject, assertions)
            }
            CBORCase::Map(_) => {
                let assertion = Assertion::try_from_cbor(cbor)?;
                Ok(Envelope::new_assertion(assertion))
            }
            CBORCase::Unsigned(value) => Ok(Envelope::new_known_value(KnownValue::new(value))),
            _ => Err(Error::Cbor(dcbor::Error::OutOfRange)),
        }
    }
}
