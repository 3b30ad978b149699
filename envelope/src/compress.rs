//! Compression: replaces an envelope's content with a zlib-compressed
//! blob while preserving its digest, exactly like elision preserves it
//! but with the content recoverable rather than discarded.

use std::io::{Read, Write};

use dcbor::prelude::*;
use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use crate::digest::{Digest, DigestProvider};
use crate::envelope::{Envelope, EnvelopeCase};
use crate::error::{Error, Result};

/// The compressed bytes of an envelope, plus the digest of the
/// envelope they were compressed from (`Elided`/`Encrypted` carry the
/// analogous digest; see `digest::DigestProvider`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compressed {
    data: Vec<u8>,
    digest: Digest,
}

impl Compressed {
    fn from_uncompressed(uncompressed: &[u8], digest: Digest) -> Self {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(uncompressed).expect("in-memory writer never fails");
        let data = encoder.finish().expect("in-memory writer never fails");
        Self { data, digest }
    }

    fn decompress(&self) -> Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(self.data.as_slice());
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).map_err(|_| Error::NotCompressed)?;
        Ok(out)
    }

    pub fn to_cbor(&self) -> CBOR {
        cbor_array([CBOR::from(self.data.clone()), CBOR::from(self.digest.as_bytes().to_vec())])
    }

    pub fn from_cbor(cbor: CBOR) -> Result<Self> {
        let items = cbor.as_array().ok_or(Error::Cbor(dcbor::Error::WrongCase {
            expected: "a two-element array",
            found: "other",
        }))?;
        if items.len() != 2 {
            return Err(Error::Cbor(dcbor::Error::OutOfRange));
        }
        let data = items[0]
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?
            .to_vec();
        let digest_bytes = items[1]
            .as_byte_string()
            .ok_or(Error::Cbor(dcbor::Error::WrongCase { expected: "byte string", found: "other" }))?;
        let array: [u8; 32] =
            digest_bytes.try_into().map_err(|_| Error::Cbor(dcbor::Error::OutOfRange))?;
        Ok(Self { data, digest: Digest::from_bytes(array) })
    }
}

impl DigestProvider for Compressed {
    fn digest(&self) -> Digest { self.digest }
}

impl Envelope {
    /// Returns the compressed form of this whole envelope. A no-op if
    /// the envelope is already compressed; returns the original
    /// unchanged if compressing it would not actually shrink it.
    pub fn compress(&self) -> Result<Envelope> {
        match self.case() {
            EnvelopeCase::Compressed(_) => Ok(self.clone()),
            EnvelopeCase::Encrypted(_) => Err(Error::AlreadyEncrypted),
            EnvelopeCase::Elided(_) => Err(Error::AlreadyElided),
            _ => {
                let uncompressed = self.to_cbor_data();
                let compressed = Compressed::from_uncompressed(&uncompressed, self.digest());
                if compressed.data.len() >= uncompressed.len() {
                    return Ok(self.clone());
                }
                Ok(Envelope::new_compressed(compressed))
            }
        }
    }

    /// Inverse of `compress`: recovers the original envelope. A no-op
    /// if the envelope is not compressed.
    pub fn uncompress(&self) -> Result<Envelope> {
        match self.case() {
            EnvelopeCase::Compressed(compressed) => {
                let data = compressed.decompress()?;
                let envelope = Envelope::try_from_cbor_data(data)?;
                if envelope.digest() != compressed.digest() {
                    return Err(Error::DigestMismatch);
                }
                Ok(envelope)
            }
            _ => Ok(self.clone()),
        }
    }

    pub fn compress_subject(&self) -> Result<Envelope> {
        if self.subject().is_compressed() {
            return Ok(self.clone());
        }
        let compressed_subject = self.subject().compress()?;
        self.replace_subject(compressed_subject)
    }

    pub fn uncompress_subject(&self) -> Result<Envelope> {
        if !self.subject().is_compressed() {
            return Ok(self.clone());
        }
        let uncompressed_subject = self.subject().uncompress()?;
        self.replace_subject(uncompressed_subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_preserves_digest() {
        let e = Envelope::from("a".repeat(200));
        let compressed = e.compress().unwrap();
        assert_eq!(compressed.digest(), e.digest());
        assert!(compressed.is_compressed());
        let back = compressed.uncompress().unwrap();
        assert_eq!(back, e);
    }
}
