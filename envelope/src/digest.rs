use std::fmt;

use sha2::{Digest as _, Sha256};

/// The 32-byte SHA-256 digest anchoring an envelope subtree.
///
/// Two digests are equal iff their bytes are equal; there is no other
/// notion of digest equivalence.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; 32]);

impl Digest {
    pub fn from_image(data: impl AsRef<[u8]>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data.as_ref());
        Self(hasher.finalize().into())
    }

    /// Hashes the concatenation of several byte-string inputs as one
    /// image, e.g. `subject.digest() ++ predicate.digest()`.
    pub fn from_concatenated<'a>(parts: impl IntoIterator<Item = &'a Digest>) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.0);
        }
        Self(hasher.finalize().into())
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self { Self(bytes) }

    pub fn as_bytes(&self) -> &[u8; 32] { &self.0 }

    pub fn to_hex(&self) -> String { hex::encode(self.0) }

    /// First 8 hex characters, for display purposes only.
    pub fn short_description(&self) -> String { self.to_hex()[..8].to_string() }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short_description())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.short_description()) }
}

/// Implemented by anything an elision/encryption target set can name.
pub trait DigestProvider {
    fn digest(&self) -> Digest;
}

impl DigestProvider for Digest {
    fn digest(&self) -> Digest { *self }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenated_digest_is_order_sensitive() {
        let a = Digest::from_image(b"a");
        let b = Digest::from_image(b"b");
        assert_ne!(Digest::from_concatenated([&a, &b]), Digest::from_concatenated([&b, &a]));
    }

    #[test]
    fn short_description_is_eight_hex_chars() {
        let d = Digest::from_image(b"x");
        assert_eq!(d.short_description().len(), 8);
    }
}
