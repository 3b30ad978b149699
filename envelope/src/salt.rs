//! Salting: adding a `salt` assertion whose object is random bytes, so
//! that two envelopes carrying otherwise-identical content (and thus
//! otherwise-identical digests) become distinguishable and
//! non-correlatable.

use dcbor::prelude::*;
use known_values::SALT;
use rand::RngCore;

use crate::envelope::Envelope;
use crate::error::{Error, Result};

const MIN_SALT_LEN: usize = 8;

impl Envelope {
    /// Adds a `salt` assertion whose object is `count` random bytes.
    /// `count` must be at least 8.
    pub fn add_salt_with_len(&self, count: usize) -> Result<Envelope> {
        if count < MIN_SALT_LEN {
            return Err(Error::KeySize { expected: MIN_SALT_LEN, found: count });
        }
        let mut bytes = vec![0u8; count];
        rand::thread_rng().fill_bytes(&mut bytes);
        Ok(self.add_assertion_with(SALT, CBOR::from(bytes)))
    }

    /// Adds a `salt` assertion sized randomly within `range` (both
    /// bounds inclusive). The minimum of the range must be at least 8.
    pub fn add_salt_in_range(&self, range: std::ops::RangeInclusive<usize>) -> Result<Envelope> {
        if *range.start() < MIN_SALT_LEN {
            return Err(Error::KeySize { expected: MIN_SALT_LEN, found: *range.start() });
        }
        let span = range.end() - range.start() + 1;
        let count = range.start() + (rand::thread_rng().next_u32() as usize % span);
        self.add_salt_with_len(count)
    }

    /// Adds a `salt` assertion whose length is chosen proportionate to
    /// the size of this envelope's own encoding.
    pub fn add_salt(&self) -> Envelope {
        let size = self.to_cbor_data().len();
        let count = (size / 10).clamp(MIN_SALT_LEN, MIN_SALT_LEN + 24);
        self.add_salt_with_len(count).expect("count is clamped to at least MIN_SALT_LEN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_salt_changes_digest_but_not_subject() {
        let e = Envelope::from("Alice");
        let salted = e.add_salt();
        assert_ne!(salted.digest(), e.digest());
        assert_eq!(salted.subject(), e);
        assert!(salted.object_for_predicate(Envelope::new_known_value(SALT)).is_ok());
    }
}
