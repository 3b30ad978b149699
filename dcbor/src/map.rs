use crate::{cbor::CBOR, error::Error, varint::{EncodeVarInt, MajorType}};

/// A CBOR map whose entries are always maintained in canonical,
/// byte-lexicographic order of their encoded keys.
///
/// Insertion order is never observable: `Map` re-sorts on every
/// insert, so two maps built by inserting the same key/value pairs in
/// different orders compare equal and encode identically.
#[derive(Debug, Clone, Default)]
pub struct Map {
    // Kept sorted by `entries[i].0.to_cbor_data()` at all times.
    entries: Vec<(CBOR, CBOR)>,
}

impl Map {
    pub fn new() -> Self { Self { entries: Vec::new() } }

    fn key_pos(&self, key_bytes: &[u8]) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(k, _)| k.to_cbor_data().as_slice().cmp(key_bytes))
    }

    /// Inserts a key/value pair, replacing any existing value for an
    /// equal key and re-establishing canonical order.
    pub fn insert(&mut self, key: impl Into<CBOR>, value: impl Into<CBOR>) {
        let key = key.into();
        let value = value.into();
        let key_bytes = key.to_cbor_data();
        match self.key_pos(&key_bytes) {
            Ok(idx) => self.entries[idx] = (key, value),
            Err(idx) => self.entries.insert(idx, (key, value)),
        }
    }

    /// Inserts a pre-decoded entry, returning an error on a duplicate
    /// key. Used by the decoder, which must reject duplicates rather
    /// than silently overwrite them.
    pub(crate) fn insert_decoded(
        &mut self,
        key: CBOR,
        value: CBOR,
        offset: usize,
    ) -> Result<(), Error> {
        let key_bytes = key.to_cbor_data();
        match self.key_pos(&key_bytes) {
            Ok(_) => Err(Error::DuplicateMapKey(offset)),
            Err(idx) => {
                self.entries.insert(idx, (key, value));
                Ok(())
            }
        }
    }

    pub fn get(&self, key: &CBOR) -> Option<&CBOR> {
        let key_bytes = key.to_cbor_data();
        self.key_pos(&key_bytes).ok().map(|idx| &self.entries[idx].1)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &(CBOR, CBOR)> {
        self.entries.iter()
    }

    pub(crate) fn cbor_data(&self) -> Vec<u8> {
        let mut buf = self.entries.len().encode_varint(MajorType::Map);
        for (k, v) in &self.entries {
            buf.extend(k.to_cbor_data());
            buf.extend(v.to_cbor_data());
        }
        buf
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool { self.entries == other.entries }
}
impl Eq for Map {}

impl std::hash::Hash for Map {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.entries.hash(state);
    }
}

impl FromIterator<(CBOR, CBOR)> for Map {
    fn from_iter<T: IntoIterator<Item = (CBOR, CBOR)>>(iter: T) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
