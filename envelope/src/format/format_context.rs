//! The explicit, caller-owned context threaded through every display
//! API in this module: which CBOR tags and known values have assigned
//! names. Never a process-wide global -- callers construct one
//! (typically [`FormatContext::standard`]) and pass it to whichever
//! `_opt` method needs it; the non-`_opt` convenience methods use
//! `FormatContext::default()`, which has no names assigned beyond the
//! envelope suite's own tags.

use dcbor::TagsStore;
use known_values::KnownValuesStore;

#[derive(Clone, Debug, Default)]
pub struct FormatContext {
    tags: TagsStore,
    known_values: KnownValuesStore,
}

impl FormatContext {
    pub fn new(tags: TagsStore, known_values: KnownValuesStore) -> Self { Self { tags, known_values } }

    /// A context pre-populated with the Blockchain Commons known-value
    /// registry and this suite's own CBOR tags.
    pub fn standard() -> Self {
        let mut tags = TagsStore::new();
        tags.register(crate::TAG_ENVELOPE, "envelope").expect("no prior conflicting registration");
        tags.register(crate::TAG_ENCRYPTED, "encrypted").expect("no prior conflicting registration");
        tags.register(crate::TAG_COMPRESSED, "compressed").expect("no prior conflicting registration");
        Self { tags, known_values: KnownValuesStore::standard() }
    }

    pub fn tags(&self) -> &TagsStore { &self.tags }
    pub fn known_values(&self) -> &KnownValuesStore { &self.known_values }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_context_names_the_envelope_tag() {
        let ctx = FormatContext::standard();
        assert_eq!(ctx.tags().name_for(crate::TAG_ENVELOPE), Some("envelope"));
    }
}
