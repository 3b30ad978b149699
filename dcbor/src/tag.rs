use std::collections::HashMap;

/// A CBOR tag number (major type 6), with an optional human-readable
/// name used only for diagnostic notation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    value: u64,
    name: Option<String>,
}

impl Tag {
    pub fn new(value: u64) -> Self { Self { value, name: None } }

    pub fn with_name(value: u64, name: impl Into<String>) -> Self {
        Self { value, name: Some(name.into()) }
    }

    pub fn value(&self) -> u64 { self.value }

    pub fn name(&self) -> Option<&str> { self.name.as_deref() }
}

impl From<u64> for Tag {
    fn from(value: u64) -> Self { Tag::new(value) }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "{}", self.value),
        }
    }
}

/// A caller-owned, explicitly-threaded registry mapping tag numbers to
/// display names and optional summarizing functions.
///
/// Per the design notes on process-wide registries, this is never a
/// global: callers construct a `TagsStore`, populate it once at
/// startup, and pass it to `diagnostic_opt`/`diagnostic_annotated`
/// explicitly. `TagsStore::default()` is pre-populated with the
/// handful of tags this suite itself defines (the envelope wire tag
/// and the known-value tag), matching the registration the envelope
/// crate performs at its boundary.
#[derive(Clone, Default)]
pub struct TagsStore {
    names: HashMap<u64, String>,
    summarizers: HashMap<u64, fn(&crate::CBOR) -> Option<String>>,
}

impl TagsStore {
    pub fn new() -> Self { Self::default() }

    /// Registers a name for `tag`. Registering a *different* name for
    /// a tag number that's already bound is an error — registration is
    /// additive, not overriding.
    pub fn register(
        &mut self,
        tag: u64,
        name: impl Into<String>,
    ) -> Result<(), crate::Error> {
        let name = name.into();
        if let Some(existing) = self.names.get(&tag) {
            if existing != &name {
                return Err(crate::Error::TagConflict(tag));
            }
            return Ok(());
        }
        self.names.insert(tag, name);
        Ok(())
    }

    pub fn register_summarizer(
        &mut self,
        tag: u64,
        summarizer: fn(&crate::CBOR) -> Option<String>,
    ) {
        self.summarizers.insert(tag, summarizer);
    }

    pub fn name_for(&self, tag: u64) -> Option<&str> {
        self.names.get(&tag).map(|s| s.as_str())
    }

    pub fn summarize(&self, tag: u64, content: &crate::CBOR) -> Option<String> {
        self.summarizers.get(&tag).and_then(|f| f(content))
    }

    pub fn tag_for(&self, value: u64) -> Tag {
        match self.name_for(value) {
            Some(name) => Tag::with_name(value, name),
            None => Tag::new(value),
        }
    }
}
