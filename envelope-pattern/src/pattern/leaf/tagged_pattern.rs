use dcbor::Tag;
use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, leaf::LeafPattern,
    vm::Instr,
};

/// Pattern for matching tagged CBOR leaf values.
///
/// Tag names are looked up directly on the matched [`Tag`] rather than
/// through a process-wide registry: every `Tag` already carries its own
/// optional name at construction time.
#[derive(Debug, Clone)]
pub enum TaggedPattern {
    Any,
    Exact(Tag),
    Named(String),
    Regex(regex::Regex),
}

impl PartialEq for TaggedPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TaggedPattern::Any, TaggedPattern::Any) => true,
            (TaggedPattern::Exact(a), TaggedPattern::Exact(b)) => a == b,
            (TaggedPattern::Named(a), TaggedPattern::Named(b)) => a == b,
            (TaggedPattern::Regex(a), TaggedPattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for TaggedPattern {}

impl std::hash::Hash for TaggedPattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            TaggedPattern::Any => 0u8.hash(state),
            TaggedPattern::Exact(t) => {
                1u8.hash(state);
                t.hash(state);
            }
            TaggedPattern::Named(n) => {
                2u8.hash(state);
                n.hash(state);
            }
            TaggedPattern::Regex(r) => {
                3u8.hash(state);
                r.as_str().hash(state);
            }
        }
    }
}

impl TaggedPattern {
    pub fn any() -> Self { TaggedPattern::Any }
    pub fn with_tag(tag: Tag) -> Self { TaggedPattern::Exact(tag) }
    pub fn with_value(value: u64) -> Self { TaggedPattern::Exact(Tag::new(value)) }
    pub fn named(name: impl Into<String>) -> Self { TaggedPattern::Named(name.into()) }
    pub fn name_regex(regex: regex::Regex) -> Self { TaggedPattern::Regex(regex) }
}

impl Matcher for TaggedPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let Some(cbor) = envelope.leaf_cbor() else { return vec![] };
        let Some((tag, _content)) = cbor.as_tagged() else { return vec![] };

        let is_hit = match self {
            TaggedPattern::Any => true,
            TaggedPattern::Exact(want) => tag.value() == want.value(),
            TaggedPattern::Named(name) => tag.name() == Some(name.as_str()),
            TaggedPattern::Regex(regex) => {
                tag.name().is_some_and(|n| regex.is_match(n))
            }
        };

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for TaggedPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Leaf(LeafPattern::Tagged(self.clone())),
            code,
            literals,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcbor::prelude::*;

    #[test]
    fn matches_by_value_and_name() {
        let tag = Tag::with_name(100, "custom");
        let cbor = CBOR::tagged(tag.clone(), CBOR::from(1));
        let e = Envelope::new_leaf(cbor);
        assert!(TaggedPattern::any().matches(&e));
        assert!(TaggedPattern::with_value(100).matches(&e));
        assert!(!TaggedPattern::with_value(101).matches(&e));
        assert!(TaggedPattern::named("custom").matches(&e));
        assert!(!TaggedPattern::named("other").matches(&e));
    }
}
