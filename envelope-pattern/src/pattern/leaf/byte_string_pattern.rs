use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, leaf::LeafPattern,
    vm::Instr,
};

/// Pattern for matching byte-string leaf values.
#[derive(Debug, Clone)]
pub enum ByteStringPattern {
    Any,
    Exact(Vec<u8>),
    BinaryRegex(regex::bytes::Regex),
}

impl PartialEq for ByteStringPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ByteStringPattern::Any, ByteStringPattern::Any) => true,
            (ByteStringPattern::Exact(a), ByteStringPattern::Exact(b)) => a == b,
            (ByteStringPattern::BinaryRegex(a), ByteStringPattern::BinaryRegex(b)) => {
                a.as_str() == b.as_str()
            }
            _ => false,
        }
    }
}

impl Eq for ByteStringPattern {}

impl std::hash::Hash for ByteStringPattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            ByteStringPattern::Any => 0u8.hash(state),
            ByteStringPattern::Exact(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            ByteStringPattern::BinaryRegex(r) => {
                2u8.hash(state);
                r.as_str().hash(state);
            }
        }
    }
}

impl ByteStringPattern {
    pub fn any() -> Self { ByteStringPattern::Any }
    pub fn exact(value: impl AsRef<[u8]>) -> Self {
        ByteStringPattern::Exact(value.as_ref().to_vec())
    }
    pub fn binary_regex(regex: regex::bytes::Regex) -> Self {
        ByteStringPattern::BinaryRegex(regex)
    }
}

impl Matcher for ByteStringPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let is_hit = envelope
            .leaf_cbor()
            .and_then(|cbor| cbor.as_byte_string())
            .is_some_and(|bytes| match self {
                ByteStringPattern::Any => true,
                ByteStringPattern::Exact(value) => bytes == value.as_slice(),
                ByteStringPattern::BinaryRegex(regex) => regex.is_match(bytes),
            });

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for ByteStringPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Leaf(LeafPattern::ByteString(self.clone())),
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
    fn exact_and_regex() {
        let e = Envelope::new_leaf(CBOR::from(vec![0xde, 0xad, 0xbe, 0xef]));
        assert!(ByteStringPattern::any().matches(&e));
        assert!(ByteStringPattern::exact([0xde, 0xad, 0xbe, 0xef]).matches(&e));
        assert!(!ByteStringPattern::exact([0x00]).matches(&e));
    }
}
