use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern,
    leaf::{
        ArrayPattern, BoolPattern, ByteStringPattern, CBORPattern, DatePattern,
        KnownValuePattern, MapPattern, NullPattern, NumberPattern, TaggedPattern,
        TextPattern,
    },
    vm::Instr,
};

/// Unifies every leaf-level pattern (matching against a single envelope's
/// own CBOR value, never its structure) behind one dispatch enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LeafPattern {
    Bool(BoolPattern),
    Number(NumberPattern),
    Text(TextPattern),
    ByteString(ByteStringPattern),
    Date(DatePattern),
    KnownValue(KnownValuePattern),
    Array(ArrayPattern),
    Map(MapPattern),
    Tagged(TaggedPattern),
    CBOR(CBORPattern),
    Null(NullPattern),
}

impl Matcher for LeafPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        match self {
            LeafPattern::Bool(p) => p.paths(envelope),
            LeafPattern::Number(p) => p.paths(envelope),
            LeafPattern::Text(p) => p.paths(envelope),
            LeafPattern::ByteString(p) => p.paths(envelope),
            LeafPattern::Date(p) => p.paths(envelope),
            LeafPattern::KnownValue(p) => p.paths(envelope),
            LeafPattern::Array(p) => p.paths(envelope),
            LeafPattern::Map(p) => p.paths(envelope),
            LeafPattern::Tagged(p) => p.paths(envelope),
            LeafPattern::CBOR(p) => p.paths(envelope),
            LeafPattern::Null(p) => p.paths(envelope),
        }
    }
}

impl Compilable for LeafPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        match self {
            LeafPattern::Bool(p) => p.compile(code, literals),
            LeafPattern::Number(p) => p.compile(code, literals),
            LeafPattern::Text(p) => p.compile(code, literals),
            LeafPattern::ByteString(p) => p.compile(code, literals),
            LeafPattern::Date(p) => p.compile(code, literals),
            LeafPattern::KnownValue(p) => p.compile(code, literals),
            LeafPattern::Array(p) => p.compile(code, literals),
            LeafPattern::Map(p) => p.compile(code, literals),
            LeafPattern::Tagged(p) => p.compile(code, literals),
            LeafPattern::CBOR(p) => p.compile(code, literals),
            LeafPattern::Null(p) => p.compile(code, literals),
        }
    }
}
