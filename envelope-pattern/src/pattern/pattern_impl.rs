use std::ops::RangeInclusive;

use dcbor::{CBOR, Date, Tag};
use gordian_envelope::{Digest, Envelope};
use known_values::KnownValue;

use crate::pattern::{
    CaptureMap, Compilable, Greediness, Matcher, Path, Quantifier,
    leaf::{
        ArrayPattern, BoolPattern, ByteStringPattern, CBORPattern, DatePattern,
        KnownValuePattern, LeafPattern, MapPattern, NullPattern, NumberPattern,
        TaggedPattern, TextPattern,
    },
    meta::{
        AndPattern, AnyPattern, CapturePattern, MetaPattern, NonePattern,
        NotPattern, OrPattern, RepeatPattern, SearchPattern, SequencePattern,
    },
    structure::{
        AssertionsPattern, DigestPattern, NodePattern, ObjectPattern,
        ObscuredPattern, PredicatePattern, StructurePattern, SubjectPattern,
        WrappedPattern,
    },
    vm::Instr,
};

/// The top-level pattern type: a leaf-value test, a structural test, or
/// a control-flow combinator over other patterns.
#[derive(Debug, Clone)]
pub enum Pattern {
    Leaf(LeafPattern),
    Structure(StructurePattern),
    Meta(MetaPattern),
}

impl Matcher for Pattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        match self {
            Pattern::Leaf(p) => p.paths(envelope),
            Pattern::Structure(p) => p.paths(envelope),
            Pattern::Meta(p) => p.paths(envelope),
        }
    }

    fn paths_with_captures(&self, envelope: &Envelope) -> Vec<(Path, CaptureMap)> {
        match self {
            Pattern::Leaf(p) => p.paths_with_captures(envelope),
            Pattern::Structure(p) => p.paths_with_captures(envelope),
            Pattern::Meta(p) => p.paths_with_captures(envelope),
        }
    }

    fn is_complex(&self) -> bool {
        match self {
            Pattern::Leaf(_) => false,
            Pattern::Structure(p) => {
                matches!(p, StructurePattern::Object(_) | StructurePattern::Predicate(_))
            }
            Pattern::Meta(p) => p.is_complex(),
        }
    }
}

impl Compilable for Pattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        match self {
            Pattern::Leaf(p) => p.compile(code, literals),
            Pattern::Structure(p) => p.compile(code, literals),
            Pattern::Meta(p) => p.compile(code, literals),
        }
    }
}

macro_rules! leaf_ctor {
    ($name:ident, $variant:ident, $inner:expr) => {
        pub fn $name() -> Self { Pattern::Leaf(LeafPattern::$variant($inner)) }
    };
}

impl Pattern {
    // ---- top-level wildcards ----
    pub fn any() -> Self { Pattern::Meta(MetaPattern::Any(AnyPattern::new())) }
    pub fn none() -> Self { Pattern::Meta(MetaPattern::None(NonePattern::new())) }

    // ---- bool ----
    leaf_ctor!(bool_any, Bool, BoolPattern::any());
    pub fn bool_exact(value: bool) -> Self {
        Pattern::Leaf(LeafPattern::Bool(BoolPattern::exact(value)))
    }

    // ---- number ----
    leaf_ctor!(number_any, Number, NumberPattern::any());
    pub fn number_exact(value: f64) -> Self {
        Pattern::Leaf(LeafPattern::Number(NumberPattern::exact(value)))
    }
    pub fn number_range(range: RangeInclusive<f64>) -> Self {
        Pattern::Leaf(LeafPattern::Number(NumberPattern::range(range)))
    }
    pub fn number_greater_than(value: f64) -> Self {
        Pattern::Leaf(LeafPattern::Number(NumberPattern::greater_than(value)))
    }
    pub fn number_greater_than_or_equal(value: f64) -> Self {
        Pattern::Leaf(LeafPattern::Number(NumberPattern::greater_than_or_equal(value)))
    }
    pub fn number_less_than(value: f64) -> Self {
        Pattern::Leaf(LeafPattern::Number(NumberPattern::less_than(value)))
    }
    pub fn number_less_than_or_equal(value: f64) -> Self {
        Pattern::Leaf(LeafPattern::Number(NumberPattern::less_than_or_equal(value)))
    }
    leaf_ctor!(number_nan, Number, NumberPattern::nan());
    leaf_ctor!(number_infinity, Number, NumberPattern::infinity());
    leaf_ctor!(number_negative_infinity, Number, NumberPattern::negative_infinity());

    // ---- text ----
    leaf_ctor!(text_any, Text, TextPattern::any());
    pub fn text(value: impl Into<String>) -> Self {
        Pattern::Leaf(LeafPattern::Text(TextPattern::exact(value)))
    }
    pub fn text_regex(regex: regex::Regex) -> Self {
        Pattern::Leaf(LeafPattern::Text(TextPattern::regex(regex)))
    }

    // ---- byte string ----
    leaf_ctor!(byte_string_any, ByteString, ByteStringPattern::any());
    pub fn byte_string(value: impl AsRef<[u8]>) -> Self {
        Pattern::Leaf(LeafPattern::ByteString(ByteStringPattern::exact(value)))
    }
    pub fn byte_string_regex(regex: regex::bytes::Regex) -> Self {
        Pattern::Leaf(LeafPattern::ByteString(ByteStringPattern::binary_regex(regex)))
    }

    // ---- date ----
    leaf_ctor!(date_any, Date, DatePattern::any());
    pub fn date(date: Date) -> Self {
        Pattern::Leaf(LeafPattern::Date(DatePattern::date(date)))
    }
    pub fn date_range(range: RangeInclusive<Date>) -> Self {
        Pattern::Leaf(LeafPattern::Date(DatePattern::range(range)))
    }
    pub fn date_earliest(date: Date) -> Self {
        Pattern::Leaf(LeafPattern::Date(DatePattern::earliest(date)))
    }
    pub fn date_latest(date: Date) -> Self {
        Pattern::Leaf(LeafPattern::Date(DatePattern::latest(date)))
    }

    // ---- known value ----
    leaf_ctor!(known_value_any, KnownValue, KnownValuePattern::any());
    pub fn known_value(value: KnownValue) -> Self {
        Pattern::Leaf(LeafPattern::KnownValue(KnownValuePattern::exact(value)))
    }
    pub fn known_value_named(name: impl Into<String>) -> Self {
        Pattern::Leaf(LeafPattern::KnownValue(KnownValuePattern::named(name)))
    }

    // ---- array / map ----
    leaf_ctor!(array_any, Array, ArrayPattern::any());
    pub fn array_count(range: RangeInclusive<usize>) -> Self {
        Pattern::Leaf(LeafPattern::Array(ArrayPattern::count(range)))
    }
    pub fn array_elements(elements: Vec<Pattern>) -> Self {
        Pattern::Leaf(LeafPattern::Array(ArrayPattern::elements(elements)))
    }
    leaf_ctor!(map_any, Map, MapPattern::any());
    pub fn map_count(range: RangeInclusive<usize>) -> Self {
        Pattern::Leaf(LeafPattern::Map(MapPattern::count(range)))
    }

    // ---- tagged / cbor / null ----
    leaf_ctor!(tagged_any, Tagged, TaggedPattern::any());
    pub fn tagged(tag: Tag) -> Self {
        Pattern::Leaf(LeafPattern::Tagged(TaggedPattern::with_tag(tag)))
    }
    pub fn tagged_value(value: u64) -> Self {
        Pattern::Leaf(LeafPattern::Tagged(TaggedPattern::with_value(value)))
    }
    pub fn tagged_named(name: impl Into<String>) -> Self {
        Pattern::Leaf(LeafPattern::Tagged(TaggedPattern::named(name)))
    }
    pub fn cbor(cbor: CBOR) -> Self {
        Pattern::Leaf(LeafPattern::CBOR(CBORPattern::exact(cbor)))
    }
    pub fn null() -> Self { Pattern::Leaf(LeafPattern::Null(NullPattern::new())) }

    // ---- structure ----
    pub fn subject_any() -> Self {
        Pattern::Structure(StructurePattern::Subject(SubjectPattern::any()))
    }
    pub fn predicate_any() -> Self {
        Pattern::Structure(StructurePattern::Predicate(PredicatePattern::any()))
    }
    pub fn predicate(pattern: Pattern) -> Self {
        Pattern::Structure(StructurePattern::Predicate(PredicatePattern::pattern(pattern)))
    }
    pub fn object_any() -> Self {
        Pattern::Structure(StructurePattern::Object(ObjectPattern::any()))
    }
    pub fn object(pattern: Pattern) -> Self {
        Pattern::Structure(StructurePattern::Object(ObjectPattern::pattern(pattern)))
    }
    pub fn assertions_any() -> Self {
        Pattern::Structure(StructurePattern::Assertions(AssertionsPattern::any()))
    }
    pub fn assertions_with_predicate(pattern: Pattern) -> Self {
        Pattern::Structure(StructurePattern::Assertions(
            AssertionsPattern::with_predicate(pattern),
        ))
    }
    pub fn assertions_with_object(pattern: Pattern) -> Self {
        Pattern::Structure(StructurePattern::Assertions(
            AssertionsPattern::with_object(pattern),
        ))
    }
    pub fn assertions_with_both(predicate: Pattern, object: Pattern) -> Self {
        Pattern::Structure(StructurePattern::Assertions(
            AssertionsPattern::with_both(predicate, object),
        ))
    }
    pub fn digest(digest: Digest) -> Self {
        Pattern::Structure(StructurePattern::Digest(DigestPattern::digest(digest)))
    }
    pub fn digest_hex_prefix(prefix: impl Into<String>) -> Self {
        Pattern::Structure(StructurePattern::Digest(DigestPattern::hex_prefix(prefix)))
    }
    pub fn digest_regex(regex: regex::bytes::Regex) -> Self {
        Pattern::Structure(StructurePattern::Digest(DigestPattern::binary_regex(regex)))
    }
    pub fn node_any() -> Self {
        Pattern::Structure(StructurePattern::Node(NodePattern::any()))
    }
    pub fn node_assertions_count(count: usize) -> Self {
        Pattern::Structure(StructurePattern::Node(NodePattern::assertions_count(count)))
    }
    pub fn obscured_any() -> Self {
        Pattern::Structure(StructurePattern::Obscured(ObscuredPattern::any()))
    }
    pub fn elided() -> Self {
        Pattern::Structure(StructurePattern::Obscured(ObscuredPattern::elided()))
    }
    pub fn encrypted() -> Self {
        Pattern::Structure(StructurePattern::Obscured(ObscuredPattern::encrypted()))
    }
    pub fn compressed() -> Self {
        Pattern::Structure(StructurePattern::Obscured(ObscuredPattern::compressed()))
    }
    pub fn wrapped_any() -> Self {
        Pattern::Structure(StructurePattern::Wrapped(WrappedPattern::any()))
    }
    pub fn wrapped_unwrap() -> Self {
        Pattern::Structure(StructurePattern::Wrapped(WrappedPattern::unwrap()))
    }

    // ---- meta / control flow ----
    pub fn and(patterns: Vec<Pattern>) -> Self {
        Pattern::Meta(MetaPattern::And(AndPattern::new(patterns)))
    }
    pub fn or(patterns: Vec<Pattern>) -> Self {
        Pattern::Meta(MetaPattern::Or(OrPattern::new(patterns)))
    }
    pub fn not_matching(pattern: Pattern) -> Self {
        Pattern::Meta(MetaPattern::Not(NotPattern::new(pattern)))
    }
    pub fn search(pattern: Pattern) -> Self {
        Pattern::Meta(MetaPattern::Search(SearchPattern::new(pattern)))
    }
    pub fn traverse(patterns: Vec<Pattern>) -> Self {
        Pattern::Meta(MetaPattern::Sequence(SequencePattern::new(patterns)))
    }
    pub fn capture(name: impl Into<String>, pattern: Pattern) -> Self {
        Pattern::Meta(MetaPattern::Capture(CapturePattern::new(name, pattern)))
    }
    pub fn repeat(pattern: Pattern, quantifier: Quantifier) -> Self {
        Pattern::Meta(MetaPattern::Repeat(RepeatPattern::new(pattern, quantifier)))
    }
    pub fn zero_or_more(pattern: Pattern) -> Self {
        Pattern::repeat(pattern, Quantifier::new(0, None, Greediness::Greedy))
    }
    pub fn one_or_more(pattern: Pattern) -> Self {
        Pattern::repeat(pattern, Quantifier::new(1, None, Greediness::Greedy))
    }
    pub fn optional(pattern: Pattern) -> Self {
        Pattern::repeat(pattern, Quantifier::new(0, Some(1), Greediness::Greedy))
    }

    /// Parses a pattern from its textual concrete syntax (see the `parse`
    /// module for the grammar).
    pub fn parse(text: &str) -> crate::error::Result<Self> { crate::parse::parse(text) }
}

impl std::str::FromStr for Pattern {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Pattern::parse(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_constructors_round_trip() {
        assert!(Pattern::text("hi").matches(&Envelope::from("hi")));
        assert!(Pattern::number_exact(1.0).matches(&Envelope::from(1.0)));
        assert!(Pattern::bool_exact(true).matches(&Envelope::from(true)));
        assert!(Pattern::null().matches(&Envelope::new_leaf(CBOR::null())));
    }

    #[test]
    fn and_or_not_compose() {
        let e = Envelope::from(5.0);
        assert!(
            Pattern::and(vec![
                Pattern::number_greater_than(1.0),
                Pattern::number_less_than(10.0),
            ])
            .matches(&e)
        );
        assert!(
            Pattern::or(vec![Pattern::text("x"), Pattern::number_exact(5.0)])
                .matches(&e)
        );
        assert!(Pattern::not_matching(Pattern::text("x")).matches(&e));
    }

    #[test]
    fn traverse_finds_assertion_object() {
        let e = Envelope::from("subj").add_assertion_with("knows", "Bob");
        let pattern = Pattern::traverse(vec![
            Pattern::assertions_with_predicate(Pattern::text("knows")),
            Pattern::object_any(),
        ]);
        assert!(pattern.matches(&e));
    }

    #[test]
    fn capture_and_search_compose() {
        let e = Envelope::from("subj").add_assertion_with("knows", "Bob");
        let pattern = Pattern::search(Pattern::capture("hit", Pattern::text("Bob")));
        let results = pattern.paths_with_captures(&e);
        assert!(!results.is_empty());
        assert!(results.iter().any(|(_, caps)| caps.contains_key("hit")));
    }
}
