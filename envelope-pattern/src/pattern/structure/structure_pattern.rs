use gordian_envelope::Envelope;

use super::{
    AssertionsPattern, DigestPattern, NodePattern, ObjectPattern,
    ObscuredPattern, PredicatePattern, SubjectPattern, WrappedPattern,
};
use crate::pattern::{Compilable, Matcher, Path, Pattern, vm::Instr};

/// Unifies every structure-level pattern (matching against an envelope's
/// tree shape rather than its leaf value) behind one dispatch enum.
#[derive(Debug, Clone)]
pub enum StructurePattern {
    Assertions(AssertionsPattern),
    Digest(DigestPattern),
    Node(NodePattern),
    Object(ObjectPattern),
    Obscured(ObscuredPattern),
    Predicate(PredicatePattern),
    Subject(SubjectPattern),
    Wrapped(WrappedPattern),
}

impl StructurePattern {
    pub fn assertions(pattern: AssertionsPattern) -> Self {
        StructurePattern::Assertions(pattern)
    }
    pub fn digest(pattern: DigestPattern) -> Self { StructurePattern::Digest(pattern) }
    pub fn node(pattern: NodePattern) -> Self { StructurePattern::Node(pattern) }
    pub fn object(pattern: ObjectPattern) -> Self { StructurePattern::Object(pattern) }
    pub fn obscured(pattern: ObscuredPattern) -> Self {
        StructurePattern::Obscured(pattern)
    }
    pub fn predicate(pattern: PredicatePattern) -> Self {
        StructurePattern::Predicate(pattern)
    }
    pub fn subject(pattern: SubjectPattern) -> Self { StructurePattern::Subject(pattern) }
    pub fn wrapped(pattern: WrappedPattern) -> Self { StructurePattern::Wrapped(pattern) }
}

impl Matcher for StructurePattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        match self {
            StructurePattern::Assertions(p) => p.paths(envelope),
            StructurePattern::Digest(p) => p.paths(envelope),
            StructurePattern::Node(p) => p.paths(envelope),
            StructurePattern::Object(p) => p.paths(envelope),
            StructurePattern::Obscured(p) => p.paths(envelope),
            StructurePattern::Predicate(p) => p.paths(envelope),
            StructurePattern::Subject(p) => p.paths(envelope),
            StructurePattern::Wrapped(p) => p.paths(envelope),
        }
    }
}

impl Compilable for StructurePattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        match self {
            StructurePattern::Subject(p) => p.compile(code, literals),
            StructurePattern::Object(p) => p.compile(code, literals),
            StructurePattern::Predicate(p) => p.compile(code, literals),
            StructurePattern::Digest(p) => p.compile(code, literals),
            StructurePattern::Node(p) => p.compile(code, literals),
            StructurePattern::Obscured(p) => p.compile(code, literals),
            StructurePattern::Assertions(_) | StructurePattern::Wrapped(_) => {
                crate::pattern::compile_as_atomic(
                    &Pattern::Structure(self.clone()),
                    code,
                    literals,
                );
            }
        }
    }
}
