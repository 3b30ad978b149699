use gordian_envelope::Envelope;

use super::{
    AndPattern, AnyPattern, CapturePattern, NonePattern, NotPattern, OrPattern,
    RepeatPattern, SearchPattern, SequencePattern,
};
use crate::pattern::{CaptureMap, Compilable, Matcher, Path, Pattern, vm::Instr};

/// Unifies every control-flow pattern (composing other patterns rather
/// than matching a leaf value or a single structural relation) behind
/// one dispatch enum.
#[derive(Debug, Clone)]
pub enum MetaPattern {
    Any(AnyPattern),
    None(NonePattern),
    And(AndPattern),
    Or(OrPattern),
    Not(NotPattern),
    Search(SearchPattern),
    Sequence(SequencePattern),
    Repeat(RepeatPattern),
    Capture(CapturePattern),
}

impl Matcher for MetaPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        match self {
            MetaPattern::Any(p) => p.paths(envelope),
            MetaPattern::None(p) => p.paths(envelope),
            MetaPattern::And(p) => p.paths(envelope),
            MetaPattern::Or(p) => p.paths(envelope),
            MetaPattern::Not(p) => p.paths(envelope),
            MetaPattern::Search(p) => p.paths(envelope),
            MetaPattern::Sequence(p) => p.paths(envelope),
            MetaPattern::Repeat(p) => p.paths(envelope),
            MetaPattern::Capture(p) => p.paths(envelope),
        }
    }

    fn paths_with_captures(&self, envelope: &Envelope) -> Vec<(Path, CaptureMap)> {
        match self {
            MetaPattern::Any(p) => p.paths_with_captures(envelope),
            MetaPattern::None(p) => p.paths_with_captures(envelope),
            MetaPattern::And(p) => p.paths_with_captures(envelope),
            MetaPattern::Or(p) => p.paths_with_captures(envelope),
            MetaPattern::Not(p) => p.paths_with_captures(envelope),
            MetaPattern::Search(p) => p.paths_with_captures(envelope),
            MetaPattern::Sequence(p) => p.paths_with_captures(envelope),
            MetaPattern::Repeat(p) => p.paths_with_captures(envelope),
            MetaPattern::Capture(p) => p.paths_with_captures(envelope),
        }
    }

    fn is_complex(&self) -> bool {
        match self {
            MetaPattern::Any(_) | MetaPattern::None(_) => false,
            _ => true,
        }
    }
}

impl Compilable for MetaPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        match self {
            MetaPattern::Any(p) => p.compile(code, literals),
            MetaPattern::None(p) => p.compile(code, literals),
            MetaPattern::And(p) => p.compile(code, literals),
            MetaPattern::Or(p) => p.compile(code, literals),
            MetaPattern::Not(p) => p.compile(code, literals),
            MetaPattern::Search(p) => p.compile(code, literals),
            MetaPattern::Sequence(p) => p.compile(code, literals),
            MetaPattern::Repeat(p) => p.compile(code, literals),
            MetaPattern::Capture(p) => p.compile(code, literals),
        }
    }
}
