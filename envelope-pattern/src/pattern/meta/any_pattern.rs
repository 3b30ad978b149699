use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, meta::MetaPattern, vm::Instr,
};

/// Matches any envelope whatsoever, at the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnyPattern;

impl AnyPattern {
    pub fn new() -> Self { AnyPattern }
}

impl Matcher for AnyPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        vec![vec![envelope.clone()]]
    }
}

impl Compilable for AnyPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(&Pattern::Meta(MetaPattern::Any(*self)), code, literals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_everything() {
        assert!(AnyPattern::new().matches(&Envelope::from(1)));
        assert!(AnyPattern::new().matches(&Envelope::from("x").add_assertion("a", 1)));
    }
}
