use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, meta::MetaPattern, vm::Instr,
};

/// Matches nothing; useful as an identity element and in generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NonePattern;

impl NonePattern {
    pub fn new() -> Self { NonePattern }
}

impl Matcher for NonePattern {
    fn paths(&self, _envelope: &Envelope) -> Vec<Path> { vec![] }
}

impl Compilable for NonePattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(&Pattern::Meta(MetaPattern::None(*self)), code, literals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_nothing() {
        assert!(!NonePattern::new().matches(&Envelope::from(1)));
    }
}
