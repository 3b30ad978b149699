use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, leaf::LeafPattern,
    vm::Instr,
};

/// Pattern matching the CBOR null leaf value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NullPattern;

impl NullPattern {
    pub fn new() -> Self { NullPattern }
}

impl Matcher for NullPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let is_hit = envelope.leaf_cbor().is_some_and(|cbor| cbor.is_null());
        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for NullPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Leaf(LeafPattern::Null(*self)),
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
    fn matches_null_only() {
        let e = Envelope::new_leaf(CBOR::null());
        assert!(NullPattern::new().matches(&e));
        assert!(!NullPattern::new().matches(&Envelope::from(1)));
    }
}
