use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, leaf::LeafPattern,
    vm::Instr,
};

/// Pattern for matching boolean values.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum BoolPattern {
    /// Matches any boolean value.
    Any,
    /// Matches the specific boolean value.
    Exact(bool),
}

impl BoolPattern {
    pub fn any() -> Self { BoolPattern::Any }

    pub fn exact(value: bool) -> Self { BoolPattern::Exact(value) }
}

impl Matcher for BoolPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let is_hit = envelope
            .leaf_cbor()
            .and_then(|cbor| cbor.as_bool())
            .is_some_and(|value| match self {
                BoolPattern::Any => true,
                BoolPattern::Exact(want) => value == *want,
            });

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for BoolPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Leaf(LeafPattern::Bool(self.clone())),
            code,
            literals,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_and_any() {
        let e = Envelope::from(true);
        assert!(BoolPattern::any().matches(&e));
        assert!(BoolPattern::exact(true).matches(&e));
        assert!(!BoolPattern::exact(false).matches(&e));
    }

    #[test]
    fn non_bool_leaf_never_matches() {
        let e = Envelope::from("not a bool");
        assert!(!BoolPattern::any().matches(&e));
    }
}
