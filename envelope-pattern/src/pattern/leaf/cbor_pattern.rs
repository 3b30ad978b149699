use dcbor::CBOR;
use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, leaf::LeafPattern,
    vm::Instr,
};

/// Pattern for matching a leaf's dCBOR encoding exactly, independent of
/// any more specific leaf pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CBORPattern {
    Any,
    Exact(CBOR),
}

impl CBORPattern {
    pub fn any() -> Self { CBORPattern::Any }
    pub fn exact(cbor: CBOR) -> Self { CBORPattern::Exact(cbor) }
}

impl Matcher for CBORPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let Some(cbor) = envelope.leaf_cbor() else { return vec![] };

        let is_hit = match self {
            CBORPattern::Any => true,
            CBORPattern::Exact(want) => cbor == want,
        };

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for CBORPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Leaf(LeafPattern::CBOR(self.clone())),
            code,
            literals,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        let e = Envelope::new_leaf(CBOR::from(42));
        assert!(CBORPattern::any().matches(&e));
        assert!(CBORPattern::exact(CBOR::from(42)).matches(&e));
        assert!(!CBORPattern::exact(CBOR::from(43)).matches(&e));
    }
}
