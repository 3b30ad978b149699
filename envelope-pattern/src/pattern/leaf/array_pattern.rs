use std::ops::RangeInclusive;

use dcbor::CBOR;
use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, leaf::LeafPattern,
    vm::Instr,
};

/// Pattern for matching array leaf values.
#[derive(Debug, Clone)]
pub enum ArrayPattern {
    Any,
    Count(RangeInclusive<usize>),
    /// Every element, in order, must match the pattern at the same
    /// index; the array's length must equal the number of patterns.
    Elements(Vec<Pattern>),
    Exact(CBOR),
}

impl PartialEq for ArrayPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArrayPattern::Any, ArrayPattern::Any) => true,
            (ArrayPattern::Count(a), ArrayPattern::Count(b)) => a == b,
            (ArrayPattern::Elements(a), ArrayPattern::Elements(b)) => a == b,
            (ArrayPattern::Exact(a), ArrayPattern::Exact(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ArrayPattern {}

impl std::hash::Hash for ArrayPattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            ArrayPattern::Any => 0u8.hash(state),
            ArrayPattern::Count(r) => {
                1u8.hash(state);
                r.start().hash(state);
                r.end().hash(state);
            }
            ArrayPattern::Elements(p) => {
                2u8.hash(state);
                p.hash(state);
            }
            ArrayPattern::Exact(c) => {
                3u8.hash(state);
                c.hash(state);
            }
        }
    }
}

impl ArrayPattern {
    pub fn any() -> Self { ArrayPattern::Any }
    pub fn count(range: RangeInclusive<usize>) -> Self { ArrayPattern::Count(range) }
    pub fn count_exact(n: usize) -> Self { ArrayPattern::Count(n..=n) }
    pub fn elements(patterns: Vec<Pattern>) -> Self { ArrayPattern::Elements(patterns) }
    pub fn exact(cbor: CBOR) -> Self { ArrayPattern::Exact(cbor) }
}

impl Matcher for ArrayPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let Some(cbor) = envelope.leaf_cbor() else { return vec![] };
        let Some(elements) = cbor.as_array() else { return vec![] };

        let is_hit = match self {
            ArrayPattern::Any => true,
            ArrayPattern::Count(range) => range.contains(&elements.len()),
            ArrayPattern::Elements(patterns) => {
                patterns.len() == elements.len()
                    && patterns.iter().zip(elements.iter()).all(|(pat, el)| {
                        pat.matches(&Envelope::new_leaf(el.clone()))
                    })
            }
            ArrayPattern::Exact(want) => cbor == want,
        };

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for ArrayPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Leaf(LeafPattern::Array(self.clone())),
            code,
            literals,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_and_elements() {
        let cbor = dcbor::cbor_array(vec![CBOR::from(1), CBOR::from(2)]);
        let e = Envelope::new_leaf(cbor);
        assert!(ArrayPattern::any().matches(&e));
        assert!(ArrayPattern::count_exact(2).matches(&e));
        assert!(!ArrayPattern::count_exact(3).matches(&e));
        assert!(
            ArrayPattern::elements(vec![
                Pattern::number_exact(1.0),
                Pattern::number_exact(2.0),
            ])
            .matches(&e)
        );
    }
}
