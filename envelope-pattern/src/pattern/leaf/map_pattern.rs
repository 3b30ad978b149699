use std::ops::RangeInclusive;

use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, leaf::LeafPattern,
    vm::Instr,
};

/// Pattern for matching map leaf values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapPattern {
    Any,
    Count(RangeInclusive<usize>),
}

impl MapPattern {
    pub fn any() -> Self { MapPattern::Any }
    pub fn count(range: RangeInclusive<usize>) -> Self { MapPattern::Count(range) }
    pub fn count_exact(n: usize) -> Self { MapPattern::Count(n..=n) }
}

impl Matcher for MapPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let Some(cbor) = envelope.leaf_cbor() else { return vec![] };
        let Some(map) = cbor.as_map() else { return vec![] };

        let is_hit = match self {
            MapPattern::Any => true,
            MapPattern::Count(range) => range.contains(&map.len()),
        };

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for MapPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Leaf(LeafPattern::Map(self.clone())),
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
    fn count() {
        let mut map = Map::new();
        map.insert(CBOR::from("a"), CBOR::from(1));
        let e = Envelope::new_leaf(CBOR::from(map));
        assert!(MapPattern::any().matches(&e));
        assert!(MapPattern::count_exact(1).matches(&e));
        assert!(!MapPattern::count_exact(2).matches(&e));
    }
}
