use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, structure::StructurePattern, vm::Instr,
};

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum PredicatePattern {
    Any,
    Pattern(Box<Pattern>),
}

impl PredicatePattern {
    pub fn any() -> Self { PredicatePattern::Any }

    pub fn pattern(pattern: Pattern) -> Self {
        PredicatePattern::Pattern(Box::new(pattern))
    }
}

impl Matcher for PredicatePattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let Some(predicate) = envelope.predicate() else { return vec![] };

        match self {
            PredicatePattern::Any => vec![vec![predicate]],
            PredicatePattern::Pattern(pattern) => {
                if pattern.matches(&predicate) {
                    vec![vec![predicate]]
                } else {
                    vec![]
                }
            }
        }
    }
}

impl Compilable for PredicatePattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        let idx = literals.len();
        literals.push(Pattern::Structure(StructurePattern::Predicate(self.clone())));
        code.push(Instr::MatchStructure(idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_predicate_pattern() {
        let e = Envelope::new_assertion(gordian_envelope::Assertion::new("knows", "Bob"));
        assert!(PredicatePattern::any().matches(&e));
        assert!(
            PredicatePattern::pattern(Pattern::text("knows")).matches(&e)
        );
    }
}
