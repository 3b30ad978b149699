use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, structure::StructurePattern, vm::Instr,
};

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum ObjectPattern {
    Any,
    Pattern(Box<Pattern>),
}

impl ObjectPattern {
    pub fn any() -> Self { ObjectPattern::Any }

    pub fn pattern(pattern: Pattern) -> Self {
        ObjectPattern::Pattern(Box::new(pattern))
    }
}

impl Matcher for ObjectPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let Some(object) = envelope.object() else { return vec![] };

        match self {
            ObjectPattern::Any => vec![vec![object]],
            ObjectPattern::Pattern(pattern) => {
                if pattern.matches(&object) {
                    vec![vec![object]]
                } else {
                    vec![]
                }
            }
        }
    }
}

impl Compilable for ObjectPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        let idx = literals.len();
        literals.push(Pattern::Structure(StructurePattern::Object(self.clone())));
        code.push(Instr::MatchStructure(idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_object_pattern() {
        let e = Envelope::new_assertion(gordian_envelope::Assertion::new("knows", "Bob"));
        assert!(ObjectPattern::any().matches(&e));
        assert!(ObjectPattern::pattern(Pattern::text("Bob")).matches(&e));
    }
}
