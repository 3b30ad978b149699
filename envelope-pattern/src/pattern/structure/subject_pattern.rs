use gordian_envelope::Envelope;

use crate::pattern::{Compilable, Matcher, Path, Pattern, vm::Instr};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum SubjectPattern {
    Any,
}

impl SubjectPattern {
    pub fn any() -> Self { SubjectPattern::Any }
}

impl Compilable for SubjectPattern {
    fn compile(&self, code: &mut Vec<Instr>, _literals: &mut Vec<Pattern>) {
        match self {
            SubjectPattern::Any => code.push(Instr::NavigateSubject),
        }
    }
}

impl Matcher for SubjectPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let subject = envelope.subject();
        if &subject == envelope {
            vec![vec![]]
        } else {
            vec![vec![subject]]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_is_its_own_subject() {
        let e = Envelope::from("lonely");
        assert_eq!(SubjectPattern::any().paths(&e), vec![Vec::<Envelope>::new()]);
    }

    #[test]
    fn node_subject_is_distinct() {
        let e = Envelope::new_assertion(gordian_envelope::Assertion::new("knows", "Bob"))
            .wrap();
        let e = e.add_assertion_with("note", "extra");
        let paths = SubjectPattern::any().paths(&e);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0][0], e.subject());
    }
}
