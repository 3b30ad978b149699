use gordian_envelope::Envelope;

use crate::pattern::{Compilable, Matcher, Path, Pattern, vm::Instr};

#[derive(Debug, Clone)]
pub struct NotPattern {
    pattern: Box<Pattern>,
}

impl NotPattern {
    pub fn new(pattern: Pattern) -> Self { Self { pattern: Box::new(pattern) } }
}

impl Matcher for NotPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        if self.pattern.matches(envelope) {
            vec![]
        } else {
            vec![vec![envelope.clone()]]
        }
    }
}

impl Compilable for NotPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        let idx = literals.len();
        literals.push((*self.pattern).clone());
        code.push(Instr::NotMatch(idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverts_inner_pattern() {
        let e = Envelope::from(1);
        assert!(NotPattern::new(Pattern::text("x")).matches(&e));
        assert!(!NotPattern::new(Pattern::number_exact(1.0)).matches(&e));
    }
}
