use gordian_envelope::Envelope;

use crate::pattern::{
    CaptureMap, Compilable, Matcher, Path, Pattern,
    vm::{self, Instr},
};

/// Matches `pattern` against `envelope` or any of its structural
/// descendants, depth first, deduplicated by path.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    pattern: Box<Pattern>,
}

impl SearchPattern {
    pub fn new(pattern: Pattern) -> Self { Self { pattern: Box::new(pattern) } }
}

impl Matcher for SearchPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        vm::search_paths(&self.pattern, envelope).into_iter().map(|(p, _)| p).collect()
    }

    fn paths_with_captures(&self, envelope: &Envelope) -> Vec<(Path, CaptureMap)> {
        vm::search_paths(&self.pattern, envelope)
    }

    fn is_complex(&self) -> bool { true }
}

impl Compilable for SearchPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        let idx = literals.len();
        literals.push((*self.pattern).clone());
        code.push(Instr::Search(idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nested_assertion_object() {
        let e = Envelope::from("subj").add_assertion_with("knows", "Bob");
        let found = SearchPattern::new(Pattern::text("Bob"));
        assert!(found.matches(&e));
    }
}
