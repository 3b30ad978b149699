use gordian_envelope::Envelope;

use crate::pattern::{
    CaptureMap, Compilable, Matcher, Path, Pattern, Quantifier,
    vm::{self, Instr, Program},
};

/// Matches the inner pattern repeated according to `quantifier`,
/// chaining each repetition from the envelope the previous one reached.
#[derive(Debug, Clone)]
pub struct RepeatPattern {
    pattern: Box<Pattern>,
    quantifier: Quantifier,
}

impl RepeatPattern {
    pub fn new(pattern: Pattern, quantifier: Quantifier) -> Self {
        Self { pattern: Box::new(pattern), quantifier }
    }
}

impl Matcher for RepeatPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        self.paths_with_captures(envelope).into_iter().map(|(p, _)| p).collect()
    }

    fn paths_with_captures(&self, envelope: &Envelope) -> Vec<(Path, CaptureMap)> {
        if self.quantifier.is_exactly_one() {
            return self.pattern.paths_with_captures(envelope);
        }
        let mut code = Vec::new();
        let mut literals = Vec::new();
        self.compile(&mut code, &mut literals);
        code.push(Instr::Accept);
        let prog = Program { code, literals };
        vm::run(&prog, envelope)
    }

    fn is_complex(&self) -> bool { true }
}

impl Compilable for RepeatPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        if self.quantifier.is_exactly_one() {
            self.pattern.compile(code, literals);
            return;
        }
        let idx = literals.len();
        literals.push((*self.pattern).clone());
        code.push(Instr::Repeat {
            pat_idx: idx,
            min: self.quantifier.min,
            max: self.quantifier.max,
            mode: self.quantifier.mode,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Greediness;

    #[test]
    fn zero_or_more_matches_empty_chain() {
        let e = Envelope::from("leaf");
        let pattern = RepeatPattern::new(
            Pattern::wrapped_unwrap(),
            Quantifier::new(0, None, Greediness::Greedy),
        );
        assert!(pattern.matches(&e));
    }

    #[test]
    fn repeated_unwrap_reaches_innermost_leaf() {
        let inner = Envelope::from("core");
        let wrapped_twice = inner.clone().wrap().wrap();
        let pattern = RepeatPattern::new(
            Pattern::wrapped_unwrap(),
            Quantifier::new(0, None, Greediness::Greedy),
        );
        let paths = pattern.paths(&wrapped_twice);
        assert!(paths.iter().any(|p| p.last() == Some(&inner)));
    }
}
