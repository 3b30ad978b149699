use gordian_envelope::Envelope;

use crate::pattern::{CaptureMap, Compilable, Matcher, Path, Pattern, vm::Instr};

/// Matches only if every sub-pattern matches the same envelope.
#[derive(Debug, Clone)]
pub struct AndPattern {
    patterns: Vec<Pattern>,
}

impl AndPattern {
    pub fn new(patterns: Vec<Pattern>) -> Self { Self { patterns } }
}

impl Matcher for AndPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        if self.patterns.iter().all(|p| p.matches(envelope)) {
            vec![vec![envelope.clone()]]
        } else {
            vec![]
        }
    }

    fn paths_with_captures(&self, envelope: &Envelope) -> Vec<(Path, CaptureMap)> {
        let mut merged = CaptureMap::new();
        for pattern in &self.patterns {
            let sub = pattern.paths_with_captures(envelope);
            if sub.is_empty() {
                return vec![];
            }
            for (name, paths) in &sub[0].1 {
                merged.entry(name.clone()).or_default().extend(paths.clone());
            }
        }
        vec![(vec![envelope.clone()], merged)]
    }

    fn is_complex(&self) -> bool { true }
}

impl Compilable for AndPattern {
    /// Compiles each sub-pattern in sequence. Every sub-pattern here is
    /// expected to be position-preserving (leaf, structure, or/and/not);
    /// a position-changing sub-pattern (e.g. `subj`) belongs in a
    /// [`super::SequencePattern`] instead.
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        for pattern in &self.patterns {
            pattern.compile(code, literals);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_must_match() {
        let e = Envelope::from(5.0);
        assert!(
            AndPattern::new(vec![
                Pattern::number_greater_than(1.0),
                Pattern::number_less_than(10.0),
            ])
            .matches(&e)
        );
        assert!(
            !AndPattern::new(vec![
                Pattern::number_greater_than(1.0),
                Pattern::number_less_than(4.0),
            ])
            .matches(&e)
        );
    }
}
