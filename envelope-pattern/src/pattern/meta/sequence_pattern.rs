use gordian_envelope::Envelope;

use crate::pattern::{CaptureMap, Compilable, Matcher, Path, Pattern, vm::Instr};

/// Matches a chain of patterns applied one after another, each starting
/// from the envelope the previous one's path ended on.
#[derive(Debug, Clone)]
pub struct SequencePattern {
    first: Box<Pattern>,
    rest: Option<Box<SequencePattern>>,
}

impl SequencePattern {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        let mut iter = patterns.into_iter();
        let first = iter.next().expect("a sequence needs at least one pattern");
        let rest: Vec<Pattern> = iter.collect();
        let rest = if rest.is_empty() {
            None
        } else {
            Some(Box::new(SequencePattern::new(rest)))
        };
        Self { first: Box::new(first), rest }
    }
}

impl Matcher for SequencePattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        self.paths_with_captures(envelope).into_iter().map(|(p, _)| p).collect()
    }

    fn paths_with_captures(&self, envelope: &Envelope) -> Vec<(Path, CaptureMap)> {
        let mut out = Vec::new();
        for (head_path, head_caps) in self.first.paths_with_captures(envelope) {
            let Some(last) = head_path.last().cloned() else { continue };
            match &self.rest {
                None => out.push((head_path, head_caps)),
                Some(rest) => {
                    for (tail_path, tail_caps) in rest.paths_with_captures(&last) {
                        let mut full = head_path.clone();
                        full.extend(tail_path);
                        let mut caps = head_caps.clone();
                        for (name, paths) in tail_caps {
                            caps.entry(name).or_default().extend(paths);
                        }
                        out.push((full, caps));
                    }
                }
            }
        }
        out
    }

    fn is_complex(&self) -> bool { true }
}

impl Compilable for SequencePattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        self.first.compile(code, literals);
        match &self.rest {
            None => {}
            Some(rest) => {
                code.push(Instr::ExtendTraversal);
                rest.compile(code, literals);
                code.push(Instr::CombineTraversal);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traverses_subject_then_predicate() {
        let e = Envelope::from("subj").add_assertion_with("knows", "Bob");
        let pattern = SequencePattern::new(vec![
            Pattern::subject_any(),
            Pattern::text("subj"),
        ]);
        assert!(pattern.matches(&e));
    }
}
