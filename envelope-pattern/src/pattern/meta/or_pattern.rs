use gordian_envelope::Envelope;

use crate::pattern::{CaptureMap, Compilable, Matcher, Path, Pattern, vm::Instr};

/// Matches if any sub-pattern matches; tries alternatives in order.
#[derive(Debug, Clone)]
pub struct OrPattern {
    patterns: Vec<Pattern>,
}

impl OrPattern {
    pub fn new(patterns: Vec<Pattern>) -> Self { Self { patterns } }
}

impl Matcher for OrPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        self.patterns.iter().flat_map(|p| p.paths(envelope)).collect()
    }

    fn paths_with_captures(&self, envelope: &Envelope) -> Vec<(Path, CaptureMap)> {
        self.patterns
            .iter()
            .flat_map(|p| p.paths_with_captures(envelope))
            .collect()
    }

    fn is_complex(&self) -> bool { true }
}

impl Compilable for OrPattern {
    /// A chain of `Split`/`Jump`: alternative `i` is tried before
    /// alternative `i+1`, and each non-final alternative jumps past the
    /// rest once it succeeds.
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        let n = self.patterns.len();
        if n == 0 {
            return;
        }
        let mut jump_patches = Vec::new();
        for (i, pattern) in self.patterns.iter().enumerate() {
            if i + 1 < n {
                let split_idx = code.len();
                code.push(Instr::Split(0, 0));
                let a = code.len();
                pattern.compile(code, literals);
                let jump_idx = code.len();
                code.push(Instr::Jump(0));
                jump_patches.push(jump_idx);
                let b = code.len();
                code[split_idx] = Instr::Split(a, b);
            } else {
                pattern.compile(code, literals);
            }
        }
        let end = code.len();
        for idx in jump_patches {
            code[idx] = Instr::Jump(end);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_alternative_matches() {
        let e = Envelope::from("b");
        assert!(
            OrPattern::new(vec![Pattern::text("a"), Pattern::text("b")]).matches(&e)
        );
        assert!(
            !OrPattern::new(vec![Pattern::text("a"), Pattern::text("c")]).matches(&e)
        );
    }
}
