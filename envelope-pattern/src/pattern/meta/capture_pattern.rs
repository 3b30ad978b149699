use gordian_envelope::Envelope;

use crate::pattern::{
    CaptureMap, Compilable, Matcher, Path, Pattern,
    vm::{self, Instr, Program},
};

/// Records the envelope path matched by the inner pattern under `name`,
/// without otherwise changing what matches.
#[derive(Debug, Clone)]
pub struct CapturePattern {
    name: String,
    pattern: Box<Pattern>,
}

impl CapturePattern {
    pub fn new(name: impl Into<String>, pattern: Pattern) -> Self {
        Self { name: name.into(), pattern: Box::new(pattern) }
    }

    pub fn name(&self) -> &str { &self.name }
}

impl Matcher for CapturePattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        self.paths_with_captures(envelope).into_iter().map(|(p, _)| p).collect()
    }

    fn paths_with_captures(&self, envelope: &Envelope) -> Vec<(Path, CaptureMap)> {
        let mut code = Vec::new();
        let mut literals = Vec::new();
        self.compile(&mut code, &mut literals);
        code.push(Instr::Accept);
        let prog = Program { code, literals };
        vm::run(&prog, envelope)
    }

    fn is_complex(&self) -> bool { true }
}

impl Compilable for CapturePattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        code.push(Instr::CaptureStart(self.name.clone()));
        self.pattern.compile(code, literals);
        code.push(Instr::CaptureEnd(self.name.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_matched_path_under_name() {
        let e = Envelope::from("hello");
        let pattern = CapturePattern::new("greeting", Pattern::text_any());
        let results = pattern.paths_with_captures(&e);
        assert_eq!(results.len(), 1);
        let (path, captures) = &results[0];
        assert_eq!(path, &vec![e.clone()]);
        assert_eq!(captures.get("greeting"), Some(&vec![vec![e.clone()]]));
    }
}
