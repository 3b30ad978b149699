use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic,
    structure::StructurePattern, vm::Instr,
};

/// Pattern for matching obscured (elided, encrypted, or compressed) nodes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ObscuredPattern {
    Any,
    Elided,
    Encrypted,
    Compressed,
}

impl ObscuredPattern {
    pub fn any() -> Self { ObscuredPattern::Any }
    pub fn elided() -> Self { ObscuredPattern::Elided }
    pub fn encrypted() -> Self { ObscuredPattern::Encrypted }
    pub fn compressed() -> Self { ObscuredPattern::Compressed }
}

impl Matcher for ObscuredPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let is_hit = match self {
            ObscuredPattern::Any => envelope.is_obscured(),
            ObscuredPattern::Elided => envelope.is_elided(),
            ObscuredPattern::Encrypted => envelope.is_encrypted(),
            ObscuredPattern::Compressed => envelope.is_compressed(),
        };

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for ObscuredPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Structure(StructurePattern::Obscured(*self)),
            code,
            literals,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_covers_all_three() {
        let e = Envelope::from("x").elide();
        assert!(ObscuredPattern::any().matches(&e));
        assert!(ObscuredPattern::elided().matches(&e));
        assert!(!ObscuredPattern::encrypted().matches(&e));
    }
}
