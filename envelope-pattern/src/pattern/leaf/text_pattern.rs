use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, leaf::LeafPattern,
    vm::Instr,
};

/// Pattern for matching text leaf values.
#[derive(Debug, Clone)]
pub enum TextPattern {
    Any,
    Exact(String),
    Regex(regex::Regex),
}

impl PartialEq for TextPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TextPattern::Any, TextPattern::Any) => true,
            (TextPattern::Exact(a), TextPattern::Exact(b)) => a == b,
            (TextPattern::Regex(a), TextPattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for TextPattern {}

impl std::hash::Hash for TextPattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            TextPattern::Any => 0u8.hash(state),
            TextPattern::Exact(s) => {
                1u8.hash(state);
                s.hash(state);
            }
            TextPattern::Regex(r) => {
                2u8.hash(state);
                r.as_str().hash(state);
            }
        }
    }
}

impl TextPattern {
    pub fn any() -> Self { TextPattern::Any }
    pub fn exact(value: impl Into<String>) -> Self { TextPattern::Exact(value.into()) }
    pub fn regex(regex: regex::Regex) -> Self { TextPattern::Regex(regex) }
}

impl Matcher for TextPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let is_hit = envelope
            .leaf_cbor()
            .and_then(|cbor| cbor.as_text())
            .is_some_and(|value| match self {
                TextPattern::Any => true,
                TextPattern::Exact(want) => value == want,
                TextPattern::Regex(regex) => regex.is_match(value),
            });

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for TextPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Leaf(LeafPattern::Text(self.clone())),
            code,
            literals,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_and_regex() {
        let e = Envelope::from("hello world");
        assert!(TextPattern::any().matches(&e));
        assert!(TextPattern::exact("hello world").matches(&e));
        assert!(!TextPattern::exact("hello").matches(&e));
        assert!(TextPattern::regex(regex::Regex::new("^hello").unwrap()).matches(&e));
    }
}
