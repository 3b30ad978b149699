use gordian_envelope::Envelope;
use known_values::KnownValue;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, leaf::LeafPattern,
    vm::Instr,
};

/// Pattern for matching known-value leaves.
#[derive(Debug, Clone)]
pub enum KnownValuePattern {
    Any,
    Exact(KnownValue),
    Name(String),
    NameRegex(regex::Regex),
}

impl PartialEq for KnownValuePattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KnownValuePattern::Any, KnownValuePattern::Any) => true,
            (KnownValuePattern::Exact(a), KnownValuePattern::Exact(b)) => a == b,
            (KnownValuePattern::Name(a), KnownValuePattern::Name(b)) => a == b,
            (KnownValuePattern::NameRegex(a), KnownValuePattern::NameRegex(b)) => {
                a.as_str() == b.as_str()
            }
            _ => false,
        }
    }
}

impl Eq for KnownValuePattern {}

impl std::hash::Hash for KnownValuePattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            KnownValuePattern::Any => 0u8.hash(state),
            KnownValuePattern::Exact(v) => {
                1u8.hash(state);
                v.hash(state);
            }
            KnownValuePattern::Name(n) => {
                2u8.hash(state);
                n.hash(state);
            }
            KnownValuePattern::NameRegex(r) => {
                3u8.hash(state);
                r.as_str().hash(state);
            }
        }
    }
}

impl KnownValuePattern {
    pub fn any() -> Self { KnownValuePattern::Any }
    pub fn exact(value: KnownValue) -> Self { KnownValuePattern::Exact(value) }
    pub fn named(name: impl Into<String>) -> Self {
        KnownValuePattern::Name(name.into())
    }
    pub fn name_regex(regex: regex::Regex) -> Self {
        KnownValuePattern::NameRegex(regex)
    }
}

impl Matcher for KnownValuePattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let Some(value) = envelope.known_value() else { return vec![] };

        let is_hit = match self {
            KnownValuePattern::Any => true,
            KnownValuePattern::Exact(want) => value == want,
            KnownValuePattern::Name(name) => &value.name() == name,
            KnownValuePattern::NameRegex(regex) => regex.is_match(&value.name()),
        };

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for KnownValuePattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Leaf(LeafPattern::KnownValue(self.clone())),
            code,
            literals,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_by_value_and_name() {
        let e = Envelope::from(known_values::IS_A.clone());
        assert!(KnownValuePattern::any().matches(&e));
        assert!(KnownValuePattern::exact(known_values::IS_A.clone()).matches(&e));
        assert!(KnownValuePattern::named("isA").matches(&e));
        assert!(!KnownValuePattern::named("note").matches(&e));
    }
}
