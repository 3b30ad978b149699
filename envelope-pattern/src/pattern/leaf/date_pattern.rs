use std::ops::RangeInclusive;

use dcbor::Date;
use gordian_envelope::Envelope;

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic, leaf::LeafPattern,
    vm::Instr,
};

/// Pattern for matching date leaf values (CBOR tag 1).
#[derive(Debug, Clone)]
pub enum DatePattern {
    Any,
    Date(Date),
    Range(RangeInclusive<Date>),
    Earliest(Date),
    Latest(Date),
    Iso8601(String),
    Regex(regex::Regex),
}

impl PartialEq for DatePattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DatePattern::Any, DatePattern::Any) => true,
            (DatePattern::Date(a), DatePattern::Date(b)) => a == b,
            (DatePattern::Range(a), DatePattern::Range(b)) => a == b,
            (DatePattern::Earliest(a), DatePattern::Earliest(b)) => a == b,
            (DatePattern::Latest(a), DatePattern::Latest(b)) => a == b,
            (DatePattern::Iso8601(a), DatePattern::Iso8601(b)) => a == b,
            (DatePattern::Regex(a), DatePattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl Eq for DatePattern {}

impl std::hash::Hash for DatePattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            DatePattern::Any => 0u8.hash(state),
            DatePattern::Date(d) => {
                1u8.hash(state);
                d.hash(state);
            }
            DatePattern::Range(r) => {
                2u8.hash(state);
                r.start().hash(state);
                r.end().hash(state);
            }
            DatePattern::Earliest(d) => {
                3u8.hash(state);
                d.hash(state);
            }
            DatePattern::Latest(d) => {
                4u8.hash(state);
                d.hash(state);
            }
            DatePattern::Iso8601(s) => {
                5u8.hash(state);
                s.hash(state);
            }
            DatePattern::Regex(r) => {
                6u8.hash(state);
                r.as_str().hash(state);
            }
        }
    }
}

impl DatePattern {
    pub fn any() -> Self { DatePattern::Any }
    pub fn date(date: Date) -> Self { DatePattern::Date(date) }
    pub fn range(range: RangeInclusive<Date>) -> Self { DatePattern::Range(range) }
    pub fn earliest(date: Date) -> Self { DatePattern::Earliest(date) }
    pub fn latest(date: Date) -> Self { DatePattern::Latest(date) }
    pub fn iso8601(s: impl Into<String>) -> Self { DatePattern::Iso8601(s.into()) }
    pub fn regex(regex: regex::Regex) -> Self { DatePattern::Regex(regex) }
}

impl Matcher for DatePattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let Some(cbor) = envelope.leaf_cbor() else { return vec![] };
        let Ok(date) = Date::try_from(cbor.clone()) else { return vec![] };

        let is_hit = match self {
            DatePattern::Any => true,
            DatePattern::Date(want) => date == *want,
            DatePattern::Range(range) => range.contains(&date),
            DatePattern::Earliest(earliest) => date >= *earliest,
            DatePattern::Latest(latest) => date <= *latest,
            DatePattern::Iso8601(want) => date.to_string() == *want,
            DatePattern::Regex(regex) => regex.is_match(&date.to_string()),
        };

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for DatePattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Leaf(LeafPattern::Date(self.clone())),
            code,
            literals,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_and_any() {
        let d = Date::from_timestamp(1_700_000_000.0);
        let e = Envelope::new_leaf(d.into());
        assert!(DatePattern::any().matches(&e));
        assert!(DatePattern::date(d).matches(&e));
        assert!(DatePattern::earliest(Date::from_timestamp(1.0)).matches(&e));
    }
}
