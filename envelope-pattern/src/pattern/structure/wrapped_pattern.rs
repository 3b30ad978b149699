use gordian_envelope::Envelope;

use crate::pattern::{Matcher, Path};

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum WrappedPattern {
    Any,
    /// Matches a wrapped envelope and continues on the unwrapped envelope.
    Unwrap,
}

impl WrappedPattern {
    pub fn any() -> Self { WrappedPattern::Any }
    pub fn unwrap() -> Self { WrappedPattern::Unwrap }
}

impl Matcher for WrappedPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        if !envelope.subject().is_wrapped() {
            return vec![];
        }

        match self {
            WrappedPattern::Any => vec![vec![envelope.clone()]],
            WrappedPattern::Unwrap => match envelope.subject().try_unwrap() {
                Ok(unwrapped) => vec![vec![unwrapped]],
                Err(_) => vec![],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_yields_inner_envelope() {
        let inner = Envelope::from("secret");
        let wrapped = inner.clone().wrap();
        assert!(WrappedPattern::any().matches(&wrapped));
        let paths = WrappedPattern::unwrap().paths(&wrapped);
        assert_eq!(paths, vec![vec![inner]]);
    }
}
