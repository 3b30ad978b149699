use gordian_envelope::Envelope;

use crate::pattern::{Matcher, Path, Pattern};

/// Pattern for matching an envelope's assertions.
#[derive(Debug, Clone)]
pub enum AssertionsPattern {
    Any,
    WithPredicate(Box<Pattern>),
    WithObject(Box<Pattern>),
    WithBoth(Box<Pattern>, Box<Pattern>),
}

impl AssertionsPattern {
    pub fn any() -> Self { AssertionsPattern::Any }

    pub fn with_predicate(pattern: Pattern) -> Self {
        AssertionsPattern::WithPredicate(Box::new(pattern))
    }

    pub fn with_object(pattern: Pattern) -> Self {
        AssertionsPattern::WithObject(Box::new(pattern))
    }

    pub fn with_both(predicate: Pattern, object: Pattern) -> Self {
        AssertionsPattern::WithBoth(Box::new(predicate), Box::new(object))
    }
}

impl Matcher for AssertionsPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let mut result = Vec::new();
        for assertion in envelope.assertions() {
            let is_hit = match self {
                AssertionsPattern::Any => true,
                AssertionsPattern::WithPredicate(pattern) => assertion
                    .predicate()
                    .is_some_and(|predicate| pattern.matches(&predicate)),
                AssertionsPattern::WithObject(pattern) => assertion
                    .object()
                    .is_some_and(|object| pattern.matches(&object)),
                AssertionsPattern::WithBoth(pred_pattern, obj_pattern) => {
                    assertion.predicate().is_some_and(|p| pred_pattern.matches(&p))
                        && assertion.object().is_some_and(|o| obj_pattern.matches(&o))
                }
            };
            if is_hit {
                result.push(vec![assertion]);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_by_predicate_object_or_both() {
        let e = Envelope::from("subj").add_assertion_with("knows", "Bob");
        assert!(AssertionsPattern::any().matches(&e));
        assert!(
            AssertionsPattern::with_predicate(Pattern::text("knows")).matches(&e)
        );
        assert!(AssertionsPattern::with_object(Pattern::text("Bob")).matches(&e));
        assert!(
            AssertionsPattern::with_both(Pattern::text("knows"), Pattern::text("Bob"))
                .matches(&e)
        );
        assert!(
            !AssertionsPattern::with_both(Pattern::text("knows"), Pattern::text("Alice"))
                .matches(&e)
        );
    }
}
