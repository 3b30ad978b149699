//! Tree traversal over envelopes.
//!
//! Two modes are offered: `walk` visits every structural case (`Node`,
//! `Wrapped`, `Assertion` are all visited as distinct stops alongside
//! their children), while `walk_structure` is the variant the pattern
//! engine's `Search` instruction relies on, visiting subject, then
//! assertions, then (for an `Assertion`) predicate and object.

use crate::envelope::{Envelope, EnvelopeCase};

/// How a visited envelope was reached from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// The starting envelope of a walk.
    None,
    /// Reached as a `Node`'s subject.
    Subject,
    /// Reached as one of a `Node`'s assertions.
    Assertion,
    /// Reached as an `Assertion`'s predicate.
    Predicate,
    /// Reached as an `Assertion`'s object.
    Object,
    /// Reached as a `Wrapped`'s inner content.
    Wrapped,
}

impl Envelope {
    /// Visits every structurally distinct envelope in this tree,
    /// depth-first, threading a caller-provided state `S` and stopping
    /// early when the visitor returns `true`.
    ///
    /// The visitor receives `(envelope, level, incoming_edge, state)`
    /// and returns `(next_state, should_stop)`.
    pub fn walk<S: Clone>(
        &self,
        state: S,
        visitor: &mut impl FnMut(&Envelope, usize, EdgeType, S) -> (S, bool),
    ) -> bool {
        self.walk_at(0, EdgeType::None, state, visitor)
    }

    fn walk_at<S: Clone>(
        &self,
        level: usize,
        incoming: EdgeType,
        state: S,
        visitor: &mut impl FnMut(&Envelope, usize, EdgeType, S) -> (S, bool),
    ) -> bool {
        let (next_state, stop) = visitor(self, level, incoming, state);
        if stop {
            return true;
        }
        match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                if subject.walk_at(level + 1, EdgeType::Subject, next_state.clone(), visitor) {
                    return true;
                }
                for assertion in assertions {
                    if assertion.walk_at(level + 1, EdgeType::Assertion, next_state.clone(), visitor) {
                        return true;
                    }
                }
            }
            EnvelopeCase::Wrapped { envelope, .. } => {
                if envelope.walk_at(level + 1, EdgeType::Wrapped, next_state, visitor) {
                    return true;
                }
            }
            EnvelopeCase::Assertion(assertion) => {
                if assertion.predicate().walk_at(level + 1, EdgeType::Predicate, next_state.clone(), visitor) {
                    return true;
                }
                if assertion.object().walk_at(level + 1, EdgeType::Object, next_state, visitor) {
                    return true;
                }
            }
            _ => {}
        }
        false
    }

    /// The direct structural children of this envelope, in the order
    /// the pattern engine's `Search` visits them: subject first, then
    /// assertions in iteration order; or an assertion's predicate then
    /// object; or a wrapped envelope's content.
    pub fn structural_children(&self) -> Vec<Envelope> {
        match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                let mut out = vec![subject.clone()];
                out.extend(assertions.iter().cloned());
                out
            }
            EnvelopeCase::Wrapped { envelope, .. } => vec![envelope.clone()],
            EnvelopeCase::Assertion(assertion) => {
                vec![assertion.predicate().clone(), assertion.object().clone()]
            }
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Assertion;

    #[test]
    fn walk_visits_subject_then_assertions() {
        let e = Envelope::from("Alice")
            .add_assertion(Assertion::new(Envelope::from("knows"), Envelope::from("Bob")));
        let mut seen = Vec::new();
        e.walk(Vec::<String>::new(), &mut |env, _level, edge, mut state| {
            state.push(format!("{:?}", edge));
            seen.push(format!("{:?}:{}", edge, env.is_leaf()));
            (state, false)
        });
        assert_eq!(seen[0], "None:false");
        assert!(seen.contains(&"Subject:true".to_string()));
        assert!(seen.contains(&"Assertion:false".to_string()));
    }
}
