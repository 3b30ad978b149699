//! Elision: replacing envelope content with its digest while leaving
//! the digest of the enclosing envelope unchanged. This is the central
//! invariant of the whole design -- see `digest::DigestProvider` and
//! the `elide`/`elide_removing`/`elide_revealing` operators below.

use std::collections::HashSet;

use crate::digest::{Digest, DigestProvider};
use crate::envelope::{Envelope, EnvelopeCase};

/// What an elision pass does to a subtree it targets. Currently the
/// only action the core ships is `Elide`; the enum exists so that a
/// caller layer (e.g. a future redaction policy) has a stable seam to
/// extend with other obscuring actions without changing the recursion
/// shape of `elide_removing`/`elide_revealing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObscureAction {
    Elide,
}

impl Envelope {
    /// Replaces this envelope's content with its digest. The result's
    /// own digest is unchanged: `e.elide().digest() == e.digest()`.
    pub fn elide(&self) -> Envelope {
        if self.is_elided() {
            return self.clone();
        }
        Envelope::new_elided(self.digest())
    }

    /// Replaces every subtree whose digest is in `targets` with its
    /// elided form, recursing into everything else.
    pub fn elide_removing(&self, targets: &HashSet<Digest>) -> Envelope {
        self.elide_with(targets, false)
    }

    /// Elides every subtree whose digest is *not* in `targets`, except
    /// where doing so would also hide an ancestor of a revealed
    /// subtree -- those ancestors are kept (but still recursed into)
    /// so the revealed subtree remains reachable.
    pub fn elide_revealing(&self, targets: &HashSet<Digest>) -> Envelope {
        self.elide_with(targets, true)
    }

    fn elide_with(&self, targets: &HashSet<Digest>, revealing: bool) -> Envelope {
        let targeted = targets.contains(&self.digest());
        // `removing`: a targeted subtree is elided outright and never
        // recursed into.
        // `revealing`: a subtree with neither a targeted digest nor a
        // targeted descendant is elided outright; everything else
        // (targeted, or an ancestor of something targeted) keeps its
        // structural case and recurses, so non-targeted siblings along
        // the path still get elided.
        if !revealing && targeted {
            return self.elide();
        }
        if revealing && !targeted && !self.contains_any(targets) {
            return self.elide();
        }

        match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                let new_subject = subject.elide_with(targets, revealing);
                let new_assertions: Vec<Envelope> =
                    assertions.iter().map(|a| a.elide_with(targets, revealing)).collect();
                Envelope::new_with_unchecked_assertions(new_subject, new_assertions)
            }
            EnvelopeCase::Wrapped { envelope, .. } => {
                Envelope::new_wrapped(envelope.elide_with(targets, revealing))
            }
            EnvelopeCase::Assertion(assertion) => {
                let predicate = assertion.predicate().elide_with(targets, revealing);
                let object = assertion.object().elide_with(targets, revealing);
                Envelope::new_assertion(crate::Assertion::new(predicate, object))
            }
            // Leaf / KnownValue / already-obscured cases have no
            // children to recurse into.
            _ => self.clone(),
        }
    }

    /// `true` if this envelope's digest, or any descendant's digest,
    /// is in `targets`.
    fn contains_any(&self, targets: &HashSet<Digest>) -> bool {
        if targets.contains(&self.digest()) {
            return true;
        }
        match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                subject.contains_any(targets) || assertions.iter().any(|a| a.contains_any(targets))
            }
            EnvelopeCase::Wrapped { envelope, .. } => envelope.contains_any(targets),
            EnvelopeCase::Assertion(assertion) => {
                assertion.predicate().contains_any(targets) || assertion.object().contains_any(targets)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Assertion;

    #[test]
    fn elide_preserves_digest() {
        let e = Envelope::from("Alice")
            .add_assertion(Assertion::new(Envelope::from("knows"), Envelope::from("Bob")));
        assert_eq!(e.elide().digest(), e.digest());
    }

    #[test]
    fn elide_removing_targets_a_subtree_but_keeps_the_whole_digest() {
        let bob = Envelope::from("Bob");
        let e = Envelope::from("Alice").add_assertion(Assertion::new(Envelope::from("knows"), bob.clone()));
        let mut targets = HashSet::new();
        targets.insert(bob.digest());
        let elided = e.elide_removing(&targets);
        assert_eq!(elided.digest(), e.digest());
        let obj = elided.assertions()[0].object().unwrap();
        assert!(obj.is_elided());
    }

    #[test]
    fn elide_revealing_keeps_only_named_subtrees() {
        let bob = Envelope::from("Bob");
        let e = Envelope::from("Alice").add_assertion(Assertion::new(Envelope::from("knows"), bob.clone()));
        let mut targets = HashSet::new();
        targets.insert(e.digest());
        targets.insert(bob.digest());
        let revealed = e.elide_revealing(&targets);
        assert_eq!(revealed.digest(), e.digest());
        assert!(revealed.subject().is_elided());
        let obj = revealed.assertions()[0].object().unwrap();
        assert_eq!(obj, bob);
    }
}
