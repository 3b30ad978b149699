//! A per-element tree dump showing each structural node's short digest,
//! the edge it was reached by, and a one-line content summary. Useful
//! for inspecting exactly which subtree an elision or encryption
//! target digest refers to.

use std::collections::HashSet;

use super::{EnvelopeSummary, FormatContext};
use crate::digest::{Digest, DigestProvider};
use crate::envelope::Envelope;
use crate::walk::EdgeType;

impl Envelope {
    pub fn tree_format(&self) -> String { self.tree_format_opt(&FormatContext::default(), &HashSet::new()) }

    /// As [`Envelope::tree_format`], highlighting any element whose
    /// digest is in `highlight` with a leading `*`.
    pub fn tree_format_opt(&self, context: &FormatContext, highlight: &HashSet<Digest>) -> String {
        let mut lines = Vec::new();
        self.walk(Vec::<()>::new(), &mut |envelope, level, edge, state| {
            let parts: Vec<String> = [
                highlight.contains(&envelope.digest()).then(|| "*".to_string()),
                Some(envelope.digest().short_description()),
                edge_label(edge).map(str::to_string),
                Some(envelope.node_summary(40, context)),
            ]
            .into_iter()
            .flatten()
            .collect();
            lines.push(format!("{}{}", " ".repeat(level * 4), parts.join(" ")));
            (state, false)
        });
        lines.join("\n")
    }

    fn node_summary(&self, max_length: usize, context: &FormatContext) -> String {
        use crate::envelope::EnvelopeCase;
        match self.case() {
            EnvelopeCase::Node { .. } => "NODE".to_string(),
            EnvelopeCase::Leaf { cbor, .. } => cbor.envelope_summary(max_length, context),
            EnvelopeCase::Wrapped { .. } => "WRAPPED".to_string(),
            EnvelopeCase::Assertion(_) => "ASSERTION".to_string(),
            EnvelopeCase::KnownValue { value, .. } => format!("'{}'", context.known_values().name(value)),
            EnvelopeCase::Encrypted(_) => "ENCRYPTED".to_string(),
            EnvelopeCase::Compressed(_) => "COMPRESSED".to_string(),
            EnvelopeCase::Elided(_) => "ELIDED".to_string(),
        }
    }
}

fn edge_label(edge: EdgeType) -> Option<&'static str> {
    match edge {
        EdgeType::None => None,
        EdgeType::Subject => Some("subj"),
        EdgeType::Assertion => None,
        EdgeType::Predicate => Some("pred"),
        EdgeType::Object => Some("obj"),
        EdgeType::Wrapped => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_format_includes_every_structural_element() {
        let e = Envelope::from("Alice").add_assertion_with("knows", "Bob");
        let tree = e.tree_format();
        assert!(tree.contains("NODE"));
        assert!(tree.contains("subj \"Alice\""));
        assert!(tree.contains("ASSERTION"));
        assert!(tree.contains("pred \"knows\""));
        assert!(tree.contains("obj \"Bob\""));
    }

    #[test]
    fn highlighted_digest_is_marked() {
        let e = Envelope::from("Alice");
        let mut target = HashSet::new();
        target.insert(e.digest());
        let tree = e.tree_format_opt(&FormatContext::default(), &target);
        assert!(tree.starts_with("* "));
    }
}
