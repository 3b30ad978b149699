//! Envelope notation: a human-readable tree-shaped rendering of an
//! envelope's semantic structure, distinct from both CBOR diagnostic
//! notation (which shows the wire encoding) and [`super::tree`] (which
//! shows digests). `"Alice" [ "knows": "Bob" ]` is envelope notation;
//! `200([...])` would be the diagnostic form of the same value.

use super::{EnvelopeSummary, FormatContext};
use crate::assertion::Assertion;
use crate::envelope::{Envelope, EnvelopeCase};

impl Envelope {
    /// Hierarchical, multi-line envelope notation using `context` to
    /// resolve known-value names.
    pub fn format_opt(&self, context: &FormatContext) -> String { self.format_item(context).format(false).trim().to_string() }

    /// As [`Envelope::format_opt`], with an unnamed default context.
    pub fn format(&self) -> String { self.format_opt(&FormatContext::default()) }

    /// Single-line envelope notation.
    pub fn format_flat_opt(&self, context: &FormatContext) -> String { self.format_item(context).format(true).trim().to_string() }

    pub fn format_flat(&self) -> String { self.format_flat_opt(&FormatContext::default()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormatItem {
    Begin(String),
    End(String),
    Item(String),
    Separator,
    List(Vec<FormatItem>),
}

impl FormatItem {
    fn flatten(&self) -> Vec<FormatItem> {
        match self {
            FormatItem::List(items) => items.iter().flat_map(|i| i.flatten()).collect(),
            _ => vec![self.clone()],
        }
    }

    /// Merges an `End` immediately followed by a `Begin` into one line
    /// (`} [` rather than `}` then `[` on its own line).
    fn nicen(items: Vec<FormatItem>) -> Vec<FormatItem> {
        let mut input = items;
        let mut result = Vec::new();
        while !input.is_empty() {
            let current = input.remove(0);
            if input.is_empty() {
                result.push(current);
                break;
            }
            if let FormatItem::End(end) = &current {
                if let FormatItem::Begin(begin) = &input[0] {
                    result.push(FormatItem::End(format!("{} {}", end, begin)));
                    result.push(FormatItem::Begin(String::new()));
                    input.remove(0);
                    continue;
                }
            }
            result.push(current);
        }
        result
    }

    fn indent(level: usize) -> String { " ".repeat(level * 4) }

    fn format(&self, flat: bool) -> String {
        if flat { self.format_flat() } else { self.format_hierarchical() }
    }

    fn format_flat(&self) -> String {
        let mut line = String::new();
        for item in self.flatten() {
            match item {
                FormatItem::Begin(s) | FormatItem::End(s) => {
                    if !line.is_empty() && !line.ends_with(' ') {
                        line.push(' ');
                    }
                    line.push_str(&s);
                    line.push(' ');
                }
                FormatItem::Item(s) => line.push_str(&s),
                FormatItem::Separator => {
                    line = line.trim_end().to_string();
                    line.push_str(", ");
                }
                FormatItem::List(_) => unreachable!("flatten removes nested lists"),
            }
        }
        line
    }

    fn format_hierarchical(&self) -> String {
        let mut lines = Vec::new();
        let mut level = 0;
        let mut current = String::new();
        for item in Self::nicen(self.flatten()) {
            match item {
                FormatItem::Begin(delimiter) => {
                    if !delimiter.is_empty() {
                        let prefix = if current.is_empty() {
                            delimiter
                        } else if current.ends_with(' ') {
                            format!("{}{}", current, delimiter)
                        } else {
                            format!("{} {}", current, delimiter)
                        };
                        lines.push(format!("{}{}\n", Self::indent(level), prefix));
                    }
                    level += 1;
                    current = String::new();
                }
                FormatItem::End(delimiter) => {
                    if !current.is_empty() {
                        lines.push(format!("{}{}\n", Self::indent(level), current));
                        current = String::new();
                    }
                    level -= 1;
                    lines.push(format!("{}{}\n", Self::indent(level), delimiter));
                }
                FormatItem::Item(s) => current.push_str(&s),
                FormatItem::Separator => {
                    if !current.is_empty() {
                        lines.push(format!("{}{}\n", Self::indent(level), current));
                        current = String::new();
                    }
                }
                FormatItem::List(_) => unreachable!("flatten removes nested lists"),
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines.join("")
    }
}

impl Envelope {
    fn format_item(&self, context: &FormatContext) -> FormatItem {
        match self.case() {
            EnvelopeCase::Leaf { cbor, .. } => FormatItem::Item(cbor.envelope_summary(usize::MAX, context)),
            EnvelopeCase::Wrapped { envelope, .. } => FormatItem::List(vec![
                FormatItem::Begin("{".to_string()),
                envelope.format_item(context),
                FormatItem::End("}".to_string()),
            ]),
            EnvelopeCase::Assertion(assertion) => assertion.format_item(context),
            EnvelopeCase::KnownValue { value, .. } => FormatItem::Item(format!("'{}'", context.known_values().name(value))),
            EnvelopeCase::Encrypted(_) => FormatItem::Item("ENCRYPTED".to_string()),
            EnvelopeCase::Compressed(_) => FormatItem::Item("COMPRESSED".to_string()),
            EnvelopeCase::Elided(_) => FormatItem::Item("ELIDED".to_string()),
            EnvelopeCase::Node { subject, assertions, .. } => self.format_node(subject, assertions, context),
        }
    }

    fn format_node(&self, subject: &Envelope, assertions: &[Envelope], context: &FormatContext) -> FormatItem {
        let subject_item = subject.format_item(context);

        let mut elided = 0;
        let mut encrypted = 0;
        let mut compressed = 0;
        let mut type_assertions = Vec::new();
        let mut other_assertions = Vec::new();

        for assertion in assertions {
            match assertion.case() {
                EnvelopeCase::Elided(_) => elided += 1,
                EnvelopeCase::Encrypted(_) => encrypted += 1,
                EnvelopeCase::Compressed(_) => compressed += 1,
                _ => {
                    let item = assertion.format_item(context);
                    let is_type_assertion = assertion
                        .predicate()
                        .and_then(|p| p.known_value().cloned())
                        .is_some_and(|kv| kv.value() == known_values::IS_A.value());
                    if is_type_assertion {
                        type_assertions.push(item);
                    } else {
                        other_assertions.push(item);
                    }
                }
            }
        }

        type_assertions.sort_by_key(|i| format!("{:?}", i));
        other_assertions.sort_by_key(|i| format!("{:?}", i));
        let mut assertion_items = type_assertions;
        assertion_items.extend(other_assertions);

        if compressed > 1 {
            assertion_items.push(FormatItem::Item(format!("COMPRESSED ({})", compressed)));
        } else if compressed > 0 {
            assertion_items.push(FormatItem::Item("COMPRESSED".to_string()));
        }
        if elided > 1 {
            assertion_items.push(FormatItem::Item(format!("ELIDED ({})", elided)));
        } else if elided > 0 {
            assertion_items.push(FormatItem::Item("ELIDED".to_string()));
        }
        if encrypted > 1 {
            assertion_items.push(FormatItem::Item(format!("ENCRYPTED ({})", encrypted)));
        } else if encrypted > 0 {
            assertion_items.push(FormatItem::Item("ENCRYPTED".to_string()));
        }

        let mut joined = Vec::new();
        for (i, item) in assertion_items.into_iter().enumerate() {
            if i > 0 {
                joined.push(FormatItem::Separator);
            }
            joined.push(item);
        }

        let needs_braces = subject.is_subject_assertion();
        let mut items = Vec::new();
        if needs_braces {
            items.push(FormatItem::Begin("{".to_string()));
        }
        items.push(subject_item);
        if needs_braces {
            items.push(FormatItem::End("}".to_string()));
        }
        items.push(FormatItem::Begin("[".to_string()));
        items.extend(joined);
        items.push(FormatItem::End("]".to_string()));
        FormatItem::List(items)
    }
}

impl Assertion {
    fn format_item(&self, context: &FormatContext) -> FormatItem {
        FormatItem::List(vec![
            self.predicate().format_item(context),
            FormatItem::Item(": ".to_string()),
            self.object().format_item(context),
        ])
    }
}

impl std::fmt::Display for Envelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.format()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alice_knows_bob_formats_as_a_single_assertion() {
        let e = Envelope::from("Alice").add_assertion_with("knows", "Bob");
        assert_eq!(e.format_flat(), "\"Alice\" [ \"knows\": \"Bob\" ]");
    }

    #[test]
    fn wrapped_envelopes_use_braces() {
        let e = Envelope::from("Alice").wrap();
        assert_eq!(e.format_flat(), "{ \"Alice\" }");
    }

    #[test]
    fn multiple_assertions_are_comma_separated() {
        let e = Envelope::from("Alice")
            .add_assertion_with("knows", "Bob")
            .add_assertion_with("knows", "Carol");
        let flat = e.format_flat();
        assert!(flat.contains("\"knows\": \"Bob\""));
        assert!(flat.contains("\"knows\": \"Carol\""));
        assert!(flat.contains(","));
    }
}
