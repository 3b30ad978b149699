//! One-line summaries of leaf CBOR and of whole envelopes, used by both
//! [`super::notation`] and [`super::tree`].

use dcbor::prelude::*;

use super::FormatContext;

/// Implemented for anything that can render itself as a short,
/// single-line summary bounded by `max_length`.
pub trait EnvelopeSummary {
    fn envelope_summary(&self, max_length: usize, context: &FormatContext) -> String;
}

impl EnvelopeSummary for CBOR {
    fn envelope_summary(&self, max_length: usize, context: &FormatContext) -> String {
        match self.as_case() {
            CBORCase::Unsigned(n) => n.to_string(),
            CBORCase::Negative(n) => (-1 - *n as i128).to_string(),
            CBORCase::ByteString(data) => format!("Bytes({})", data.len()),
            CBORCase::Text(string) => {
                let truncated = if string.chars().count() > max_length {
                    format!("{}\u{2026}", string.chars().take(max_length).collect::<String>())
                } else {
                    string.clone()
                };
                format!("\"{}\"", truncated.replace('\n', "\\n"))
            }
            CBORCase::Simple(simple) => simple.to_string(),
            CBORCase::Array(_) | CBORCase::Map(_) | CBORCase::Tagged(_, _) => {
                let _ = max_length;
                self.diagnostic_opt(Some(context.tags()), dcbor::DiagOpts { summarize: true })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_text_is_truncated_with_an_ellipsis() {
        let ctx = FormatContext::default();
        let value = CBOR::from("a".repeat(200));
        let summary = value.envelope_summary(10, &ctx);
        assert!(summary.starts_with("\"aaaaaaaaaa"));
        assert!(summary.ends_with('\u{2026}"'));
    }

    #[test]
    fn numbers_summarize_as_their_decimal_value() {
        let ctx = FormatContext::default();
        assert_eq!(CBOR::from(42u64).envelope_summary(10, &ctx), "42");
    }
}
