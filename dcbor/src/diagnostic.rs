use crate::{
    cbor::{CBOR, CBORCase},
    simple::Simple,
    tag::TagsStore,
};

/// Options controlling [`CBOR::diagnostic_opt`].
///
/// `summarize`, when set, truncates long byte/text strings and deep
/// containers so that large values produce a short human-readable
/// summary rather than the full reversible notation.
#[derive(Clone, Copy, Default)]
pub struct DiagOpts {
    pub summarize: bool,
}

const SUMMARIZE_STRING_LIMIT: usize = 16;
const SUMMARIZE_ITEM_LIMIT: usize = 8;

impl CBOR {
    /// Renders this value in CBOR diagnostic notation (RFC 8949 §8):
    /// a single-line, reversible textual form such as
    /// `[1, 2, {"k": h'ab'}]`.
    pub fn diagnostic(&self) -> String { self.diagnostic_opt(None, DiagOpts::default()) }

    /// As [`CBOR::diagnostic`], but truncating long strings and wide
    /// containers per [`DiagOpts::summarize`].
    pub fn diagnostic_summarized(&self) -> String {
        self.diagnostic_opt(None, DiagOpts { summarize: true })
    }

    pub fn diagnostic_annotated(&self, tags: &TagsStore) -> String {
        self.diagnostic_opt(Some(tags), DiagOpts::default())
    }

    pub fn diagnostic_opt(&self, tags: Option<&TagsStore>, opts: DiagOpts) -> String {
        let mut out = String::new();
        write_diagnostic(self, tags, opts, &mut out);
        out
    }
}

fn write_diagnostic(item: &CBOR, tags: Option<&TagsStore>, opts: DiagOpts, out: &mut String) {
    match item.as_case() {
        CBORCase::Unsigned(n) => out.push_str(&n.to_string()),
        CBORCase::Negative(n) => out.push_str(&(-1 - (*n as i128)).to_string()),
        CBORCase::ByteString(b) => {
            let hex = hex::encode(b);
            if opts.summarize && hex.len() > SUMMARIZE_STRING_LIMIT {
                out.push_str(&format!(
                    "h'{}...' ({} bytes)",
                    &hex[..SUMMARIZE_STRING_LIMIT],
                    b.len()
                ));
            } else {
                out.push_str("h'");
                out.push_str(&hex);
                out.push('\'');
            }
        }
        CBORCase::Text(s) => {
            if opts.summarize && s.chars().count() > SUMMARIZE_STRING_LIMIT {
                let truncated: String = s.chars().take(SUMMARIZE_STRING_LIMIT).collect();
                out.push_str(&format_string(&format!("{}...", truncated)));
            } else {
                out.push_str(&format_string(s));
            }
        }
        CBORCase::Array(items) => {
            out.push('[');
            let shown = if opts.summarize && items.len() > SUMMARIZE_ITEM_LIMIT {
                &items[..SUMMARIZE_ITEM_LIMIT]
            } else {
                items.as_slice()
            };
            for (i, item) in shown.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_diagnostic(item, tags, opts, out);
            }
            if shown.len() < items.len() {
                out.push_str(&format!(", ... ({} more)", items.len() - shown.len()));
            }
            out.push(']');
        }
        CBORCase::Map(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_diagnostic(k, tags, opts, out);
                out.push_str(": ");
                write_diagnostic(v, tags, opts, out);
            }
            out.push('}');
        }
        CBORCase::Tagged(tag, content) => {
            let name = tags.and_then(|t| t.name_for(tag.value()));
            match name {
                Some(name) => out.push_str(name),
                None => out.push_str(&tag.value().to_string()),
            }
            out.push('(');
            write_diagnostic(content, tags, opts, out);
            out.push(')');
            if let Some(tags) = tags {
                if let Some(summary) = tags.summarize(tag.value(), content) {
                    out.push_str("   ; ");
                    out.push_str(&summary);
                }
            }
        }
        CBORCase::Simple(s) => match s {
            Simple::False => out.push_str("false"),
            Simple::True => out.push_str("true"),
            Simple::Null => out.push_str("null"),
            Simple::Float(_) => out.push_str(&s.to_string()),
        },
    }
}

fn format_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use crate::{cbor_array, Map, CBOR};

    #[test]
    fn compact_single_line() {
        let mut map = Map::new();
        map.insert("k", CBOR::from(vec![0xabu8]));
        let value = cbor_array([CBOR::from(1u64), CBOR::from(2u64), CBOR::from(map)]);
        assert_eq!(value.diagnostic(), "[1, 2, {\"k\": h'ab'}]");
    }

    #[test]
    fn summarize_truncates_long_text() {
        let long = "x".repeat(40);
        let value: CBOR = long.clone().into();
        let summary = value.diagnostic_summarized();
        assert!(summary.len() < long.len());
        assert!(summary.contains("..."));
    }
}
