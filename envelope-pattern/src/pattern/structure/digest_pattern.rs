use gordian_envelope::{Digest, DigestProvider, Envelope};

use crate::pattern::{
    Compilable, Matcher, Path, Pattern, compile_as_atomic,
    structure::StructurePattern, vm::Instr,
};

/// Pattern for matching envelopes by their digest.
#[derive(Debug, Clone)]
pub enum DigestPattern {
    Digest(Digest),
    /// Matches the hexadecimal prefix of a digest (case insensitive).
    HexPrefix(String),
    BinaryRegex(regex::bytes::Regex),
}

impl PartialEq for DigestPattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DigestPattern::Digest(a), DigestPattern::Digest(b)) => a == b,
            (DigestPattern::HexPrefix(a), DigestPattern::HexPrefix(b)) => {
                a.eq_ignore_ascii_case(b)
            }
            (DigestPattern::BinaryRegex(a), DigestPattern::BinaryRegex(b)) => {
                a.as_str() == b.as_str()
            }
            _ => false,
        }
    }
}

impl Eq for DigestPattern {}

impl std::hash::Hash for DigestPattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            DigestPattern::Digest(d) => {
                0u8.hash(state);
                d.hash(state);
            }
            DigestPattern::HexPrefix(prefix) => {
                1u8.hash(state);
                prefix.to_lowercase().hash(state);
            }
            DigestPattern::BinaryRegex(regex) => {
                2u8.hash(state);
                regex.as_str().hash(state);
            }
        }
    }
}

impl DigestPattern {
    pub fn digest(digest: Digest) -> Self { DigestPattern::Digest(digest) }

    pub fn hex_prefix(prefix: impl Into<String>) -> Self {
        DigestPattern::HexPrefix(prefix.into())
    }

    pub fn binary_regex(regex: regex::bytes::Regex) -> Self {
        DigestPattern::BinaryRegex(regex)
    }
}

impl Matcher for DigestPattern {
    fn paths(&self, envelope: &Envelope) -> Vec<Path> {
        let digest = envelope.digest();
        let is_hit = match self {
            DigestPattern::Digest(want) => digest == *want,
            DigestPattern::HexPrefix(prefix) => {
                digest.to_hex().starts_with(&prefix.to_lowercase())
            }
            DigestPattern::BinaryRegex(regex) => regex.is_match(digest.as_bytes()),
        };

        if is_hit { vec![vec![envelope.clone()]] } else { vec![] }
    }
}

impl Compilable for DigestPattern {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>) {
        compile_as_atomic(
            &Pattern::Structure(StructurePattern::Digest(self.clone())),
            code,
            literals,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_by_digest_and_hex_prefix() {
        let e = Envelope::from("hello");
        let digest = e.digest();
        assert!(DigestPattern::digest(digest).matches(&e));
        let hex = digest.to_hex();
        assert!(DigestPattern::hex_prefix(&hex[..8]).matches(&e));
        assert!(!DigestPattern::hex_prefix("ffffffff").matches(&e));
    }
}
