use std::sync::Arc;

use unicode_normalization::UnicodeNormalization;

use crate::{
    map::Map,
    simple::Simple,
    tag::Tag,
    varint::{EncodeVarInt, MajorType},
};

/// A symbolic representation of a single dCBOR data item.
///
/// `CBOR` wraps a [`CBORCase`] in an `Arc` so that cloning — which
/// happens constantly while building up envelopes and patterns — is
/// O(1) and structure is shared rather than copied.
#[derive(Debug, Clone, Eq)]
pub struct CBOR(Arc<CBORCase>);

impl CBOR {
    pub fn as_case(&self) -> &CBORCase { &self.0 }

    pub fn into_case(self) -> CBORCase {
        match Arc::try_unwrap(self.0) {
            Ok(case) => case,
            Err(rc) => (*rc).clone(),
        }
    }
}

impl From<CBORCase> for CBOR {
    fn from(case: CBORCase) -> Self { Self(Arc::new(case)) }
}

/// The eight CBOR major types, exactly as defined by RFC 8949 and
/// narrowed by the dCBOR determinism rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CBORCase {
    Unsigned(u64),
    /// Actual value is `-1 - n`.
    Negative(u64),
    ByteString(Vec<u8>),
    Text(String),
    Array(Vec<CBOR>),
    Map(Map),
    Tagged(Tag, CBOR),
    Simple(Simple),
}

impl CBOR {
    pub fn to_cbor_data(&self) -> Vec<u8> {
        match self.as_case() {
            CBORCase::Unsigned(x) => x.encode_varint(MajorType::Unsigned),
            CBORCase::Negative(x) => x.encode_varint(MajorType::Negative),
            CBORCase::ByteString(x) => {
                let mut buf = x.len().encode_varint(MajorType::ByteString);
                buf.extend(x);
                buf
            }
            CBORCase::Text(x) => {
                let nfc = x.nfc().collect::<String>();
                let mut buf = nfc.len().encode_varint(MajorType::Text);
                buf.extend(nfc.as_bytes());
                buf
            }
            CBORCase::Array(x) => {
                let mut buf = x.len().encode_varint(MajorType::Array);
                for item in x {
                    buf.extend(item.to_cbor_data());
                }
                buf
            }
            CBORCase::Map(x) => x.cbor_data(),
            CBORCase::Tagged(tag, item) => {
                let mut buf = tag.value().encode_varint(MajorType::Tagged);
                buf.extend(item.to_cbor_data());
                buf
            }
            CBORCase::Simple(x) => x.cbor_data(),
        }
    }

    pub fn try_from_data(data: impl AsRef<[u8]>) -> crate::Result<CBOR> {
        crate::decode::decode_cbor(data.as_ref())
    }

    pub fn try_from_hex(hex: &str) -> crate::Result<CBOR> {
        let data = hex::decode(hex).map_err(|_| crate::Error::DecodeMalformed(0))?;
        Self::try_from_data(data)
    }

    pub fn to_hex(&self) -> String { hex::encode(self.to_cbor_data()) }

    pub fn is_unsigned(&self) -> bool {
        matches!(self.as_case(), CBORCase::Unsigned(_))
    }

    pub fn is_negative(&self) -> bool {
        matches!(self.as_case(), CBORCase::Negative(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self.as_case(),
            CBORCase::Unsigned(_) | CBORCase::Negative(_) | CBORCase::Simple(Simple::Float(_))
        )
    }

    pub fn is_text(&self) -> bool { matches!(self.as_case(), CBORCase::Text(_)) }

    pub fn is_byte_string(&self) -> bool {
        matches!(self.as_case(), CBORCase::ByteString(_))
    }

    pub fn is_array(&self) -> bool { matches!(self.as_case(), CBORCase::Array(_)) }

    pub fn is_map(&self) -> bool { matches!(self.as_case(), CBORCase::Map(_)) }

    pub fn is_tagged(&self) -> bool { matches!(self.as_case(), CBORCase::Tagged(..)) }

    pub fn is_null(&self) -> bool {
        matches!(self.as_case(), CBORCase::Simple(Simple::Null))
    }

    pub fn is_bool(&self) -> bool {
        matches!(self.as_case(), CBORCase::Simple(Simple::True | Simple::False))
    }

    pub fn is_nan(&self) -> bool {
        matches!(self.as_case(), CBORCase::Simple(Simple::Float(f)) if f.is_nan())
    }

    /// Returns this value's numeric content as `f64`, coercing
    /// unsigned/negative integers. Returns `None` for non-numeric
    /// cases.
    pub fn as_f64(&self) -> Option<f64> {
        match self.as_case() {
            CBORCase::Unsigned(x) => Some(*x as f64),
            CBORCase::Negative(x) => Some(-1.0 - (*x as f64)),
            CBORCase::Simple(Simple::Float(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self.as_case() {
            CBORCase::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_byte_string(&self) -> Option<&[u8]> {
        match self.as_case() {
            CBORCase::ByteString(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.as_case() {
            CBORCase::Simple(Simple::True) => Some(true),
            CBORCase::Simple(Simple::False) => Some(false),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[CBOR]> {
        match self.as_case() {
            CBORCase::Array(a) => Some(a.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self.as_case() {
            CBORCase::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_tagged(&self) -> Option<(&Tag, &CBOR)> {
        match self.as_case() {
            CBORCase::Tagged(tag, content) => Some((tag, content)),
            _ => None,
        }
    }

    pub fn null() -> Self { CBORCase::Simple(Simple::Null).into() }

    pub fn tagged(tag: impl Into<Tag>, content: impl Into<CBOR>) -> Self {
        CBORCase::Tagged(tag.into(), content.into()).into()
    }
}

impl PartialEq for CBOR {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_case(), other.as_case()) {
            (CBORCase::Unsigned(l), CBORCase::Unsigned(r)) => l == r,
            (CBORCase::Negative(l), CBORCase::Negative(r)) => l == r,
            (CBORCase::ByteString(l), CBORCase::ByteString(r)) => l == r,
            (CBORCase::Text(l), CBORCase::Text(r)) => l == r,
            (CBORCase::Array(l), CBORCase::Array(r)) => l == r,
            (CBORCase::Map(l), CBORCase::Map(r)) => l == r,
            (CBORCase::Tagged(lt, lc), CBORCase::Tagged(rt, rc)) => {
                lt == rt && lc == rc
            }
            (CBORCase::Simple(l), CBORCase::Simple(r)) => l == r,
            _ => false,
        }
    }
}

impl std::hash::Hash for CBOR {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.to_cbor_data().hash(state);
    }
}

impl Ord for CBOR {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_cbor_data().cmp(&other.to_cbor_data())
    }
}
impl PartialOrd for CBOR {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

fn format_string(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}

impl std::fmt::Display for CBOR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_case() {
            CBORCase::Unsigned(x) => write!(f, "{}", x),
            CBORCase::Negative(x) => write!(f, "{}", -1 - (*x as i128)),
            CBORCase::ByteString(x) => write!(f, "h'{}'", hex::encode(x)),
            CBORCase::Text(x) => write!(f, "{}", format_string(x)),
            CBORCase::Array(x) => {
                let parts: Vec<String> = x.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            CBORCase::Map(x) => {
                let parts: Vec<String> =
                    x.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
            CBORCase::Tagged(tag, item) => write!(f, "{}({})", tag, item),
            CBORCase::Simple(x) => write!(f, "{}", x),
        }
    }
}
