use chrono::{DateTime, TimeZone, Utc};

use crate::{cbor::{CBOR, CBORCase}, error::Error, simple::Simple};

/// CBOR tag 1 ("epoch-based date/time", RFC 8949 §3.4.2): a point in
/// time encoded as a number of seconds since the Unix epoch.
///
/// Whole-second values encode as an integer; sub-second values encode
/// as a float, subject to the same shortest-form float rule as any
/// other dCBOR float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(DateTime<Utc>);

pub const DATE_TAG: u64 = 1;

impl Date {
    pub fn from_timestamp(seconds: f64) -> Self {
        let secs = seconds.trunc() as i64;
        let nanos = ((seconds.fract()) * 1_000_000_000.0).round() as u32;
        Self(Utc.timestamp_opt(secs, nanos).single().unwrap_or_else(Utc::now))
    }

    pub fn timestamp(&self) -> f64 {
        self.0.timestamp() as f64 + (self.0.timestamp_subsec_nanos() as f64 / 1_000_000_000.0)
    }

    pub fn datetime(&self) -> DateTime<Utc> { self.0 }
}

impl From<DateTime<Utc>> for Date {
    fn from(value: DateTime<Utc>) -> Self { Self(value) }
}

impl From<Date> for CBOR {
    fn from(value: Date) -> Self {
        let ts = value.timestamp();
        let content: CBOR = if ts.fract() == 0.0 {
            (ts as i64).into()
        } else {
            ts.into()
        };
        CBOR::tagged(DATE_TAG, content)
    }
}

impl TryFrom<CBOR> for Date {
    type Error = Error;

    fn try_from(value: CBOR) -> Result<Self, Self::Error> {
        match value.as_case() {
            CBORCase::Tagged(tag, content) if tag.value() == DATE_TAG => {
                let seconds = match content.as_case() {
                    CBORCase::Unsigned(n) => *n as f64,
                    CBORCase::Negative(n) => -1.0 - (*n as f64),
                    CBORCase::Simple(Simple::Float(f)) => *f,
                    _ => {
                        return Err(Error::WrongCase {
                            expected: "date content (number)",
                            found: "other",
                        })
                    }
                };
                Ok(Date::from_timestamp(seconds))
            }
            _ => Err(Error::WrongCase { expected: "tag(1)", found: "other" }),
        }
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}
