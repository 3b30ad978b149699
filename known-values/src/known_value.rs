use std::fmt;

use dcbor::prelude::*;

/// CBOR tag under which a [`KnownValue`] is carried when it appears as
/// a standalone tagged item (e.g. outside an envelope's own `.known`
/// case, which encodes the bare unsigned integer untagged).
pub const KNOWN_VALUE_TAG: u64 = 40000;

#[derive(Clone, Debug)]
enum AssignedName {
    Static(&'static str),
    Owned(String),
}

/// A value in a namespace of unsigned integers, frequently used as
/// envelope predicates (`isA`, `note`, `hasRecipient`, ...) or markers.
///
/// Two known values are equal iff their raw `u64` values are equal;
/// the assigned name is display metadata only and never participates
/// in equality, hashing, or ordering.
#[derive(Clone, Debug)]
pub struct KnownValue {
    value: u64,
    assigned_name: Option<AssignedName>,
}

impl KnownValue {
    pub fn new(value: u64) -> Self { Self { value, assigned_name: None } }

    pub fn new_with_name(value: u64, name: impl Into<String>) -> Self {
        Self { value, assigned_name: Some(AssignedName::Owned(name.into())) }
    }

    pub const fn new_with_static_name(value: u64, name: &'static str) -> Self {
        Self { value, assigned_name: Some(AssignedName::Static(name)) }
    }

    pub fn value(&self) -> u64 { self.value }

    /// The human-readable name assigned at construction, if any.
    /// Defaults to the decimal value when unset -- use a
    /// [`crate::KnownValuesStore`] to resolve names for values that
    /// weren't constructed with one attached.
    pub fn name(&self) -> String {
        match &self.assigned_name {
            Some(AssignedName::Static(s)) => s.to_string(),
            Some(AssignedName::Owned(s)) => s.clone(),
            None => self.value.to_string(),
        }
    }

    pub fn assigned_name(&self) -> Option<&str> {
        match &self.assigned_name {
            Some(AssignedName::Static(s)) => Some(s),
            Some(AssignedName::Owned(s)) => Some(s.as_str()),
            None => None,
        }
    }
}

impl PartialEq for KnownValue {
    fn eq(&self, other: &Self) -> bool { self.value == other.value }
}
impl Eq for KnownValue {}

impl std::hash::Hash for KnownValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) { self.value.hash(state); }
}

impl PartialOrd for KnownValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> { Some(self.cmp(other)) }
}
impl Ord for KnownValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering { self.value.cmp(&other.value) }
}

impl fmt::Display for KnownValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.name()) }
}

impl From<u64> for KnownValue {
    fn from(value: u64) -> Self { KnownValue::new(value) }
}

impl From<KnownValue> for CBOR {
    /// A known value's envelope-case encoding is the bare unsigned
    /// integer -- see `Envelope::untagged_cbor`'s `KnownValue` arm in
    /// the `gordian-envelope` crate. This impl is for standalone use
    /// (outside an envelope), where it is wrapped under
    /// [`KNOWN_VALUE_TAG`].
    fn from(value: KnownValue) -> Self { CBOR::tagged(KNOWN_VALUE_TAG, value.value) }
}

impl TryFrom<CBOR> for KnownValue {
    type Error = dcbor::Error;

    fn try_from(value: CBOR) -> dcbor::Result<Self> {
        match value.as_case() {
            CBORCase::Tagged(tag, content) if tag.value() == KNOWN_VALUE_TAG => {
                let raw = u64::try_from(content.clone())?;
                Ok(KnownValue::new(raw))
            }
            CBORCase::Unsigned(raw) => Ok(KnownValue::new(*raw)),
            _ => Err(dcbor::Error::WrongCase { expected: "known value", found: "other" }),
        }
    }
}
