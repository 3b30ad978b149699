use std::collections::HashMap;

use crate::KnownValue;

/// An explicit, caller-owned registry mapping known-value names to
/// their raw values and back.
///
/// Per the design note on process-wide registries, this is never a
/// global static: a [`KnownValuesStore`] is constructed once (typically
/// via [`KnownValuesStore::standard`]) and threaded explicitly to
/// whichever display/pattern-matching call needs to resolve a name.
#[derive(Clone, Debug, Default)]
pub struct KnownValuesStore {
    by_value: HashMap<u64, KnownValue>,
    by_name: HashMap<String, KnownValue>,
}

impl KnownValuesStore {
    pub fn new(known_values: impl IntoIterator<Item = KnownValue>) -> Self {
        let mut store = Self::default();
        for kv in known_values {
            store.insert(kv);
        }
        store
    }

    /// The registry's well-known predicates and markers, per the
    /// Blockchain Commons Known Value registry (bcr-2023-002).
    pub fn standard() -> Self { Self::new(crate::registry::ALL.iter().cloned()) }

    pub fn insert(&mut self, known_value: KnownValue) {
        self.by_value.insert(known_value.value(), known_value.clone());
        if let Some(name) = known_value.assigned_name() {
            self.by_name.insert(name.to_string(), known_value);
        }
    }

    pub fn assigned_name(&self, known_value: &KnownValue) -> Option<&str> {
        self.by_value.get(&known_value.value()).and_then(|kv| kv.assigned_name())
    }

    /// The display name for `known_value`: the registered name if one
    /// is bound, else the decimal value.
    pub fn name(&self, known_value: &KnownValue) -> String {
        self.assigned_name(known_value).map(str::to_string).unwrap_or_else(|| known_value.name())
    }

    pub fn known_value_named(&self, name: &str) -> Option<&KnownValue> { self.by_name.get(name) }

    pub fn known_value_for_raw_value(&self, raw_value: u64) -> KnownValue {
        self.by_value.get(&raw_value).cloned().unwrap_or_else(|| KnownValue::new(raw_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_store_resolves_is_a() {
        let store = KnownValuesStore::standard();
        let is_a = store.known_value_named("isA").unwrap();
        assert_eq!(is_a.value(), 1);
        assert_eq!(store.name(is_a), "isA");
    }

    #[test]
    fn unregistered_value_falls_back_to_decimal() {
        let store = KnownValuesStore::standard();
        let unregistered = KnownValue::new(999_999);
        assert_eq!(store.name(&unregistered), "999999");
    }
}
