use dcbor::Date;
use envelope_pattern::{Matcher, Pattern};
use gordian_envelope::Envelope;
use known_values::KnownValue;

#[test]
fn bool_pattern_distinguishes_true_false() {
    let t = Envelope::from(true);
    let f = Envelope::from(false);
    assert!(Pattern::bool_any().matches(&t));
    assert!(Pattern::bool_exact(true).matches(&t));
    assert!(!Pattern::bool_exact(false).matches(&t));
    assert!(Pattern::bool_exact(false).matches(&f));
}

#[test]
fn bool_pattern_ignores_assertions() {
    let e = Envelope::from(true).add_assertion_with("note", "extra");
    assert!(Pattern::bool_exact(true).matches(&e));
}

#[test]
fn number_pattern_range_and_comparisons() {
    let e = Envelope::from(42);
    assert!(Pattern::number_exact(42.0).matches(&e));
    assert!(!Pattern::number_exact(41.0).matches(&e));
    assert!(Pattern::number_range(0.0..=100.0).matches(&e));
    assert!(!Pattern::number_range(0.0..=10.0).matches(&e));
    assert!(Pattern::number_greater_than(10.0).matches(&e));
    assert!(!Pattern::number_greater_than(42.0).matches(&e));
    assert!(Pattern::number_greater_than_or_equal(42.0).matches(&e));
    assert!(Pattern::number_less_than(100.0).matches(&e));
    assert!(Pattern::number_less_than_or_equal(42.0).matches(&e));
}

#[test]
fn number_pattern_special_values() {
    assert!(Pattern::number_nan().matches(&Envelope::from(f64::NAN)));
    assert!(Pattern::number_infinity().matches(&Envelope::from(f64::INFINITY)));
    assert!(Pattern::number_negative_infinity().matches(&Envelope::from(f64::NEG_INFINITY)));
    assert!(!Pattern::number_nan().matches(&Envelope::from(1.0)));
}

#[test]
fn text_pattern_exact_and_regex() {
    let e = Envelope::from("Alice");
    assert!(Pattern::text_any().matches(&e));
    assert!(Pattern::text("Alice").matches(&e));
    assert!(!Pattern::text("Bob").matches(&e));
    let re = regex::Regex::new("^A.*e$").unwrap();
    assert!(Pattern::text_regex(re).matches(&e));
}

#[test]
fn byte_string_pattern_exact_and_regex() {
    let e = Envelope::new_leaf(dcbor::CBOR::from(vec![0xde, 0xad, 0xbe, 0xef]));
    assert!(Pattern::byte_string_any().matches(&e));
    assert!(Pattern::byte_string(vec![0xde, 0xad, 0xbe, 0xef]).matches(&e));
    assert!(!Pattern::byte_string(vec![0x00]).matches(&e));
    let re = regex::bytes::Regex::new("^\\xde\\xad").unwrap();
    assert!(Pattern::byte_string_regex(re).matches(&e));
}

#[test]
fn date_pattern_range_and_bounds() {
    let early = Date::from_timestamp(1_672_531_200.0); // 2023-01-01
    let mid = Date::from_timestamp(1_686_787_200.0); // 2023-06-15
    let late = Date::from_timestamp(1_703_980_800.0); // 2023-12-31
    let e = Envelope::new_leaf(dcbor::CBOR::from(mid));
    assert!(Pattern::date_any().matches(&e));
    assert!(Pattern::date(mid.clone()).matches(&e));
    assert!(Pattern::date_range(early.clone()..=late.clone()).matches(&e));
    assert!(Pattern::date_earliest(early).matches(&e));
    assert!(Pattern::date_latest(late).matches(&e));
}

#[test]
fn known_value_pattern_matches_by_name() {
    let note = KnownValue::new_with_name(1, "note");
    let e = Envelope::from(note.clone());
    assert!(Pattern::known_value_any().matches(&e));
    assert!(Pattern::known_value(note).matches(&e));
    assert!(Pattern::known_value_named("note").matches(&e));
    assert!(!Pattern::known_value_named("other").matches(&e));
}

#[test]
fn array_pattern_count_and_elements() {
    let cbor = dcbor::cbor_array(vec![dcbor::CBOR::from(1), dcbor::CBOR::from(2)]);
    let e = Envelope::new_leaf(cbor);
    assert!(Pattern::array_any().matches(&e));
    assert!(Pattern::array_count(2..=2).matches(&e));
    assert!(!Pattern::array_count(3..=3).matches(&e));
    assert!(
        Pattern::array_elements(vec![Pattern::number_exact(1.0), Pattern::number_exact(2.0)])
            .matches(&e)
    );
}

#[test]
fn map_pattern_count() {
    let mut map = dcbor::Map::new();
    map.insert(1, "a");
    map.insert(2, "b");
    let e = Envelope::new_leaf(dcbor::CBOR::from(map));
    assert!(Pattern::map_any().matches(&e));
    assert!(Pattern::map_count(2..=2).matches(&e));
    assert!(!Pattern::map_count(1..=1).matches(&e));
}

#[test]
fn null_pattern_matches_only_null() {
    let n = Envelope::new_leaf(dcbor::CBOR::null());
    let not_n = Envelope::from(1);
    assert!(Pattern::null().matches(&n));
    assert!(!Pattern::null().matches(&not_n));
}
