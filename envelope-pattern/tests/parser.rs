use envelope_pattern::{Matcher, Pattern};
use gordian_envelope::Envelope;

#[test]
fn any_and_literals_round_trip() {
    assert!(Pattern::parse("*").unwrap().matches(&Envelope::from("x")));
    assert!(Pattern::parse("42").unwrap().matches(&Envelope::from(42)));
    assert!(Pattern::parse("\"Bob\"").unwrap().matches(&Envelope::from("Bob")));
}

#[test]
fn from_str_impl_works() {
    let pattern: Pattern = "true".parse().unwrap();
    assert!(pattern.matches(&Envelope::from(true)));
}

#[test]
fn number_range_and_comparisons() {
    let e = Envelope::from(7);
    assert!(Pattern::parse("1..10").unwrap().matches(&e));
    assert!(Pattern::parse(">=7").unwrap().matches(&e));
    assert!(!Pattern::parse(">7").unwrap().matches(&e));
}

#[test]
fn combinators_parse_with_expected_precedence() {
    let e = Envelope::from(5);
    // `&` binds tighter than `|`: this parses as `number | (bool & text)`.
    assert!(Pattern::parse("number | bool & text").unwrap().matches(&e));
    assert!(!Pattern::parse("bool & text | bool").unwrap().matches(&e));
}

#[test]
fn structural_keywords() {
    let e = Envelope::from("Alice").add_assertion_with("knows", "Bob");
    assert!(Pattern::parse("subj").unwrap().matches(&e));
    assert!(Pattern::parse("assert(\"knows\", \"Bob\")").unwrap().matches(&e));

    let assertion = gordian_envelope::Envelope::new_assertion(gordian_envelope::Assertion::new("knows", "Bob"));
    assert!(Pattern::parse("pred(\"knows\")").unwrap().matches(&assertion));
    assert!(Pattern::parse("obj(\"Bob\")").unwrap().matches(&assertion));
}

#[test]
fn wrapped_and_unwrap_forms() {
    let wrapped = Envelope::from("secret").wrap();
    assert!(Pattern::parse("wrapped").unwrap().matches(&wrapped));
    assert!(Pattern::parse("unwrap(\"secret\")").unwrap().matches(&wrapped));
}

#[test]
fn search_and_capture_compose() {
    let e = Envelope::from("Alice").add_assertion_with("knows", "Bob");
    assert!(Pattern::parse("search(@x(\"Bob\"))").unwrap().matches(&e));
}

#[test]
fn array_and_map_forms() {
    let array = Envelope::new_leaf(dcbor::cbor_array(vec![dcbor::CBOR::from(1), dcbor::CBOR::from(2)]));
    assert!(Pattern::parse("[*]").unwrap().matches(&array));
    assert!(Pattern::parse("[{2}]").unwrap().matches(&array));
    assert!(Pattern::parse("[42, 2]").is_err() || !Pattern::parse("[42, 2]").unwrap().matches(&array));
}

#[test]
fn invalid_syntax_reports_parse_error() {
    let err = Pattern::parse("number(").unwrap_err();
    assert!(matches!(err, envelope_pattern::Error::Parse { .. }));
}
