use envelope_pattern::{Greediness, Matcher, Pattern, Quantifier};
use gordian_envelope::Envelope;

#[test]
fn and_requires_every_branch() {
    let e = Envelope::from(5);
    assert!(Pattern::and(vec![Pattern::number_any(), Pattern::number_greater_than(0.0)]).matches(&e));
    assert!(!Pattern::and(vec![Pattern::number_any(), Pattern::number_greater_than(10.0)]).matches(&e));
}

#[test]
fn or_matches_any_branch() {
    let e = Envelope::from("hi");
    assert!(Pattern::or(vec![Pattern::number_any(), Pattern::text_any()]).matches(&e));
    assert!(!Pattern::or(vec![Pattern::number_any(), Pattern::bool_any()]).matches(&e));
}

#[test]
fn not_inverts_its_argument() {
    let e = Envelope::from("hi");
    assert!(Pattern::not_matching(Pattern::number_any()).matches(&e));
    assert!(!Pattern::not_matching(Pattern::text_any()).matches(&e));
}

#[test]
fn search_finds_nested_object() {
    let e = Envelope::from("Alice").add_assertion_with("knows", "Bob");
    assert!(Pattern::search(Pattern::text("Bob")).matches(&e));
    assert!(!Pattern::search(Pattern::text("Carol")).matches(&e));
}

#[test]
fn traverse_chains_subject_then_predicate() {
    let e = Envelope::from("Alice").add_assertion_with("knows", "Bob").wrap();
    let pattern = Pattern::traverse(vec![
        Pattern::wrapped_unwrap(),
        Pattern::assertions_with_predicate(Pattern::text("knows")),
    ]);
    assert!(pattern.matches(&e));
}

#[test]
fn capture_records_the_matched_path() {
    let e = Envelope::from("Alice").add_assertion_with("knows", "Bob");
    let pattern = Pattern::search(Pattern::capture("target", Pattern::text("Bob")));
    let results = pattern.paths_with_captures(&e);
    assert!(!results.is_empty());
    let (_, caps) = &results[0];
    let found = caps.get("target").expect("capture present");
    assert_eq!(found[0].last().unwrap().clone(), Envelope::from("Bob"));
}

#[test]
fn repeat_unwraps_nested_wrapping() {
    let inner = Envelope::from("core");
    let triple = inner.clone().wrap().wrap().wrap();
    let pattern = Pattern::repeat(
        Pattern::wrapped_unwrap(),
        Quantifier::new(0, None, Greediness::Greedy),
    );
    let paths = pattern.paths(&triple);
    assert!(paths.iter().any(|p| *p.last().unwrap() == inner));
}

#[test]
fn zero_or_more_and_one_or_more_helpers() {
    let inner = Envelope::from("core");
    let wrapped = inner.clone().wrap();
    assert!(Pattern::zero_or_more(Pattern::wrapped_unwrap()).matches(&inner));
    assert!(!Pattern::one_or_more(Pattern::wrapped_unwrap()).matches(&inner));
    assert!(Pattern::one_or_more(Pattern::wrapped_unwrap()).matches(&wrapped));
}
