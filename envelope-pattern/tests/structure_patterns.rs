use envelope_pattern::{Matcher, Pattern};
use gordian_envelope::{Assertion, Envelope};

fn alice_knows_bob() -> Envelope {
    Envelope::from("Alice").add_assertion_with("knows", "Bob")
}

#[test]
fn subject_pattern_leaf_vs_node() {
    let leaf = Envelope::from("lonely");
    assert!(Pattern::subject_any().matches(&leaf));

    let node = alice_knows_bob();
    let paths = Pattern::subject_any().paths(&node);
    assert_eq!(paths.len(), 1);
    assert_eq!(*paths[0].last().unwrap(), node.subject());
}

#[test]
fn predicate_and_object_patterns() {
    // `predicate()`/`object()` only resolve on an envelope that is itself
    // an assertion, not on the node wrapping it.
    let e = Envelope::new_assertion(Assertion::new("knows", "Bob"));
    assert!(Pattern::predicate_any().matches(&e));
    assert!(Pattern::predicate(Pattern::text("knows")).matches(&e));
    assert!(!Pattern::predicate(Pattern::text("loves")).matches(&e));
    assert!(Pattern::object(Pattern::text("Bob")).matches(&e));
    assert!(!Pattern::object(Pattern::text("Carol")).matches(&e));
}

#[test]
fn assertions_pattern_variants() {
    let e = alice_knows_bob();
    assert!(Pattern::assertions_any().matches(&e));
    assert!(Pattern::assertions_with_predicate(Pattern::text("knows")).matches(&e));
    assert!(Pattern::assertions_with_object(Pattern::text("Bob")).matches(&e));
    assert!(
        Pattern::assertions_with_both(Pattern::text("knows"), Pattern::text("Bob")).matches(&e)
    );
    assert!(
        !Pattern::assertions_with_both(Pattern::text("knows"), Pattern::text("Carol")).matches(&e)
    );
}

#[test]
fn node_pattern_assertion_count() {
    let single = alice_knows_bob();
    let double = single.clone().add_assertion_with("age", 30);
    assert!(Pattern::node_any().matches(&double));
    assert!(Pattern::node_assertions_count(1).matches(&single));
    assert!(Pattern::node_assertions_count(2).matches(&double));
    assert!(!Pattern::node_assertions_count(2).matches(&single));
}

#[test]
fn wrapped_pattern_any_and_unwrap() {
    let inner = Envelope::from("secret");
    let wrapped = inner.wrap();
    assert!(!Pattern::wrapped_any().matches(&inner));
    assert!(Pattern::wrapped_any().matches(&wrapped));
    assert!(Pattern::traverse(vec![Pattern::wrapped_unwrap(), Pattern::text("secret")]).matches(&wrapped));
}

#[test]
fn obscured_pattern_variants() {
    let e = Envelope::from("visible");
    let elided = e.elide();
    assert!(!Pattern::obscured_any().matches(&e));
    assert!(Pattern::obscured_any().matches(&elided));
    assert!(Pattern::elided().matches(&elided));
    assert!(!Pattern::encrypted().matches(&elided));
    assert!(!Pattern::compressed().matches(&elided));
}

#[test]
fn digest_pattern_exact_and_prefix() {
    let e = Envelope::from("Alice");
    let digest = gordian_envelope::DigestProvider::digest(&e);
    assert!(Pattern::digest(digest.clone()).matches(&e));
    let hex = digest.to_hex();
    assert!(Pattern::digest_hex_prefix(hex[..8].to_string()).matches(&e));
    assert!(!Pattern::digest_hex_prefix("ffffffff".to_string()).matches(&e));
}

#[test]
fn new_assertion_constructs_node() {
    let e = Envelope::new_assertion(Assertion::new("knows", "Bob")).wrap();
    assert!(Pattern::wrapped_any().matches(&e));
}
