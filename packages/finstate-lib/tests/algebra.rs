mod common;

use common::*;
use finstate_lib::{
    automaton::{Alphabet, Automaton, Language, dfa::DFA},
    config::{AlgebraConfig, AlphabetPolicy},
    error::AutomatonError,
    validation::same_language::{
        assert_inverse_language, assert_same_language, assert_subset_language, words_up_to,
    },
};
use itertools::Itertools;

fn samples() -> Vec<DFA<String, String>> {
    vec![
        even_trailing_zeros(),
        even_ones(),
        contains_100_or_101(),
        same_first_and_last(),
        starts_with_zero(),
        ends_with_zero(),
        one_near_end(),
    ]
}

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

/// Checks `product` against `op` applied to the verdicts of `a` and `b` on
/// all short words.
fn assert_combines<F>(
    a: &DFA<String, String>,
    b: &DFA<String, String>,
    product: &impl Language<Letter = String>,
    op: F,
) where
    F: Fn(bool, bool) -> bool,
{
    for w in words_up_to(product.alphabet(), 7) {
        assert_eq!(
            product.accepts(&w).unwrap(),
            op(a.accepts(&w).unwrap(), b.accepts(&w).unwrap()),
            "{:?}",
            w
        );
    }
}

#[test]
fn test_intersect_starts_and_ends_with_zero() {
    let a = starts_with_zero();
    let b = ends_with_zero();
    let product = a.intersect(&b).unwrap();

    assert_eq!(product.state_count(), 6);
    assert_eq!(*product.start(), pair("q", "r"));
    assert_eq!(product.states().next(), Some(&pair("q", "r")));
    assert!(product.is_accepting(&pair("q0", "r0")));
    assert!(!product.is_accepting(&pair("q0", "r")));

    assert!(product.accepts(&word("0")).unwrap());
    assert!(product.accepts(&word("000")).unwrap());
    assert!(product.accepts(&word("0110")).unwrap());
    assert!(!product.accepts(&word("001")).unwrap());
    assert!(!product.accepts(&word("100")).unwrap());
    assert!(!product.accepts(&word("")).unwrap());
}

#[test]
fn test_products_match_boolean_combinations() {
    let samples = samples();

    for (a, b) in samples.iter().tuple_combinations() {
        assert_combines(a, b, &a.intersect(b).unwrap(), |x, y| x && y);
        assert_combines(a, b, &a.union(b).unwrap(), |x, y| x || y);
        assert_combines(a, b, &a.difference(b).unwrap(), |x, y| x && !y);
        assert_combines(a, b, &b.difference(a).unwrap(), |x, y| y && !x);
    }
}

#[test]
fn test_complement() {
    for dfa in samples() {
        let complement = dfa.complement();

        assert_eq!(complement.state_count(), dfa.state_count());
        assert_inverse_language(&dfa, &complement, 7);
        assert_same_language(&dfa, &complement.complement(), 7);
    }
}

#[test]
fn test_product_with_other_state_type() {
    let a = even_ones();
    let b = one_near_end_nfa().determinize().unwrap();
    let product = a.intersect(&b).unwrap();

    for w in words_up_to(a.alphabet(), 7) {
        assert_eq!(
            product.accepts(&w).unwrap(),
            a.accepts(&w).unwrap() && one_near_end().accepts(&w).unwrap()
        );
    }
}

#[test]
fn test_prune_drops_unreachable_pairs() {
    let a = starts_with_zero();
    let b = ends_with_zero();

    let full = a.intersect(&b).unwrap();
    let pruned = a
        .intersect_with(&b, &AlgebraConfig::default().with_prune(true))
        .unwrap();

    assert!(full.contains_state(&pair("q", "r0")));
    assert!(!pruned.contains_state(&pair("q", "r0")));
    assert_eq!(pruned.state_count(), 5);
    assert_same_language(&full, &pruned, 8);
}

#[test]
fn test_strict_policy_rejects_different_alphabets() {
    let strict = AlgebraConfig::default().with_alphabet_policy(AlphabetPolicy::Strict);
    let a = starts_with_zero();
    let b = ends_with_zero_over_x();

    assert!(matches!(
        a.intersect_with(&b, &strict),
        Err(AutomatonError::AlphabetMismatch { .. })
    ));
    assert!(matches!(
        a.union_with(&b, &strict),
        Err(AutomatonError::AlphabetMismatch { .. })
    ));
    assert!(matches!(
        a.difference_with(&b, &strict),
        Err(AutomatonError::AlphabetMismatch { .. })
    ));
    assert!(a.intersect_with(&ends_with_zero(), &strict).is_ok());
}

#[test]
fn test_reconcile_intersection_uses_common_letters() {
    let product = starts_with_zero()
        .intersect(&ends_with_zero_over_x())
        .unwrap();

    assert_eq!(product.alphabet(), &strings(&["0", "1"]));
    assert!(product.accepts(&word("010")).unwrap());
    assert!(!product.accepts(&word("01")).unwrap());
    assert!(matches!(
        product.accepts(&word("0x0")),
        Err(AutomatonError::UnknownSymbol { .. })
    ));
}

#[test]
fn test_reconcile_intersection_needs_common_letters() {
    let letters = dfa(&["p"], &["a", "b"], &[("p", "a", "p"), ("p", "b", "p")], "p", &["p"]);

    assert!(matches!(
        starts_with_zero().intersect(&letters),
        Err(AutomatonError::AlphabetMismatch { .. })
    ));
    assert!(matches!(
        starts_with_zero().difference(&letters),
        Err(AutomatonError::AlphabetMismatch { .. })
    ));
}

#[test]
fn test_reconcile_union_loops_on_foreign_letters() {
    let union = starts_with_zero()
        .union(&ends_with_zero_over_x())
        .unwrap();

    assert_eq!(union.alphabet(), &strings(&["0", "1", "x"]));
    for (w, expected) in [
        ("0", true),
        ("x0", true),
        ("01x", true),
        ("1x0", true),
        ("x1", false),
        ("1x", false),
        ("", false),
    ] {
        assert_eq!(union.accepts(&word(w)).unwrap(), expected, "{:?}", w);
    }
}

#[test]
fn test_is_subset_of() {
    let both = starts_with_zero().intersect(&ends_with_zero()).unwrap();

    assert!(both.is_subset_of(&starts_with_zero()).unwrap());
    assert!(both.is_subset_of(&ends_with_zero()).unwrap());
    assert!(!starts_with_zero().is_subset_of(&both).unwrap());
    assert!(!even_ones().is_subset_of(&starts_with_zero()).unwrap());
    assert_subset_language(&both, &starts_with_zero(), 7);

    assert!(matches!(
        ends_with_zero().is_subset_of(&ends_with_zero_over_x()),
        Err(AutomatonError::AlphabetMismatch { .. })
    ));
}

#[test]
fn test_is_equivalent() {
    // contains 10 followed by one more letter
    let contains_10x = dfa(
        &["a", "b", "c", "d"],
        &["0", "1"],
        &[
            ("a", "0", "a"),
            ("a", "1", "b"),
            ("b", "0", "c"),
            ("b", "1", "b"),
            ("c", "0", "d"),
            ("c", "1", "d"),
            ("d", "0", "d"),
            ("d", "1", "d"),
        ],
        "a",
        &["d"],
    );

    assert!(contains_100_or_101().is_equivalent(&contains_10x).unwrap());
    assert!(
        one_near_end()
            .is_equivalent(&one_near_end_nfa().determinize().unwrap())
            .unwrap()
    );
    assert!(!even_ones().is_equivalent(&even_trailing_zeros()).unwrap());
}
