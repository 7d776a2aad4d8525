mod common;

use common::*;
use finstate_lib::{
    automaton::{Automaton, dfa::DFA, state_set::StateSet},
    config::{MinimizationAlgorithm, MinimizationConfig},
    validation::same_language::assert_same_language,
};

fn hopcroft() -> MinimizationConfig {
    MinimizationConfig::default().with_algorithm(MinimizationAlgorithm::Hopcroft)
}

fn samples() -> Vec<DFA<String, String>> {
    vec![
        even_trailing_zeros(),
        even_ones(),
        contains_100_or_101(),
        same_first_and_last(),
        starts_with_zero(),
        ends_with_zero(),
        ends_with_zero_over_x(),
        one_near_end(),
        zeros_divisible(),
    ]
}

#[test]
fn test_minimize_merges_equivalent_states() {
    let dfa = even_trailing_zeros();
    let minimized = dfa.minimize();

    assert_eq!(minimized.state_count(), 2);
    assert_eq!(*minimized.start(), StateSet::new(strings(&["s", "e"])));
    assert!(minimized.contains_state(&StateSet::singleton("o".to_string())));
    assert_same_language(&dfa, &minimized, 8);
}

#[test]
fn test_minimize_state_counts() {
    for (dfa, expected) in [
        (even_ones(), 2),
        (contains_100_or_101(), 4),
        (same_first_and_last(), 5),
        (starts_with_zero(), 3),
        (ends_with_zero(), 2),
        (zeros_divisible(), 6),
    ] {
        assert_eq!(dfa.minimize().state_count(), expected, "{:?}", dfa);
    }
}

#[test]
fn test_minimize_drops_unreachable_states() {
    let dfa = dfa(
        &["q0", "q1", "u", "v"],
        &["0", "1"],
        &[
            ("q0", "0", "q0"),
            ("q0", "1", "q1"),
            ("q1", "0", "q1"),
            ("q1", "1", "q0"),
            ("u", "0", "v"),
            ("u", "1", "q0"),
            ("v", "0", "u"),
            ("v", "1", "v"),
        ],
        "q0",
        &["q0", "u"],
    );
    let minimized = dfa.minimize();

    assert_eq!(minimized.state_count(), 2);
    assert!(minimized.state_count() < dfa.state_count());
    assert!(
        minimized
            .states()
            .all(|class| !class.contains(&"u".to_string()) && !class.contains(&"v".to_string()))
    );
    assert_same_language(&dfa, &minimized, 8);
}

#[test]
fn test_minimize_is_idempotent() {
    for dfa in samples() {
        let once = dfa.minimize();
        let twice = once.minimize();

        assert_eq!(once.state_count(), twice.state_count());
        assert_same_language(&once, &twice, 7);
    }
}

#[test]
fn test_minimize_keeps_language() {
    for dfa in samples() {
        assert_same_language(&dfa, &dfa.minimize(), 7);
        assert_same_language(&dfa, &dfa.minimize_with(&hopcroft()), 7);
    }
}

#[test]
fn test_hopcroft_matches_table_filling() {
    for dfa in samples() {
        assert_eq!(
            dfa.minimize().to_definition(),
            dfa.minimize_with(&hopcroft()).to_definition()
        );
    }
}

#[test]
fn test_minimize_determinized_nfa() {
    let nfa = zeros_divisible_nfa();
    let minimized = nfa.determinize().unwrap().minimize();

    assert_eq!(minimized.state_count(), zeros_divisible().minimize().state_count());
    assert!(minimized.is_equivalent(&zeros_divisible()).unwrap());
    assert_same_language(&nfa, &minimized, 13);
}

#[test]
fn test_minimize_empty_language() {
    let dfa = dfa(
        &["a", "b"],
        &["0", "1"],
        &[("a", "0", "b"), ("a", "1", "a"), ("b", "0", "a"), ("b", "1", "b")],
        "a",
        &[],
    );
    let minimized = dfa.minimize();

    assert_eq!(minimized.state_count(), 1);
    assert!(minimized.is_language_empty());
    assert_eq!(*minimized.start(), StateSet::new(strings(&["a", "b"])));
}
