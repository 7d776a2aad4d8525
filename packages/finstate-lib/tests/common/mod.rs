#![allow(dead_code)]

use finstate_lib::{
    automaton::{dfa::DFA, nfa::NFA},
    definition::AutomatonDefinition,
};

/// Splits a word into one symbol per character.
pub fn word(w: &str) -> Vec<String> {
    w.chars().map(|c| c.to_string()).collect()
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Builds a DFA over string states and symbols from a `(from, symbol, to)`
/// table.
pub fn dfa(
    states: &[&str],
    alphabet: &[&str],
    table: &[(&str, &str, &str)],
    start: &str,
    accepting: &[&str],
) -> DFA<String, String> {
    DFA::from_parts(
        strings(states),
        strings(alphabet),
        table
            .iter()
            .map(|(from, symbol, to)| (from.to_string(), symbol.to_string(), to.to_string())),
        start.to_string(),
        strings(accepting),
    )
    .unwrap()
}

/// Builds an NFA from a `(from, symbol, to)` table, where the symbol `""`
/// stands for ε.
pub fn nfa(
    states: &[&str],
    alphabet: &[&str],
    table: &[(&str, &str, &str)],
    start: &str,
    accepting: &[&str],
) -> NFA<String, String> {
    NFA::from_parts(
        strings(states),
        strings(alphabet),
        table.iter().map(|(from, symbol, to)| {
            let symbol = (!symbol.is_empty()).then(|| symbol.to_string());
            (from.to_string(), symbol, to.to_string())
        }),
        start.to_string(),
        strings(accepting),
    )
    .unwrap()
}

pub fn fixture(name: &str) -> AutomatonDefinition {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    AutomatonDefinition::from_file(path).unwrap()
}

/// Accepts words whose trailing run of 0s has even length, including words
/// without trailing 0s and the empty word.
pub fn even_trailing_zeros() -> DFA<String, String> {
    dfa(
        &["s", "e", "o"],
        &["0", "1"],
        &[
            ("s", "0", "o"),
            ("s", "1", "e"),
            ("e", "0", "o"),
            ("e", "1", "e"),
            ("o", "0", "e"),
            ("o", "1", "e"),
        ],
        "s",
        &["s", "e"],
    )
}

/// Accepts words with an even number of 1s.
pub fn even_ones() -> DFA<String, String> {
    dfa(
        &["q0", "q1"],
        &["0", "1"],
        &[
            ("q0", "0", "q0"),
            ("q0", "1", "q1"),
            ("q1", "0", "q1"),
            ("q1", "1", "q0"),
        ],
        "q0",
        &["q0"],
    )
}

/// Accepts words containing 100 or 101.
pub fn contains_100_or_101() -> DFA<String, String> {
    dfa(
        &["q", "q1", "q10", "q100", "q101"],
        &["0", "1"],
        &[
            ("q", "0", "q"),
            ("q", "1", "q1"),
            ("q1", "0", "q10"),
            ("q1", "1", "q1"),
            ("q10", "0", "q100"),
            ("q10", "1", "q101"),
            ("q100", "0", "q100"),
            ("q100", "1", "q100"),
            ("q101", "0", "q101"),
            ("q101", "1", "q101"),
        ],
        "q",
        &["q100", "q101"],
    )
}

/// Accepts nonempty words whose first and last symbol agree.
pub fn same_first_and_last() -> DFA<String, String> {
    dfa(
        &["q", "q0x", "q00", "q1x", "q11"],
        &["0", "1"],
        &[
            ("q", "0", "q00"),
            ("q", "1", "q11"),
            ("q00", "0", "q00"),
            ("q00", "1", "q0x"),
            ("q0x", "0", "q00"),
            ("q0x", "1", "q0x"),
            ("q11", "0", "q1x"),
            ("q11", "1", "q11"),
            ("q1x", "0", "q1x"),
            ("q1x", "1", "q11"),
        ],
        "q",
        &["q00", "q11"],
    )
}

/// Accepts words starting with 0.
pub fn starts_with_zero() -> DFA<String, String> {
    dfa(
        &["q", "q0", "q1"],
        &["0", "1"],
        &[
            ("q", "0", "q0"),
            ("q", "1", "q1"),
            ("q0", "0", "q0"),
            ("q0", "1", "q0"),
            ("q1", "0", "q1"),
            ("q1", "1", "q1"),
        ],
        "q",
        &["q0"],
    )
}

/// Accepts words ending with 0.
pub fn ends_with_zero() -> DFA<String, String> {
    dfa(
        &["r", "r0"],
        &["0", "1"],
        &[
            ("r", "0", "r0"),
            ("r", "1", "r"),
            ("r0", "0", "r0"),
            ("r0", "1", "r"),
        ],
        "r",
        &["r0"],
    )
}

/// Accepts words ending with 0 over the larger alphabet {0, 1, x}.
pub fn ends_with_zero_over_x() -> DFA<String, String> {
    dfa(
        &["r", "r0"],
        &["0", "1", "x"],
        &[
            ("r", "0", "r0"),
            ("r", "1", "r"),
            ("r", "x", "r"),
            ("r0", "0", "r0"),
            ("r0", "1", "r"),
            ("r0", "x", "r"),
        ],
        "r",
        &["r0"],
    )
}

/// Accepts words with a 1 in the third or second to last position. Equivalent
/// to [one_near_end_nfa].
pub fn one_near_end() -> DFA<String, String> {
    dfa(
        &["q000", "q001", "q011", "q111", "q110", "q100", "q101", "q010"],
        &["0", "1"],
        &[
            ("q000", "0", "q000"),
            ("q000", "1", "q001"),
            ("q001", "0", "q010"),
            ("q001", "1", "q011"),
            ("q011", "0", "q110"),
            ("q011", "1", "q111"),
            ("q111", "0", "q110"),
            ("q111", "1", "q111"),
            ("q110", "0", "q100"),
            ("q110", "1", "q101"),
            ("q100", "0", "q000"),
            ("q100", "1", "q001"),
            ("q101", "0", "q010"),
            ("q101", "1", "q011"),
            ("q010", "0", "q100"),
            ("q010", "1", "q101"),
        ],
        "q000",
        &["q010", "q011", "q100", "q101", "q111", "q110"],
    )
}

/// Accepts runs of 0s whose length is divisible by 2 or 3. Equivalent to
/// [zeros_divisible_nfa].
pub fn zeros_divisible() -> DFA<String, String> {
    dfa(
        &["q0", "q1", "q2", "q3", "q4", "q5"],
        &["0"],
        &[
            ("q0", "0", "q1"),
            ("q1", "0", "q2"),
            ("q2", "0", "q3"),
            ("q3", "0", "q4"),
            ("q4", "0", "q5"),
            ("q5", "0", "q0"),
        ],
        "q0",
        &["q0", "q2", "q3", "q4"],
    )
}

/// Accepts words containing 101 or 11.
pub fn contains_101_or_11_nfa() -> NFA<String, String> {
    nfa(
        &["q1", "q2", "q3", "q4"],
        &["0", "1"],
        &[
            ("q1", "0", "q1"),
            ("q1", "1", "q1"),
            ("q1", "1", "q2"),
            ("q2", "0", "q3"),
            ("q2", "", "q3"),
            ("q3", "1", "q4"),
            ("q4", "0", "q4"),
            ("q4", "1", "q4"),
        ],
        "q1",
        &["q4"],
    )
}

pub fn one_near_end_nfa() -> NFA<String, String> {
    nfa(
        &["q1", "q2", "q3", "q4"],
        &["0", "1"],
        &[
            ("q1", "0", "q1"),
            ("q1", "1", "q1"),
            ("q1", "1", "q2"),
            ("q2", "0", "q3"),
            ("q2", "1", "q3"),
            ("q2", "", "q3"),
            ("q3", "0", "q4"),
            ("q3", "1", "q4"),
        ],
        "q1",
        &["q4"],
    )
}

pub fn zeros_divisible_nfa() -> NFA<String, String> {
    nfa(
        &["s", "q0", "q1", "r0", "r1", "r2"],
        &["0"],
        &[
            ("s", "", "q0"),
            ("s", "", "r0"),
            ("q0", "0", "q1"),
            ("q1", "0", "q0"),
            ("r0", "0", "r1"),
            ("r1", "0", "r2"),
            ("r2", "0", "r0"),
        ],
        "s",
        &["q0", "r0"],
    )
}

/// Accepts the empty word, runs of 0s, words ending in 1 followed by at least
/// two 0s, and words ending in 11 followed by at least one 0.
pub fn zero_tails_nfa() -> NFA<String, String> {
    nfa(
        &["q", "r", "s"],
        &["0", "1"],
        &[
            ("q", "1", "r"),
            ("q", "", "s"),
            ("r", "0", "r"),
            ("r", "0", "s"),
            ("r", "1", "s"),
            ("s", "0", "q"),
        ],
        "q",
        &["q"],
    )
}
