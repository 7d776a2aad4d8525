use itertools::{Itertools, repeat_n};

use crate::{
    automaton::{Language, Letter},
    error::AutomatonResult,
};

/// Enumerates every word over `alphabet` with at most `max_word_length`
/// letters, shortest first.
pub fn words_up_to<L: Letter>(alphabet: &[L], max_word_length: usize) -> impl Iterator<Item = Vec<L>> + '_ {
    (0..=max_word_length).flat_map(move |i| {
        repeat_n(alphabet, i)
            .multi_cartesian_product()
            .map(|word| word.into_iter().cloned().collect_vec())
    })
}

fn run_both<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    word: &[L],
) -> (bool, bool) {
    match (a.accepts(word), b.accepts(word)) {
        (Ok(x), Ok(y)) => (x, y),
        (Err(err), _) | (_, Err(err)) => {
            panic!("{:?} could not be decided: {}", word, err)
        }
    }
}

/// Checks if two automata accept the same language.
/// This is done by checking if the alphabets are the same and then checking if
/// the automata accept the same words up to a certain length.
pub fn same_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) -> AutomatonResult<bool> {
    // first we need to check if the alphabets are the same
    if a.alphabet() != b.alphabet() {
        return Ok(false);
    }

    for word in words_up_to(a.alphabet(), max_word_length) {
        if a.accepts(&word)? != b.accepts(&word)? {
            tracing::debug!("Languages differ on {:?}", word);
            return Ok(false);
        }
    }

    Ok(true)
}

pub fn assert_same_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) {
    assert_eq!(a.alphabet(), b.alphabet(), "Alphabets are not the same");

    for word in words_up_to(a.alphabet(), max_word_length) {
        match run_both(a, b, &word) {
            (true, false) => {
                panic!(
                    "{:?} is accepted by automaton `a` but not by automaton `b`. Thus their languages are not equal.",
                    word
                );
            }
            (false, true) => {
                panic!(
                    "{:?} is accepted by automaton `b` but not by automaton `a`. Thus their languages are not equal.",
                    word
                );
            }
            _ => {}
        }
    }
}

/// Assert that the language accepted by automaton `a` is the inverse of the
/// language accepted by automaton `b`. Meaning no word is accepted by both and
/// no word is accepted by none.
pub fn assert_inverse_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) {
    assert_eq!(a.alphabet(), b.alphabet(), "Alphabets are not the same");

    for word in words_up_to(a.alphabet(), max_word_length) {
        match run_both(a, b, &word) {
            (true, true) => {
                panic!(
                    "{:?} is accepted by automaton `a` and by automaton `b`. Thus their languages are not inverse.",
                    word
                );
            }
            (false, false) => {
                panic!(
                    "{:?} is accepted by neither automaton `a` nor automaton `b`. Thus their languages are not inverse.",
                    word
                );
            }
            _ => {}
        }
    }
}

/// Assert that the language accepted by automaton `a` is a subset of the
/// language accepted by automaton `b`.
pub fn assert_subset_language<L: Letter>(
    a: &impl Language<Letter = L>,
    b: &impl Language<Letter = L>,
    max_word_length: usize,
) {
    assert_eq!(a.alphabet(), b.alphabet(), "Alphabets are not the same");

    for word in words_up_to(a.alphabet(), max_word_length) {
        if let (true, false) = run_both(a, b, &word) {
            panic!(
                "{:?} is accepted by automaton `a` but not by automaton `b`. Thus the language of `a` is not a subset of `b`.",
                word
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_words_shortest_first() {
        let words = words_up_to(&['a', 'b'], 2).collect_vec();
        assert_eq!(words.len(), 7);
        assert_eq!(words[0], Vec::<char>::new());
        assert_eq!(words[1], vec!['a']);
        assert_eq!(words[6], vec!['b', 'b']);
    }
}
