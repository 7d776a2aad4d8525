use std::{fmt::Debug, hash::Hash};

use itertools::{Either, Itertools};
use serde::Serialize;

use crate::error::AutomatonResult;

pub mod dfa;
pub mod index_map;
pub mod nfa;
pub mod node;
pub mod state_set;

/// A stable textual identity, used when states and symbols are handed to a
/// renderer or written into an interchange definition.
///
/// Labels are injective per type: two different values of the same type
/// never share a label. Composite labels (pairs, sets, [Either], [Option])
/// are self-delimiting, and plain labels nested inside them have the
/// delimiters `\ , ( ) { } *` escaped with a backslash.
pub trait Label {
    fn label(&self) -> String;

    /// The label as it is written inside a composite label.
    fn nested_label(&self) -> String {
        escape_label(&self.label())
    }
}

/// Escapes the characters that delimit composite labels.
pub fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        if matches!(c, '\\' | ',' | '(' | ')' | '{' | '}' | '*') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

macro_rules! impl_label_display {
    ($($t:ty),*) => {
        $(
            impl Label for $t {
                fn label(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

impl_label_display!(String, &str, char, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, bool);

impl Label for () {
    fn label(&self) -> String {
        "()".to_string()
    }

    fn nested_label(&self) -> String {
        self.label()
    }
}

impl<A: Label, B: Label> Label for (A, B) {
    fn label(&self) -> String {
        format!("({}, {})", self.0.nested_label(), self.1.nested_label())
    }

    fn nested_label(&self) -> String {
        self.label()
    }
}

/// `None` marks a state that was freshly introduced by a construction and is
/// labeled `*`.
impl<T: Label> Label for Option<T> {
    fn label(&self) -> String {
        match self {
            Some(t) => t.nested_label(),
            None => "*".to_string(),
        }
    }

    fn nested_label(&self) -> String {
        self.label()
    }
}

impl<A: Label, B: Label> Label for Either<A, B> {
    fn label(&self) -> String {
        match self {
            Either::Left(a) => format!("L({})", a.nested_label()),
            Either::Right(b) => format!("R({})", b.nested_label()),
        }
    }

    fn nested_label(&self) -> String {
        self.label()
    }
}

/// This trait represents types that can be used as state identities in an
/// automaton. The ordering is only used to build canonical state sets.
pub trait AutomatonNode: Debug + Clone + PartialEq + Eq + Hash + Ord + Label {}
impl<T> AutomatonNode for T where T: Debug + Clone + PartialEq + Eq + Hash + Ord + Label {}

/// This trait represents types that can be used as input symbols.
pub trait Letter: Debug + Clone + PartialEq + Eq + Hash + Ord + Label {}
impl<T> Letter for T where T: Debug + Clone + PartialEq + Eq + Hash + Ord + Label {}

/// Sorts and deduplicates an alphabet, so that alphabets compare by value.
pub fn canonical_alphabet<L: Letter>(alphabet: impl IntoIterator<Item = L>) -> Vec<L> {
    alphabet.into_iter().sorted().dedup().collect_vec()
}

pub trait Alphabet {
    type Letter: Letter;

    /// The alphabet, sorted and free of duplicates.
    fn alphabet(&self) -> &[Self::Letter];

    /// Returns the position of `letter` in the alphabet.
    fn letter_index(&self, letter: &Self::Letter) -> Option<usize> {
        self.alphabet().binary_search(letter).ok()
    }

    fn contains_letter(&self, letter: &Self::Letter) -> bool {
        self.letter_index(letter).is_some()
    }
}

/// Read access to the tuple (Q, Σ, δ, q0, F) shared by all automata.
pub trait Automaton: Alphabet {
    /// The state identity type.
    type State: AutomatonNode;

    /// Returns the number of states in the automaton.
    fn state_count(&self) -> usize;

    /// Returns an iterator over all states, in construction order.
    fn states(&self) -> impl Iterator<Item = &Self::State>;

    fn start(&self) -> &Self::State;

    /// Returns true if `state` is accepting. Unknown states are not
    /// accepting.
    fn is_accepting(&self, state: &Self::State) -> bool;

    fn accepting(&self) -> impl Iterator<Item = &Self::State> {
        self.states().filter(|state| self.is_accepting(state))
    }

    fn contains_state(&self, state: &Self::State) -> bool;

    fn state_label(&self, state: &Self::State) -> String {
        state.label()
    }
}

/// The basic trait for anything that defines a language over a set alphabet.
pub trait Language: Alphabet {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a Self::Letter>) -> AutomatonResult<bool>
    where
        Self::Letter: 'a;
}

/// Size statistics of an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutomatonStats {
    pub states: usize,
    pub accepting: usize,
    pub alphabet: usize,
    pub transitions: usize,
    pub epsilon_transitions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(("q0", 3u32).label(), "(q0, 3)");
        assert_eq!(Option::<&str>::None.label(), "*");
        assert_eq!(Either::<&str, &str>::Right("r").label(), "R(r)");
        assert_eq!(Some(Either::<&str, &str>::Left("q")).label(), "L(q)");
    }

    #[test]
    fn nested_labels_are_escaped() {
        assert_eq!("a, b".label(), "a, b");
        assert_eq!(("a, b", "c").label(), r"(a\, b, c)");
        assert_ne!(("a, b", "c").label(), ("a", "b, c").label());
        assert_eq!(Some("*").label(), r"\*");
        assert_ne!(Some("*").label(), Option::<&str>::None.label());
        assert_eq!(Some("new").label(), "new");
        assert_eq!(Either::<&str, &str>::Left(r"x\").label(), r"L(x\\)");
    }

    #[test]
    fn canonical_alphabet_sorts_and_dedups() {
        assert_eq!(canonical_alphabet(vec!['b', 'a', 'b']), vec!['a', 'b']);
    }
}
