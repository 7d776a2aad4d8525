use std::fmt::Debug;

use itertools::Itertools;

use crate::automaton::{AutomatonNode, Label};

/// An immutable set of states, used as the state identity of automata built
/// by subset construction and minimization.
///
/// The elements are kept sorted and free of duplicates, so two sets built
/// from the same states in any order are equal and hash the same.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet<N: AutomatonNode> {
    states: Vec<N>,
}

impl<N: AutomatonNode> StateSet<N> {
    pub fn new(states: impl IntoIterator<Item = N>) -> Self {
        StateSet {
            states: states.into_iter().sorted().dedup().collect_vec(),
        }
    }

    pub fn empty() -> Self {
        StateSet { states: vec![] }
    }

    pub fn singleton(state: N) -> Self {
        StateSet {
            states: vec![state],
        }
    }

    pub fn contains(&self, state: &N) -> bool {
        self.states.binary_search(state).is_ok()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.states.iter()
    }

    pub fn as_slice(&self) -> &[N] {
        &self.states
    }

    pub fn union(&self, other: &StateSet<N>) -> StateSet<N> {
        StateSet::new(self.iter().chain(other.iter()).cloned())
    }

    pub fn intersects(&self, other: &StateSet<N>) -> bool {
        self.iter().any(|state| other.contains(state))
    }
}

impl<N: AutomatonNode> FromIterator<N> for StateSet<N> {
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        StateSet::new(iter)
    }
}

impl<'a, N: AutomatonNode> IntoIterator for &'a StateSet<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: AutomatonNode> IntoIterator for StateSet<N> {
    type Item = N;
    type IntoIter = std::vec::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.into_iter()
    }
}

impl<N: AutomatonNode> Debug for StateSet<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.states.iter()).finish()
    }
}

impl<N: AutomatonNode> Label for StateSet<N> {
    fn label(&self) -> String {
        format!("{{{}}}", self.states.iter().map(Label::nested_label).join(", "))
    }

    fn nested_label(&self) -> String {
        self.label()
    }
}
