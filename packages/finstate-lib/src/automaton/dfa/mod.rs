use std::{collections::VecDeque, fmt::Debug};

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    graph::{DiGraph, NodeIndex, NodeIndices},
    visit::EdgeRef,
};

use crate::{
    automaton::{
        Alphabet, Automaton, AutomatonNode, AutomatonStats, Language, Letter,
        index_map::{IndexMap, IndexSet},
        nfa::{NFA, NFAEdge},
        node::StateNode,
    },
    config::{AlgebraConfig, AlphabetPolicy},
    error::{AutomatonError, AutomatonResult},
};

pub mod builder;
pub mod minimization;
pub mod product;
pub mod reachability;

pub use builder::DFABuilder;

/// A deterministic finite automaton with a total transition function.
///
/// Values of this type can only be obtained through [DFABuilder],
/// [DFA::from_parts], or an operation on another automaton, all of which
/// establish that every state has exactly one successor for every letter.
/// A DFA is never modified after construction.
#[derive(Clone)]
pub struct DFA<N: AutomatonNode, L: Letter> {
    graph: DiGraph<StateNode<N>, L>,
    start: NodeIndex,
    alphabet: Vec<L>,
    lookup: HashMap<N, NodeIndex>,
    /// Row-major transition table, `delta[state * |Σ| + letter]`.
    delta: Vec<NodeIndex>,
}

impl<N: AutomatonNode, L: Letter> DFA<N, L> {
    /// Creates a builder over the given alphabet.
    pub fn builder(alphabet: impl IntoIterator<Item = L>) -> DFABuilder<N, L> {
        DFABuilder::new(alphabet)
    }

    /// Builds a DFA from the tuple (Q, Σ, δ, q0, F), validating that δ is
    /// total over Q×Σ.
    pub fn from_parts(
        states: impl IntoIterator<Item = N>,
        alphabet: impl IntoIterator<Item = L>,
        transitions: impl IntoIterator<Item = (N, L, N)>,
        start: N,
        accepting: impl IntoIterator<Item = N>,
    ) -> AutomatonResult<Self> {
        let mut builder = DFABuilder::new(alphabet);
        for state in states {
            builder.add_state(StateNode::non_accepting(state));
        }
        for state in accepting {
            builder.mark_accepting(state);
        }
        for (from, letter, to) in transitions {
            builder.add_transition(from, letter, to);
        }
        builder.set_start(start);

        builder.build()
    }

    /// Assembles a DFA from a complete transition table. The alphabet must be
    /// canonical and `delta` must hold `nodes.len() * alphabet.len()` entries
    /// indexing into `nodes`.
    pub(crate) fn from_table(
        alphabet: Vec<L>,
        nodes: Vec<StateNode<N>>,
        delta: Vec<usize>,
        start: usize,
    ) -> Self {
        assert_eq!(
            delta.len(),
            nodes.len() * alphabet.len(),
            "Transition table must have one entry per state and letter"
        );
        assert!(start < nodes.len(), "Start state must be part of the table");

        let mut graph = DiGraph::with_capacity(nodes.len(), delta.len());
        let mut lookup = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let data = node.data.clone();
            let index = graph.add_node(node);
            let previous = lookup.insert(data, index);
            assert!(
                previous.is_none(),
                "State identities must be unique within a DFA"
            );
        }

        let delta = delta.into_iter().map(NodeIndex::new).collect_vec();
        let width = alphabet.len();
        for (slot, target) in delta.iter().enumerate() {
            let source = NodeIndex::new(slot / width);
            graph.add_edge(source, *target, alphabet[slot % width].clone());
        }

        DFA {
            graph,
            start: NodeIndex::new(start),
            alphabet,
            lookup,
            delta,
        }
    }

    pub(crate) fn node(&self, index: NodeIndex) -> &StateNode<N> {
        &self.graph[index]
    }

    pub(crate) fn start_index(&self) -> NodeIndex {
        self.start
    }

    pub(crate) fn index_of(&self, state: &N) -> Option<NodeIndex> {
        self.lookup.get(state).copied()
    }

    pub(crate) fn node_indices(&self) -> NodeIndices {
        self.graph.node_indices()
    }

    /// The successor of `state` on the letter at position `letter`.
    pub(crate) fn step(&self, state: NodeIndex, letter: usize) -> NodeIndex {
        self.delta[state.index() * self.alphabet.len() + letter]
    }

    /// Clones the node list, in index order.
    pub(crate) fn nodes(&self) -> Vec<StateNode<N>> {
        self.graph.node_weights().cloned().collect_vec()
    }

    /// The transition table as plain indices, in the layout expected by
    /// [DFA::from_table].
    pub(crate) fn raw_delta(&self) -> Vec<usize> {
        self.delta.iter().map(|index| index.index()).collect_vec()
    }

    /// Returns the successor of `state` on `letter`.
    pub fn successor(&self, state: &N, letter: &L) -> AutomatonResult<&N> {
        let index = self
            .index_of(state)
            .ok_or_else(|| AutomatonError::unknown_state(state))?;
        let letter = self
            .letter_index(letter)
            .ok_or_else(|| AutomatonError::unknown_symbol(letter))?;

        Ok(&self.graph[self.step(index, letter)].data)
    }

    /// Iterates over all transitions as `(state, letter, successor)` triples,
    /// ordered by state and then by letter.
    pub fn transitions(&self) -> impl Iterator<Item = (&N, &L, &N)> {
        let width = self.alphabet.len();
        self.delta.iter().enumerate().map(move |(slot, target)| {
            (
                &self.graph[NodeIndex::new(slot / width)].data,
                &self.alphabet[slot % width],
                &self.graph[*target].data,
            )
        })
    }

    /// Returns the accepting flag of a state, or an error for unknown states.
    pub fn try_is_accepting(&self, state: &N) -> AutomatonResult<bool> {
        self.index_of(state)
            .map(|index| self.graph[index].accepting)
            .ok_or_else(|| AutomatonError::unknown_state(state))
    }

    /// Creates the complement DFA over the same alphabet, where exactly the
    /// previously rejecting states accept.
    pub fn complement(&self) -> DFA<N, L> {
        let nodes = self.graph.node_weights().map(StateNode::invert).collect_vec();

        DFA::from_table(
            self.alphabet.clone(),
            nodes,
            self.raw_delta(),
            self.start.index(),
        )
    }

    /// Extends the DFA to a larger alphabet. Every state loops to itself on
    /// the letters it did not know before, so the extended DFA ignores them.
    pub fn extend_alphabet(&self, alphabet: impl IntoIterator<Item = L>) -> DFA<N, L> {
        let extended = crate::automaton::canonical_alphabet(
            alphabet.into_iter().chain(self.alphabet.iter().cloned()),
        );

        let mut delta = Vec::with_capacity(self.state_count() * extended.len());
        for state in self.graph.node_indices() {
            for letter in &extended {
                let target = match self.letter_index(letter) {
                    Some(l) => self.step(state, l),
                    None => state,
                };
                delta.push(target.index());
            }
        }

        DFA::from_table(extended, self.nodes(), delta, self.start.index())
    }

    /// Views this DFA as an NFA without epsilon transitions.
    pub fn to_nfa(&self) -> NFA<N, L> {
        let edges = self
            .graph
            .edge_references()
            .map(|edge| {
                (
                    edge.source().index(),
                    NFAEdge::Symbol(edge.weight().clone()),
                    edge.target().index(),
                )
            })
            .collect_vec();

        NFA::from_graph_parts(
            self.alphabet.clone(),
            self.nodes(),
            edges,
            self.start.index(),
        )
    }

    /// Renames the states to `0..n`. States reachable from the start are
    /// numbered in breadth-first order, following letters in alphabet order;
    /// unreachable states follow in their original order.
    pub fn relabel(&self) -> DFA<usize, L> {
        let mut order = Vec::with_capacity(self.state_count());
        let mut visited = IndexSet::new(self.state_count());
        let mut queue = VecDeque::from([self.start]);
        visited.insert(self.start);

        while let Some(state) = queue.pop_front() {
            order.push(state);
            for letter in 0..self.alphabet.len() {
                let target = self.step(state, letter);
                if visited.insert(target) {
                    queue.push_back(target);
                }
            }
        }

        for state in self.graph.node_indices() {
            if visited.insert(state) {
                order.push(state);
            }
        }

        let mut names = IndexMap::new(self.state_count());
        for (name, state) in order.iter().enumerate() {
            names.insert(*state, name);
        }

        let nodes = order
            .iter()
            .map(|state| StateNode::new(self.graph[*state].accepting, names[*state]))
            .collect_vec();
        let delta = order
            .iter()
            .flat_map(|state| (0..self.alphabet.len()).map(move |l| (*state, l)))
            .map(|(state, l)| names[self.step(state, l)])
            .collect_vec();

        DFA::from_table(self.alphabet.clone(), nodes, delta, names[self.start])
    }

    pub fn stats(&self) -> AutomatonStats {
        AutomatonStats {
            states: self.state_count(),
            accepting: self.accepting().count(),
            alphabet: self.alphabet.len(),
            transitions: self.delta.len(),
            epsilon_transitions: 0,
        }
    }

    /// Checks if `L(Self) = ∅`, i.e. no accepting state is reachable from the
    /// start.
    pub fn is_language_empty(&self) -> bool {
        let reachable = self.reachable_indices();
        !reachable.iter().any(|state| self.graph[*state].accepting)
    }

    /// Checks if self is a subset of other. Both must have the same alphabet.
    ///
    /// The inclusion holds if there is no accepting run in the intersection of
    /// self and the complement of other. `L(Self) ⊆ L(Other) iff L(Self) ∩
    /// L(complement(Other)) = ∅`
    pub fn is_subset_of<NO: AutomatonNode>(&self, other: &DFA<NO, L>) -> AutomatonResult<bool> {
        let strict = AlgebraConfig::default()
            .with_alphabet_policy(AlphabetPolicy::Strict)
            .with_prune(true);

        Ok(self.difference_with(other, &strict)?.is_language_empty())
    }

    /// Checks if both DFAs accept the same language over the same alphabet.
    pub fn is_equivalent<NO: AutomatonNode>(&self, other: &DFA<NO, L>) -> AutomatonResult<bool> {
        Ok(self.is_subset_of(other)? && other.is_subset_of(self)?)
    }
}

impl<N: AutomatonNode, L: Letter> Alphabet for DFA<N, L> {
    type Letter = L;

    fn alphabet(&self) -> &[L] {
        &self.alphabet
    }
}

impl<N: AutomatonNode, L: Letter> Automaton for DFA<N, L> {
    type State = N;

    fn state_count(&self) -> usize {
        self.graph.node_count()
    }

    fn states(&self) -> impl Iterator<Item = &N> {
        self.graph.node_weights().map(StateNode::data)
    }

    fn start(&self) -> &N {
        &self.graph[self.start].data
    }

    fn is_accepting(&self, state: &N) -> bool {
        self.try_is_accepting(state).unwrap_or(false)
    }

    fn contains_state(&self, state: &N) -> bool {
        self.lookup.contains_key(state)
    }
}

impl<N: AutomatonNode, L: Letter> Language for DFA<N, L> {
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> AutomatonResult<bool>
    where
        L: 'a,
    {
        let mut current = self.start;
        for symbol in input {
            let letter = self
                .letter_index(symbol)
                .ok_or_else(|| AutomatonError::unknown_symbol(symbol))?;
            current = self.step(current, letter);
        }

        Ok(self.graph[current].accepting)
    }
}

impl<N: AutomatonNode, L: Letter> Debug for DFA<N, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field("states", &self.states().collect_vec())
            .field("initial_state", self.start())
            .field("final_states", &self.accepting().collect_vec())
            .field(
                "transitions",
                &self
                    .transitions()
                    .map(|(from, letter, to)| format!("{:?} --- {:?} --> {:?}", from, letter, to))
                    .collect_vec(),
            )
            .finish()
    }
}
