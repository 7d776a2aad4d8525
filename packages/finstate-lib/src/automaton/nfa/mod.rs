use std::fmt::Debug;

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use crate::{
    automaton::{
        Alphabet, Automaton, AutomatonNode, AutomatonStats, Label, Language, Letter,
        index_map::IndexSet, node::StateNode, state_set::StateSet,
    },
    error::{AutomatonError, AutomatonResult},
};

pub mod builder;
pub mod closure;
pub mod determinize;
pub mod ops;

pub use builder::NFABuilder;

/// The label of an NFA transition, either a letter of the alphabet or ε.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NFAEdge<L: Letter> {
    Symbol(L),
    Epsilon,
}

impl<L: Letter> NFAEdge<L> {
    pub fn is_epsilon(&self) -> bool {
        matches!(self, NFAEdge::Epsilon)
    }

    /// Returns true if this edge can be taken when reading `letter`.
    pub fn matches(&self, letter: &L) -> bool {
        match self {
            NFAEdge::Symbol(symbol) => symbol == letter,
            NFAEdge::Epsilon => false,
        }
    }

    pub fn symbol(&self) -> Option<&L> {
        match self {
            NFAEdge::Symbol(symbol) => Some(symbol),
            NFAEdge::Epsilon => None,
        }
    }
}

impl<L: Letter> From<Option<L>> for NFAEdge<L> {
    fn from(value: Option<L>) -> Self {
        match value {
            Some(letter) => NFAEdge::Symbol(letter),
            None => NFAEdge::Epsilon,
        }
    }
}

impl<L: Letter> Label for NFAEdge<L> {
    fn label(&self) -> String {
        match self {
            NFAEdge::Symbol(symbol) => symbol.label(),
            NFAEdge::Epsilon => "ε".to_string(),
        }
    }
}

/// A nondeterministic finite automaton with ε-transitions. Missing
/// transitions lead nowhere.
#[derive(Clone)]
pub struct NFA<N: AutomatonNode, L: Letter> {
    graph: DiGraph<StateNode<N>, NFAEdge<L>>,
    start: NodeIndex,
    alphabet: Vec<L>,
    lookup: HashMap<N, NodeIndex>,
}

impl<N: AutomatonNode, L: Letter> NFA<N, L> {
    /// Creates a builder over the given alphabet.
    pub fn builder(alphabet: impl IntoIterator<Item = L>) -> NFABuilder<N, L> {
        NFABuilder::new(alphabet)
    }

    /// Builds an NFA from the tuple (Q, Σ, δ, q0, F). A transition labeled
    /// `None` is an ε-transition.
    pub fn from_parts(
        states: impl IntoIterator<Item = N>,
        alphabet: impl IntoIterator<Item = L>,
        transitions: impl IntoIterator<Item = (N, Option<L>, N)>,
        start: N,
        accepting: impl IntoIterator<Item = N>,
    ) -> AutomatonResult<Self> {
        let mut builder = NFABuilder::new(alphabet);
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

    /// Assembles an NFA from validated parts. The alphabet must be canonical,
    /// state identities unique, and edges must index into `nodes`. Duplicate
    /// edges are dropped.
    pub(crate) fn from_graph_parts(
        alphabet: Vec<L>,
        nodes: Vec<StateNode<N>>,
        mut edges: Vec<(usize, NFAEdge<L>, usize)>,
        start: usize,
    ) -> Self {
        assert!(start < nodes.len(), "Start state must be part of the NFA");

        edges.sort();
        edges.dedup();

        let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
        let mut lookup = HashMap::with_capacity(nodes.len());

        for node in nodes {
            let data = node.data.clone();
            let index = graph.add_node(node);
            let previous = lookup.insert(data, index);
            assert!(
                previous.is_none(),
                "State identities must be unique within an NFA"
            );
        }

        for (from, edge, to) in edges {
            graph.add_edge(NodeIndex::new(from), NodeIndex::new(to), edge);
        }

        NFA {
            graph,
            start: NodeIndex::new(start),
            alphabet,
            lookup,
        }
    }

    pub(crate) fn start_index(&self) -> NodeIndex {
        self.start
    }

    pub(crate) fn index_of(&self, state: &N) -> AutomatonResult<NodeIndex> {
        self.lookup
            .get(state)
            .copied()
            .ok_or_else(|| AutomatonError::unknown_state(state))
    }

    /// All edges as plain indices shifted by `offset`, in the layout expected
    /// by [NFA::from_graph_parts].
    pub(crate) fn shifted_edges(
        &self,
        offset: usize,
    ) -> impl Iterator<Item = (usize, NFAEdge<L>, usize)> + '_ {
        self.graph.edge_references().map(move |edge| {
            (
                edge.source().index() + offset,
                edge.weight().clone(),
                edge.target().index() + offset,
            )
        })
    }

    /// The indices of all accepting states.
    pub(crate) fn accepting_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(|index| self.graph[*index].accepting)
    }

    /// Direct successors of a set of states on `letter`, without closure.
    pub(crate) fn step_indices(&self, states: &[NodeIndex], letter: &L) -> Vec<NodeIndex> {
        let mut targets = IndexSet::new(self.graph.node_count());
        for state in states {
            for edge in self.graph.edges_directed(*state, Direction::Outgoing) {
                if edge.weight().matches(letter) {
                    targets.insert(edge.target());
                }
            }
        }

        targets.to_vec()
    }

    /// Checks if a set of states contains an accepting state.
    pub(crate) fn is_accepting_set(&self, states: &[NodeIndex]) -> bool {
        states.iter().any(|state| self.graph[*state].accepting)
    }

    /// Maps a set of state indices to their identities.
    pub(crate) fn state_set(&self, states: &[NodeIndex]) -> StateSet<N> {
        states
            .iter()
            .map(|state| self.graph[*state].data.clone())
            .collect()
    }

    /// Returns the direct successors of `state` along `edge`. No closure is
    /// applied, so for a letter this is exactly δ(state, letter).
    pub fn successors(&self, state: &N, edge: &NFAEdge<L>) -> AutomatonResult<StateSet<N>> {
        let index = self.index_of(state)?;
        if let NFAEdge::Symbol(letter) = edge
            && !self.contains_letter(letter)
        {
            return Err(AutomatonError::unknown_symbol(letter));
        }

        Ok(self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .filter(|e| e.weight() == edge)
            .map(|e| self.graph[e.target()].data.clone())
            .collect())
    }

    /// Iterates over all transitions as `(state, edge, successor)` triples.
    pub fn transitions(&self) -> impl Iterator<Item = (&N, &NFAEdge<L>, &N)> {
        self.graph.edge_references().map(|edge| {
            (
                &self.graph[edge.source()].data,
                edge.weight(),
                &self.graph[edge.target()].data,
            )
        })
    }

    /// Decides membership by determinizing first. Useful to cross-check
    /// [Language::accepts].
    pub fn accepts_via_dfa<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> AutomatonResult<bool>
    where
        L: 'a,
    {
        self.determinize()?.accepts(input)
    }

    pub fn stats(&self) -> AutomatonStats {
        let epsilon_transitions = self
            .graph
            .edge_weights()
            .filter(|edge| edge.is_epsilon())
            .count();

        AutomatonStats {
            states: self.state_count(),
            accepting: self.accepting().count(),
            alphabet: self.alphabet.len(),
            transitions: self.graph.edge_count(),
            epsilon_transitions,
        }
    }
}

impl<N: AutomatonNode, L: Letter> Alphabet for NFA<N, L> {
    type Letter = L;

    fn alphabet(&self) -> &[L] {
        &self.alphabet
    }
}

impl<N: AutomatonNode, L: Letter> Automaton for NFA<N, L> {
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
        self.lookup
            .get(state)
            .is_some_and(|index| self.graph[*index].accepting)
    }

    fn contains_state(&self, state: &N) -> bool {
        self.lookup.contains_key(state)
    }
}

impl<N: AutomatonNode, L: Letter> Language for NFA<N, L> {
    /// Tracks the set of active states. Every symbol is validated, even once
    /// the active set has become empty.
    fn accepts<'a>(&self, input: impl IntoIterator<Item = &'a L>) -> AutomatonResult<bool>
    where
        L: 'a,
    {
        let mut active = self.closure_indices([self.start]);

        for symbol in input {
            if !self.contains_letter(symbol) {
                return Err(AutomatonError::unknown_symbol(symbol));
            }

            if !active.is_empty() {
                let next = self.step_indices(&active, symbol);
                active = self.closure_indices(next);
            }
        }

        Ok(self.is_accepting_set(&active))
    }
}

impl<N: AutomatonNode, L: Letter> Debug for NFA<N, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NFA")
            .field("alphabet", &self.alphabet)
            .field("state_count", &self.graph.node_count())
            .field("states", &self.states().collect_vec())
            .field("initial_state", self.start())
            .field("final_states", &self.accepting().collect_vec())
            .field(
                "transitions",
                &self
                    .transitions()
                    .map(|(from, edge, to)| format!("{:?} --- {:?} --> {:?}", from, edge, to))
                    .collect_vec(),
            )
            .finish()
    }
}
