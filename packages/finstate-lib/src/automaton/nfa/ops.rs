use itertools::{Either, Itertools};

use crate::automaton::{
    Alphabet, AutomatonNode, Letter, canonical_alphabet,
    nfa::{NFA, NFAEdge},
    node::StateNode,
};

impl<N: AutomatonNode, L: Letter> NFA<N, L> {
    fn joint_alphabet<M: AutomatonNode>(&self, other: &NFA<M, L>) -> Vec<L> {
        canonical_alphabet(self.alphabet().iter().chain(other.alphabet()).cloned())
    }

    /// Builds an NFA for `L(Self) ∪ L(Other)`. A fresh start state `None`
    /// branches by ε into the start states of both operands, which keep their
    /// accepting states.
    pub fn union<M: AutomatonNode>(&self, other: &NFA<M, L>) -> NFA<Option<Either<N, M>>, L> {
        let left_offset = 1;
        let right_offset = 1 + self.graph.node_count();

        let nodes = std::iter::once(StateNode::non_accepting(None))
            .chain(
                self.graph
                    .node_weights()
                    .map(|node| node.map(|data| Some(Either::Left(data.clone())))),
            )
            .chain(
                other
                    .graph
                    .node_weights()
                    .map(|node| node.map(|data| Some(Either::Right(data.clone())))),
            )
            .collect_vec();

        let edges = [
            (0, NFAEdge::Epsilon, self.start_index().index() + left_offset),
            (0, NFAEdge::Epsilon, other.start_index().index() + right_offset),
        ]
        .into_iter()
        .chain(self.shifted_edges(left_offset))
        .chain(other.shifted_edges(right_offset))
        .collect_vec();

        NFA::from_graph_parts(self.joint_alphabet(other), nodes, edges, 0)
    }

    /// Builds an NFA for the concatenation `L(Self) · L(Other)`. Every
    /// accepting state of self is linked by ε to the start of other, and only
    /// the accepting states of other accept.
    pub fn concat<M: AutomatonNode>(&self, other: &NFA<M, L>) -> NFA<Either<N, M>, L> {
        let right_offset = self.graph.node_count();
        let right_start = other.start_index().index() + right_offset;

        let nodes = self
            .graph
            .node_weights()
            .map(|node| StateNode::non_accepting(Either::Left(node.data.clone())))
            .chain(
                other
                    .graph
                    .node_weights()
                    .map(|node| node.map(|data| Either::Right(data.clone()))),
            )
            .collect_vec();

        let edges = self
            .accepting_indices()
            .map(|accepting| (accepting.index(), NFAEdge::Epsilon, right_start))
            .chain(self.shifted_edges(0))
            .chain(other.shifted_edges(right_offset))
            .collect_vec();

        NFA::from_graph_parts(
            self.joint_alphabet(other),
            nodes,
            edges,
            self.start_index().index(),
        )
    }

    /// Builds an NFA for the Kleene star `L(Self)*`.
    ///
    /// A fresh accepting start state `None` is linked by ε to the original
    /// start, and every accepting state is linked by ε back to the original
    /// start. The original start state keeps its accepting flag.
    pub fn star(&self) -> NFA<Option<N>, L> {
        let start = self.start_index().index() + 1;

        let nodes = std::iter::once(StateNode::accepting(None))
            .chain(
                self.graph
                    .node_weights()
                    .map(|node| node.map(|data| Some(data.clone()))),
            )
            .collect_vec();

        let edges = std::iter::once((0, NFAEdge::Epsilon, start))
            .chain(
                self.accepting_indices()
                    .map(|accepting| (accepting.index() + 1, NFAEdge::Epsilon, start)),
            )
            .chain(self.shifted_edges(1))
            .collect_vec();

        NFA::from_graph_parts(self.alphabet.clone(), nodes, edges, 0)
    }
}
