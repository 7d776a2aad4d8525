use petgraph::{Direction, graph::NodeIndex, visit::EdgeRef};

use crate::{
    automaton::{AutomatonNode, Letter, index_map::IndexSet, nfa::NFA, state_set::StateSet},
    error::AutomatonResult,
};

impl<N: AutomatonNode, L: Letter> NFA<N, L> {
    /// Calculates the ε-closure of a set of state indices: the smallest
    /// superset closed under ε-transitions. The result is sorted and
    /// duplicate free.
    pub(crate) fn closure_indices(&self, states: impl IntoIterator<Item = NodeIndex>) -> Vec<NodeIndex> {
        let mut closure = IndexSet::new(self.graph.node_count());
        let mut stack = vec![];

        for state in states {
            if closure.insert(state) {
                stack.push(state);
            }
        }

        while let Some(state) = stack.pop() {
            for edge in self.graph.edges_directed(state, Direction::Outgoing) {
                if edge.weight().is_epsilon() && closure.insert(edge.target()) {
                    stack.push(edge.target());
                }
            }
        }

        closure.to_vec()
    }

    /// Returns every state reachable from `states` using only ε-transitions,
    /// including the states themselves.
    pub fn closure<'a>(&self, states: impl IntoIterator<Item = &'a N>) -> AutomatonResult<StateSet<N>>
    where
        N: 'a,
    {
        let indices = states
            .into_iter()
            .map(|state| self.index_of(state))
            .collect::<AutomatonResult<Vec<_>>>()?;

        Ok(self.state_set(&self.closure_indices(indices)))
    }

    /// The ε-closure of a single state.
    pub fn closure_of(&self, state: &N) -> AutomatonResult<StateSet<N>> {
        self.closure([state])
    }
}
