use itertools::Itertools;
use petgraph::{graph::NodeIndex, visit::Bfs};

use crate::automaton::{
    AutomatonNode, Letter,
    dfa::DFA,
    index_map::{IndexMap, IndexSet},
};

impl<N: AutomatonNode, L: Letter> DFA<N, L> {
    /// The indices of all states reachable from the start, in ascending
    /// index order.
    pub(crate) fn reachable_indices(&self) -> Vec<NodeIndex> {
        let mut reachable = IndexSet::new(self.graph.node_count());
        let mut bfs = Bfs::new(&self.graph, self.start_index());

        while let Some(state) = bfs.next(&self.graph) {
            reachable.insert(state);
        }

        reachable.to_vec()
    }

    /// Removes every state that is not reachable from the start. The kept
    /// states stay in their original order and the language is unchanged.
    pub fn strip(&self) -> DFA<N, L> {
        let reachable = self.reachable_indices();
        if reachable.len() == self.graph.node_count() {
            return self.clone();
        }

        let mut renamed = IndexMap::new(self.graph.node_count());
        for (i, state) in reachable.iter().enumerate() {
            renamed.insert(*state, i);
        }

        let width = self.alphabet.len();
        let nodes = reachable
            .iter()
            .map(|state| self.node(*state).clone())
            .collect_vec();
        let delta = reachable
            .iter()
            .flat_map(|state| (0..width).map(move |l| (*state, l)))
            .map(|(state, l)| renamed[self.step(state, l)])
            .collect_vec();

        tracing::debug!(
            "Stripped {} unreachable states",
            self.graph.node_count() - reachable.len()
        );

        DFA::from_table(
            self.alphabet.clone(),
            nodes,
            delta,
            renamed[self.start_index()],
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::automaton::{Automaton, Language, dfa::DFA};

    #[test]
    fn strip_drops_unreachable_states() {
        let dfa = DFA::from_parts(
            vec!["a", "b", "island"],
            vec!['x'],
            vec![("a", 'x', "b"), ("b", 'x', "a"), ("island", 'x', "a")],
            "a",
            vec!["b", "island"],
        )
        .unwrap();

        let stripped = dfa.strip();
        assert_eq!(stripped.state_count(), 2);
        assert!(!stripped.contains_state(&"island"));
        assert_eq!(stripped.accepting().collect::<Vec<_>>(), vec![&"b"]);
        assert!(stripped.accepts(&['x', 'x', 'x']).unwrap());
        assert!(!stripped.accepts(&[]).unwrap());
    }

    #[test]
    fn strip_keeps_fully_reachable_dfa() {
        let dfa = DFA::from_parts(
            vec![0u32, 1],
            vec!['x'],
            vec![(0, 'x', 1), (1, 'x', 1)],
            0,
            vec![1],
        )
        .unwrap();

        assert_eq!(dfa.strip().state_count(), 2);
    }
}
