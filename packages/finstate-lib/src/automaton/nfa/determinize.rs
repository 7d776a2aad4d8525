use std::collections::VecDeque;

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::graph::NodeIndex;
use tracing::Level;

use crate::{
    automaton::{AutomatonNode, Letter, dfa::DFA, nfa::NFA, node::StateNode, state_set::StateSet},
    config::DeterminizationConfig,
    error::{AutomatonError, AutomatonResult},
};

impl<N: AutomatonNode, L: Letter> NFA<N, L> {
    /// Determinizes with the default [DeterminizationConfig], which places no
    /// limit on the number of subset states.
    ///
    /// See [NFA::determinize_with].
    pub fn determinize(&self) -> AutomatonResult<DFA<StateSet<N>, L>> {
        self.determinize_with(&DeterminizationConfig::default())
    }

    /// Determinizes the NFA by subset construction. Each DFA state is the
    /// ε-closed set of NFA states that can be active after some input, and it
    /// accepts iff the set contains an accepting state.
    ///
    /// Only subsets reachable from the closure of the start state are built,
    /// in breadth-first order over the alphabet. The empty set becomes an
    /// explicit non-accepting sink if it is reached. Fails with
    /// [AutomatonError::StateLimitExceeded] once more than the configured
    /// number of subsets is discovered.
    pub fn determinize_with(
        &self,
        config: &DeterminizationConfig,
    ) -> AutomatonResult<DFA<StateSet<N>, L>> {
        let span = tracing::span!(Level::DEBUG, "determinize", states = self.graph.node_count());
        let _enter = span.enter();

        let max_states = *config.get_max_states();
        let check_limit = |states: usize| match max_states {
            Some(max) if states > max => Err(AutomatonError::StateLimitExceeded { states, max }),
            _ => Ok(()),
        };

        let start = self.closure_indices([self.start_index()]);
        let mut subsets: Vec<Vec<NodeIndex>> = vec![start.clone()];
        let mut state_map: HashMap<Vec<NodeIndex>, usize> = HashMap::new();
        state_map.insert(start, 0);
        check_limit(subsets.len())?;

        let mut delta = Vec::new();
        let mut queue = VecDeque::from([0]);

        // subsets are processed in discovery order, so the rows of `delta`
        // line up with the subset indices
        while let Some(current) = queue.pop_front() {
            for letter in &self.alphabet {
                let step = self.step_indices(&subsets[current], letter);
                let target_set = self.closure_indices(step);

                let target = match state_map.get(&target_set) {
                    Some(target) => *target,
                    None => {
                        let target = subsets.len();
                        subsets.push(target_set.clone());
                        state_map.insert(target_set, target);
                        check_limit(subsets.len())?;
                        queue.push_back(target);
                        target
                    }
                };

                delta.push(target);
            }
        }

        tracing::debug!(
            "Subset construction built {} states from {} NFA states",
            subsets.len(),
            self.graph.node_count()
        );

        let nodes = subsets
            .iter()
            .map(|subset| StateNode::new(self.is_accepting_set(subset), self.state_set(subset)))
            .collect_vec();

        Ok(DFA::from_table(self.alphabet.clone(), nodes, delta, 0))
    }
}
