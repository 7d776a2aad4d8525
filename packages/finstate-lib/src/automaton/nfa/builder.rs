use hashbrown::HashMap;

use crate::{
    automaton::{
        AutomatonNode, Letter, canonical_alphabet,
        nfa::{NFA, NFAEdge},
        node::StateNode,
    },
    error::{AutomatonError, AutomatonResult},
};

/// Collects the parts of an NFA and validates them in [NFABuilder::build].
#[derive(Debug, Clone)]
pub struct NFABuilder<N: AutomatonNode, L: Letter> {
    alphabet: Vec<L>,
    states: Vec<StateNode<N>>,
    accepting: Vec<N>,
    transitions: Vec<(N, NFAEdge<L>, N)>,
    start: Option<N>,
}

impl<N: AutomatonNode, L: Letter> NFABuilder<N, L> {
    pub fn new(alphabet: impl IntoIterator<Item = L>) -> Self {
        NFABuilder {
            alphabet: canonical_alphabet(alphabet),
            states: vec![],
            accepting: vec![],
            transitions: vec![],
            start: None,
        }
    }

    pub fn add_state(&mut self, state: StateNode<N>) -> &mut Self {
        self.states.push(state);
        self
    }

    /// Marks an already declared state as accepting.
    pub fn mark_accepting(&mut self, state: N) -> &mut Self {
        self.accepting.push(state);
        self
    }

    /// Adds a transition. Both `NFAEdge<L>` and `Option<L>` are accepted as
    /// label, where `None` stands for ε.
    pub fn add_transition(&mut self, from: N, edge: impl Into<NFAEdge<L>>, to: N) -> &mut Self {
        self.transitions.push((from, edge.into(), to));
        self
    }

    pub fn set_start(&mut self, state: N) -> &mut Self {
        self.start = Some(state);
        self
    }

    /// Validates the collected parts and builds the NFA.
    ///
    /// Fails with [AutomatonError::MalformedAutomaton] if there are no
    /// states, a state is declared twice, the start state is missing or
    /// unknown, an accepting state or transition endpoint is unknown, or a
    /// transition uses a letter outside the alphabet.
    pub fn build(&self) -> AutomatonResult<NFA<N, L>> {
        let mut nodes = self.states.clone();
        let mut lookup = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if lookup.insert(node.data.clone(), i).is_some() {
                return Err(AutomatonError::malformed(format!(
                    "state {:?} is declared twice",
                    node.data
                )));
            }
        }

        if nodes.is_empty() {
            return Err(AutomatonError::malformed("the automaton has no states"));
        }

        for state in &self.accepting {
            let i = *lookup.get(state).ok_or_else(|| {
                AutomatonError::malformed(format!(
                    "accepting state {:?} is not a declared state",
                    state
                ))
            })?;
            nodes[i].accepting = true;
        }

        let start = self
            .start
            .as_ref()
            .ok_or_else(|| AutomatonError::malformed("no start state was set"))?;
        let start = *lookup.get(start).ok_or_else(|| {
            AutomatonError::malformed(format!("start state {:?} is not a declared state", start))
        })?;

        let mut edges = Vec::with_capacity(self.transitions.len());
        for (from, edge, to) in &self.transitions {
            let source = *lookup.get(from).ok_or_else(|| {
                AutomatonError::malformed(format!("transition source {:?} is not a declared state", from))
            })?;
            let target = *lookup.get(to).ok_or_else(|| {
                AutomatonError::malformed(format!("transition target {:?} is not a declared state", to))
            })?;
            if let NFAEdge::Symbol(letter) = edge
                && self.alphabet.binary_search(letter).is_err()
            {
                return Err(AutomatonError::malformed(format!(
                    "transition {:?} --- {:?} --> {:?} uses a letter outside the alphabet",
                    from, letter, to
                )));
            }

            edges.push((source, edge.clone(), target));
        }

        Ok(NFA::from_graph_parts(
            self.alphabet.clone(),
            nodes,
            edges,
            start,
        ))
    }
}
