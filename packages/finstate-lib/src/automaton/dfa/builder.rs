use hashbrown::HashMap;

use crate::{
    automaton::{AutomatonNode, Letter, canonical_alphabet, dfa::DFA, node::StateNode},
    error::{AutomatonError, AutomatonResult},
};

/// Collects the parts of a DFA and validates them in [DFABuilder::build].
///
/// ```
/// use finstate_lib::automaton::{Language, dfa::DFABuilder, node::StateNode};
///
/// let mut builder = DFABuilder::new(vec!['0', '1']);
/// builder
///     .add_state(StateNode::accepting("even"))
///     .add_state(StateNode::non_accepting("odd"))
///     .add_transition("even", '0', "even")
///     .add_transition("even", '1', "odd")
///     .add_transition("odd", '0', "odd")
///     .add_transition("odd", '1', "even")
///     .set_start("even");
///
/// let dfa = builder.build().unwrap();
/// assert!(dfa.accepts(&['1', '0', '1']).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct DFABuilder<N: AutomatonNode, L: Letter> {
    alphabet: Vec<L>,
    states: Vec<StateNode<N>>,
    accepting: Vec<N>,
    transitions: Vec<(N, L, N)>,
    start: Option<N>,
    sink: Option<N>,
}

impl<N: AutomatonNode, L: Letter> DFABuilder<N, L> {
    pub fn new(alphabet: impl IntoIterator<Item = L>) -> Self {
        DFABuilder {
            alphabet: canonical_alphabet(alphabet),
            states: vec![],
            accepting: vec![],
            transitions: vec![],
            start: None,
            sink: None,
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

    pub fn add_transition(&mut self, from: N, letter: L, to: N) -> &mut Self {
        self.transitions.push((from, letter, to));
        self
    }

    pub fn set_start(&mut self, state: N) -> &mut Self {
        self.start = Some(state);
        self
    }

    /// Routes every missing transition into `sink`, which loops to itself on
    /// every letter. The sink is only added if some transition is missing.
    /// If `sink` names a declared state, that state is used instead.
    pub fn complete_with(&mut self, sink: N) -> &mut Self {
        self.sink = Some(sink);
        self
    }

    /// Validates the collected parts and builds the DFA.
    ///
    /// Fails with [AutomatonError::MalformedAutomaton] if there are no
    /// states, a state is declared twice, the start state is missing or
    /// unknown, an accepting state or transition endpoint is unknown, a
    /// transition uses a letter outside the alphabet, two transitions
    /// conflict, or a transition is missing and no sink was configured.
    pub fn build(&self) -> AutomatonResult<DFA<N, L>> {
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

        let width = self.alphabet.len();
        let mut delta: Vec<Option<usize>> = vec![None; nodes.len() * width];

        for (from, letter, to) in &self.transitions {
            let source = *lookup.get(from).ok_or_else(|| {
                AutomatonError::malformed(format!("transition source {:?} is not a declared state", from))
            })?;
            let target = *lookup.get(to).ok_or_else(|| {
                AutomatonError::malformed(format!("transition target {:?} is not a declared state", to))
            })?;
            let l = self.alphabet.binary_search(letter).map_err(|_| {
                AutomatonError::malformed(format!(
                    "transition {:?} --- {:?} --> {:?} uses a letter outside the alphabet",
                    from, letter, to
                ))
            })?;

            let slot = source * width + l;
            if let Some(existing) = delta[slot]
                && existing != target
            {
                return Err(AutomatonError::malformed(format!(
                    "transition conflict, {:?} --- {:?} --> {:?} and {:?} --- {:?} --> {:?}",
                    from, letter, nodes[existing].data, from, letter, to
                )));
            }
            delta[slot] = Some(target);
        }

        if let Some(sink) = &self.sink
            && delta.iter().any(Option::is_none)
        {
            let sink_index = match lookup.get(sink) {
                Some(i) => *i,
                None => {
                    nodes.push(StateNode::non_accepting(sink.clone()));
                    delta.extend(std::iter::repeat_n(None, width));
                    nodes.len() - 1
                }
            };

            for slot in delta.iter_mut().filter(|slot| slot.is_none()) {
                *slot = Some(sink_index);
            }
        }

        let delta = delta
            .into_iter()
            .enumerate()
            .map(|(slot, target)| {
                target.ok_or_else(|| {
                    AutomatonError::malformed(format!(
                        "transition function is not total, state {:?} has no successor on {:?}",
                        nodes[slot / width].data,
                        self.alphabet[slot % width]
                    ))
                })
            })
            .collect::<AutomatonResult<Vec<usize>>>()?;

        Ok(DFA::from_table(self.alphabet.clone(), nodes, delta, start))
    }
}
