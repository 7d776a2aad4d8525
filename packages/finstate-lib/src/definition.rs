use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    automaton::{
        Alphabet, Automaton, AutomatonNode, Label, Letter,
        dfa::DFA,
        nfa::{NFA, NFAEdge},
        node::StateNode,
    },
    config::DeterminizationConfig,
    error::{AutomatonError, AutomatonResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomatonKind {
    Dfa,
    Nfa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionDefinition {
    pub from: String,
    /// `None` encodes an ε-transition.
    #[serde(default)]
    pub symbol: Option<String>,
    pub to: String,
}

/// The interchange format for automata: the tuple (Q, Σ, δ, q0, F) with all
/// states and symbols written as their labels.
///
/// ```json
/// {
///   "kind": "dfa",
///   "states": ["even", "odd"],
///   "alphabet": ["0", "1"],
///   "start": "even",
///   "accepting": ["even"],
///   "transitions": [
///     { "from": "even", "symbol": "1", "to": "odd" },
///     ...
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutomatonDefinition {
    pub kind: AutomatonKind,
    pub states: Vec<String>,
    pub alphabet: Vec<String>,
    pub start: String,
    pub accepting: Vec<String>,
    pub transitions: Vec<TransitionDefinition>,
}

impl AutomatonDefinition {
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        Ok(std::fs::write(path, self.to_json()?)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match path.extension() {
            Some(ext) if ext == "json" => Self::from_json(&std::fs::read_to_string(path)?),
            _ => Err(anyhow::anyhow!(
                "Unsupported file extension: {:?}",
                path.extension()
            )),
        }
    }

    /// Reads the definition as a DFA. NFA definitions are determinized and
    /// their subset states relabeled to plain strings.
    pub fn to_dfa(&self) -> AutomatonResult<DFA<String, String>> {
        self.to_dfa_with(&DeterminizationConfig::default())
    }

    pub fn to_dfa_with(&self, config: &DeterminizationConfig) -> AutomatonResult<DFA<String, String>> {
        match self.kind {
            AutomatonKind::Dfa => DFA::try_from(self),
            AutomatonKind::Nfa => {
                let nfa: NFA<String, String> = NFA::try_from(self)?;
                DFA::try_from(&nfa.determinize_with(config)?.to_definition())
            }
        }
    }

    /// Reads the definition as an NFA. DFA definitions are viewed as NFAs
    /// without ε-transitions.
    pub fn to_nfa(&self) -> AutomatonResult<NFA<String, String>> {
        NFA::try_from(self)
    }
}

impl<N: AutomatonNode, L: Letter> DFA<N, L> {
    pub fn to_definition(&self) -> AutomatonDefinition {
        AutomatonDefinition {
            kind: AutomatonKind::Dfa,
            states: self.states().map(Label::label).collect(),
            alphabet: self.alphabet().iter().map(Label::label).collect(),
            start: self.start().label(),
            accepting: self.accepting().map(Label::label).collect(),
            transitions: self
                .transitions()
                .map(|(from, letter, to)| TransitionDefinition {
                    from: from.label(),
                    symbol: Some(letter.label()),
                    to: to.label(),
                })
                .collect(),
        }
    }
}

impl<N: AutomatonNode, L: Letter> NFA<N, L> {
    pub fn to_definition(&self) -> AutomatonDefinition {
        AutomatonDefinition {
            kind: AutomatonKind::Nfa,
            states: self.states().map(Label::label).collect(),
            alphabet: self.alphabet().iter().map(Label::label).collect(),
            start: self.start().label(),
            accepting: self.accepting().map(Label::label).collect(),
            transitions: self
                .transitions()
                .map(|(from, edge, to)| TransitionDefinition {
                    from: from.label(),
                    symbol: edge.symbol().map(Label::label),
                    to: to.label(),
                })
                .collect(),
        }
    }
}

impl TryFrom<&AutomatonDefinition> for DFA<String, String> {
    type Error = AutomatonError;

    fn try_from(definition: &AutomatonDefinition) -> Result<Self, Self::Error> {
        if definition.kind != AutomatonKind::Dfa {
            return Err(AutomatonError::malformed(
                "expected a dfa definition, determinize nfa definitions first",
            ));
        }

        let transitions = definition
            .transitions
            .iter()
            .map(|t| match &t.symbol {
                Some(symbol) => Ok((t.from.clone(), symbol.clone(), t.to.clone())),
                None => Err(AutomatonError::malformed(format!(
                    "dfa transition from {:?} to {:?} has no symbol",
                    t.from, t.to
                ))),
            })
            .collect::<AutomatonResult<Vec<_>>>()?;

        DFA::from_parts(
            definition.states.iter().cloned(),
            definition.alphabet.iter().cloned(),
            transitions,
            definition.start.clone(),
            definition.accepting.iter().cloned(),
        )
    }
}

impl TryFrom<&AutomatonDefinition> for NFA<String, String> {
    type Error = AutomatonError;

    /// Accepts both kinds, a DFA definition is a valid NFA definition.
    fn try_from(definition: &AutomatonDefinition) -> Result<Self, Self::Error> {
        let mut builder = NFA::builder(definition.alphabet.iter().cloned());
        for state in &definition.states {
            builder.add_state(StateNode::non_accepting(state.clone()));
        }
        for state in &definition.accepting {
            builder.mark_accepting(state.clone());
        }
        for t in &definition.transitions {
            builder.add_transition(
                t.from.clone(),
                NFAEdge::from(t.symbol.clone()),
                t.to.clone(),
            );
        }
        builder.set_start(definition.start.clone());

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::Language;

    const PARITY: &str = r#"{
        "kind": "dfa",
        "states": ["even", "odd"],
        "alphabet": ["0", "1"],
        "start": "even",
        "accepting": ["even"],
        "transitions": [
            { "from": "even", "symbol": "0", "to": "even" },
            { "from": "even", "symbol": "1", "to": "odd" },
            { "from": "odd", "symbol": "0", "to": "odd" },
            { "from": "odd", "symbol": "1", "to": "even" }
        ]
    }"#;

    fn word(w: &str) -> Vec<String> {
        w.chars().map(|c| c.to_string()).collect()
    }

    #[test]
    fn parses_dfa_definition() {
        let definition = AutomatonDefinition::from_json(PARITY).unwrap();
        let dfa: DFA<String, String> = DFA::try_from(&definition).unwrap();

        assert!(dfa.accepts(&word("1010")).unwrap());
        assert!(!dfa.accepts(&word("101")).unwrap());
        assert_eq!(dfa.to_definition(), definition);
    }

    #[test]
    fn missing_symbol_defaults_to_epsilon() {
        let definition = AutomatonDefinition::from_json(
            r#"{
                "kind": "nfa",
                "states": ["a", "b"],
                "alphabet": [],
                "start": "a",
                "accepting": ["b"],
                "transitions": [{ "from": "a", "to": "b" }]
            }"#,
        )
        .unwrap();

        assert_eq!(definition.transitions[0].symbol, None);
        let nfa: NFA<String, String> = NFA::try_from(&definition).unwrap();
        assert!(nfa.accepts(&[]).unwrap());
        assert!(DFA::<String, String>::try_from(&definition).is_err());
        assert!(definition.to_dfa().unwrap().accepts(&[]).unwrap());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(AutomatonDefinition::from_json(r#"{ "kind": "dfa", "sates": [] }"#).is_err());
    }
}
