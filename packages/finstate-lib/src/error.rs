use thiserror::Error;

/// Errors reported by the automaton engine.
///
/// Every variant is a precondition violation detected before any result is
/// produced, so an error never leaves a partially built automaton behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    #[error("malformed automaton: {reason}")]
    MalformedAutomaton { reason: String },

    #[error("symbol {symbol} is not part of the alphabet")]
    UnknownSymbol { symbol: String },

    #[error("state {state} is not part of the automaton")]
    UnknownState { state: String },

    #[error("alphabets {left} and {right} cannot be reconciled")]
    AlphabetMismatch { left: String, right: String },

    #[error("subset construction exceeded the state limit: {states} states (max: {max})")]
    StateLimitExceeded { states: usize, max: usize },
}

impl AutomatonError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        AutomatonError::MalformedAutomaton {
            reason: reason.into(),
        }
    }

    pub fn unknown_symbol(symbol: &impl std::fmt::Debug) -> Self {
        AutomatonError::UnknownSymbol {
            symbol: format!("{:?}", symbol),
        }
    }

    pub fn unknown_state(state: &impl std::fmt::Debug) -> Self {
        AutomatonError::UnknownState {
            state: format!("{:?}", state),
        }
    }

    pub fn alphabet_mismatch(left: &impl std::fmt::Debug, right: &impl std::fmt::Debug) -> Self {
        AutomatonError::AlphabetMismatch {
            left: format!("{:?}", left),
            right: format!("{:?}", right),
        }
    }
}

pub type AutomatonResult<T> = Result<T, AutomatonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AutomatonError::unknown_symbol(&'x');
        assert_eq!(err.to_string(), "symbol 'x' is not part of the alphabet");

        let err = AutomatonError::StateLimitExceeded { states: 9, max: 8 };
        assert_eq!(
            err.to_string(),
            "subset construction exceeded the state limit: 9 states (max: 8)"
        );
    }
}
