use finstate_macros::config;
use serde::{Deserialize, Serialize};

use crate::logger::LogLevel;

pub trait IntoOr<T> {
    fn into_or(self, or: T) -> T;
}

impl<T> IntoOr<Option<T>> for Option<T> {
    fn into_or(self, or: Option<T>) -> Option<T> {
        match self {
            Some(t) => Some(t),
            None => or,
        }
    }
}

impl<T> IntoOr<T> for Option<T> {
    fn into_or(self, or: T) -> T {
        self.unwrap_or(or)
    }
}

pub trait GeneralConfig {
    fn logger(&self) -> &LoggerConfig;
}

config! {
    pub struct LoggerConfig {
        enabled: bool = false,
        log_file: bool = false,
        log_level: LogLevel = LogLevel::Warn,
    }
}

/// How the alphabets of two DFAs are reconciled before a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlphabetPolicy {
    /// Both operands must have exactly the same alphabet.
    Strict,
    /// Intersection and difference run over the common symbols, union
    /// extends each operand with self-loops over the symbols it lacks.
    Reconcile,
}

config! {
    pub struct AlgebraConfig {
        alphabet_policy: AlphabetPolicy = AlphabetPolicy::Reconcile,
        /// Strip unreachable pairs from product automata.
        prune: bool = false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinimizationAlgorithm {
    TableFilling,
    Hopcroft,
}

config! {
    pub struct MinimizationConfig {
        algorithm: MinimizationAlgorithm = MinimizationAlgorithm::TableFilling,
    }
}

config! {
    pub struct DeterminizationConfig {
        /// Upper bound on the number of subset states, `None` for unbounded.
        max_states: Option<usize> = None,
    }
}

config! {
    pub struct EngineConfig {
        algebra: AlgebraConfig (Option<PartialAlgebraConfig> = AlgebraConfig::default()),
        minimization: MinimizationConfig (Option<PartialMinimizationConfig> = MinimizationConfig::default()),
        determinization: DeterminizationConfig (Option<PartialDeterminizationConfig> = DeterminizationConfig::default()),
        logger: LoggerConfig (Option<PartialLoggerConfig> = LoggerConfig::default()),
    }
}

impl GeneralConfig for EngineConfig {
    fn logger(&self) -> &LoggerConfig {
        &self.logger
    }
}
