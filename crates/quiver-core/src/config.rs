//! Client-side query configuration, loadable from TOML.

use crate::{MAX_NARY_OPERANDS, db::ConsistencyLevel};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to parse query config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid query config: {0}")]
    Invalid(String),
}

///
/// QueryConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    #[serde(default)]
    pub compile: CompileConfig,
    #[serde(default)]
    pub read: ReadConfig,
}

impl QueryConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compile.max_nary_operands == 0 {
            return Err(ConfigError::Invalid(
                "compile.max_nary_operands must be at least 1".to_string(),
            ));
        }
        if self.compile.max_k == Some(0) {
            return Err(ConfigError::Invalid(
                "compile.max_k must be at least 1 when set".to_string(),
            ));
        }

        Ok(())
    }

    #[must_use]
    pub const fn with_arity_enforcement(mut self, enforcement: ArityEnforcement) -> Self {
        self.compile.arity_enforcement = enforcement;
        self
    }

    #[must_use]
    pub const fn with_max_k(mut self, max_k: Option<u64>) -> Self {
        self.compile.max_k = max_k;
        self
    }

    #[must_use]
    pub const fn with_consistency(mut self, consistency: ConsistencyLevel) -> Self {
        self.read.consistency = consistency;
        self
    }
}

///
/// CompileConfig
/// Rules applied by the local compile step.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CompileConfig {
    #[serde(default = "default_max_nary_operands")]
    pub max_nary_operands: usize,

    #[serde(default)]
    pub arity_enforcement: ArityEnforcement,

    /// Optional local upper bound for `topk` and `limit`.
    #[serde(default)]
    pub max_k: Option<u64>,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            max_nary_operands: default_max_nary_operands(),
            arity_enforcement: ArityEnforcement::default(),
            max_k: None,
        }
    }
}

const fn default_max_nary_operands() -> usize {
    MAX_NARY_OPERANDS
}

///
/// ArityEnforcement
///
/// Where the n-ary operand cap is checked. Construction never enforces it;
/// `Engine` leaves oversized nodes in the plan for the engine to reject.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArityEnforcement {
    #[default]
    Compile,
    Engine,
}

///
/// ReadConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReadConfig {
    #[serde(default)]
    pub consistency: ConsistencyLevel,
}
