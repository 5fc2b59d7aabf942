use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures surfaced by the graph and game-tree engines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Error)]
#[serde(tag = "type")]
pub enum SearchError {
    #[error("frontier exhausted after {expanded} expansions without reaching a goal")]
    NoSolution { expanded: usize },
    #[error("no {hook} function registered under the name `{name}`")]
    UnimplementedHook { hook: String, name: String },
    #[error("unknown search algorithm `{name}`")]
    UnknownAlgorithm { name: String },
    #[error("unknown game-tree strategy `{name}`")]
    UnknownStrategy { name: String },
    #[error("controlled agent has no legal action")]
    NoLegalActions,
    #[error("invalid graph problem: {reason}")]
    InvalidProblem { reason: String },
    #[error("invalid game tree: {reason}")]
    InvalidTree { reason: String },
    #[error("invalid search config: {reason}")]
    InvalidConfig { reason: String },
}

impl SearchError {
    pub fn unimplemented_hook(hook: &str, name: impl Into<String>) -> Self {
        SearchError::UnimplementedHook {
            hook: hook.to_string(),
            name: name.into(),
        }
    }
}
