use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

use super::heuristic::Heuristic;
use super::problem::{PathCost, SearchProblem, StepCost, Successor};

/// Directed, labelled edge of an explicit graph problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub action: String,
    #[serde(default = "default_step_cost")]
    pub cost: StepCost,
}

fn default_step_cost() -> StepCost {
    1.0
}

/// A search problem spelled out as an edge list, as sent from JS or built in
/// tests. Successors are enumerated in edge-list order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphProblem {
    pub start: String,
    pub goals: Vec<String>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    /// Per-state cost-to-goal estimates read by [`TableHeuristic`].
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub estimates: HashMap<String, f64>,
}

impl GraphProblem {
    pub fn new<I, G>(start: impl Into<String>, goals: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<String>,
    {
        Self {
            start: start.into(),
            goals: goals.into_iter().map(Into::into).collect(),
            edges: Vec::new(),
            estimates: HashMap::new(),
        }
    }

    pub fn with_edge(mut self, from: &str, to: &str, action: &str, cost: StepCost) -> Self {
        self.edges.push(Edge {
            from: from.to_string(),
            to: to.to_string(),
            action: action.to_string(),
            cost,
        });
        self
    }

    pub fn with_estimate(mut self, state: &str, estimate: f64) -> Self {
        self.estimates.insert(state.to_string(), estimate);
        self
    }

    pub fn estimate(&self, state: &str) -> f64 {
        self.estimates.get(state).copied().unwrap_or(0.0)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.goals.is_empty() {
            return Err(SearchError::InvalidProblem {
                reason: "no goal states".to_string(),
            });
        }
        for edge in &self.edges {
            if !(edge.cost >= 0.0) {
                return Err(SearchError::InvalidProblem {
                    reason: format!(
                        "edge `{}` from `{}` has negative cost {}",
                        edge.action, edge.from, edge.cost
                    ),
                });
            }
        }
        let mut moves = HashSet::new();
        if let Some(edge) = self
            .edges
            .iter()
            .find(|edge| !moves.insert((&edge.from, &edge.action)))
        {
            return Err(SearchError::InvalidProblem {
                reason: format!(
                    "state `{}` has more than one `{}` edge",
                    edge.from, edge.action
                ),
            });
        }
        if let Some((state, estimate)) = self.estimates.iter().find(|(_, value)| !(**value >= 0.0))
        {
            return Err(SearchError::InvalidProblem {
                reason: format!("estimate for `{state}` is negative ({estimate})"),
            });
        }
        Ok(())
    }
}

impl SearchProblem for GraphProblem {
    type State = String;
    type Action = String;

    fn start_state(&self) -> String {
        self.start.clone()
    }

    fn is_goal_state(&self, state: &String) -> bool {
        self.goals.iter().any(|goal| goal == state)
    }

    fn successors(&self, state: &String) -> Vec<Successor<String, String>> {
        self.edges
            .iter()
            .filter(|edge| &edge.from == state)
            .map(|edge| Successor::new(edge.to.clone(), edge.action.clone(), edge.cost))
            .collect()
    }

    fn cost_of_actions(&self, actions: &[String]) -> Option<PathCost> {
        let mut current = self.start.as_str();
        let mut total = 0.0;
        for action in actions {
            let edge = self
                .edges
                .iter()
                .find(|edge| edge.from == current && &edge.action == action)?;
            total += edge.cost;
            current = edge.to.as_str();
        }
        Some(total)
    }
}

/// Reads [`GraphProblem::estimates`]; states without an entry estimate 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableHeuristic;

impl Heuristic<GraphProblem> for TableHeuristic {
    fn estimate(&self, state: &String, problem: &GraphProblem) -> f64 {
        problem.estimate(state)
    }
}
