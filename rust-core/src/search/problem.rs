use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// Non-negative cost of a single action.
pub type StepCost = f64;
/// Sum of step costs along a path.
pub type PathCost = f64;

/// One successor produced by expanding a state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Successor<S, A> {
    pub state: S,
    pub action: A,
    pub cost: StepCost,
}

impl<S, A> Successor<S, A> {
    pub fn new(state: S, action: A, cost: StepCost) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }
}

/// Deterministic single-agent problem explored by the graph search engine.
///
/// Successors are pulled on demand; the engine never materialises the graph.
/// Enumeration order of [`SearchProblem::successors`] must be stable for
/// repeated searches to return the same path.
pub trait SearchProblem {
    type State: Clone + Eq + Hash;
    type Action: Clone;

    fn start_state(&self) -> Self::State;

    fn is_goal_state(&self, state: &Self::State) -> bool;

    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;

    /// Total cost of `actions` taken from the start state, or `None` if any
    /// action is illegal where it is taken.
    fn cost_of_actions(&self, actions: &[Self::Action]) -> Option<PathCost>;
}
