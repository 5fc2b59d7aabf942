use std::collections::HashSet;
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

use super::frontier::{Frontier, PriorityQueue, Queue, Stack};
use super::heuristic::{Heuristic, NullHeuristic};
use super::problem::{PathCost, SearchProblem};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    DepthFirst,
    BreadthFirst,
    UniformCost,
    AStar,
}

impl Algorithm {
    fn uses_heuristic(self) -> bool {
        matches!(self, Algorithm::AStar)
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" | "depthfirst" => Ok(Algorithm::DepthFirst),
            "bfs" | "breadth-first" | "breadthfirst" => Ok(Algorithm::BreadthFirst),
            "ucs" | "uniform-cost" | "uniformcost" => Ok(Algorithm::UniformCost),
            "astar" | "a*" | "a-star" => Ok(Algorithm::AStar),
            _ => Err(SearchError::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// A goal-reaching path found by [`search`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchOutcome<S, A> {
    pub actions: Vec<A>,
    /// Start state followed by every state the actions lead through.
    pub states: Vec<S>,
    pub cost: PathCost,
    /// Number of states expanded before the goal was popped.
    pub expanded: usize,
}

struct Entry<S, A> {
    states: Vec<S>,
    actions: Vec<A>,
    cost: PathCost,
}

impl<S: Clone, A: Clone> Entry<S, A> {
    fn extend(&self, state: S, action: A, step_cost: f64) -> Self {
        let mut states = Vec::with_capacity(self.states.len() + 1);
        states.extend_from_slice(&self.states);
        states.push(state);
        let mut actions = Vec::with_capacity(self.actions.len() + 1);
        actions.extend_from_slice(&self.actions);
        actions.push(action);
        Entry {
            states,
            actions,
            cost: self.cost + step_cost,
        }
    }
}

/// Run `algorithm` on `problem`. A* consults `heuristic`; the other
/// algorithms ignore it.
pub fn search<P, H>(
    problem: &P,
    algorithm: Algorithm,
    heuristic: &H,
) -> Result<SearchOutcome<P::State, P::Action>, SearchError>
where
    P: SearchProblem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    match algorithm {
        Algorithm::DepthFirst => run(problem, Stack::default(), algorithm, heuristic),
        Algorithm::BreadthFirst => run(problem, Queue::default(), algorithm, heuristic),
        Algorithm::UniformCost | Algorithm::AStar => {
            run(problem, PriorityQueue::default(), algorithm, heuristic)
        }
    }
}

pub fn depth_first_search<P>(problem: &P) -> Result<SearchOutcome<P::State, P::Action>, SearchError>
where
    P: SearchProblem + ?Sized,
{
    search(problem, Algorithm::DepthFirst, &NullHeuristic)
}

pub fn breadth_first_search<P>(
    problem: &P,
) -> Result<SearchOutcome<P::State, P::Action>, SearchError>
where
    P: SearchProblem + ?Sized,
{
    search(problem, Algorithm::BreadthFirst, &NullHeuristic)
}

pub fn uniform_cost_search<P>(
    problem: &P,
) -> Result<SearchOutcome<P::State, P::Action>, SearchError>
where
    P: SearchProblem + ?Sized,
{
    search(problem, Algorithm::UniformCost, &NullHeuristic)
}

pub fn a_star_search<P, H>(
    problem: &P,
    heuristic: &H,
) -> Result<SearchOutcome<P::State, P::Action>, SearchError>
where
    P: SearchProblem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    search(problem, Algorithm::AStar, heuristic)
}

fn run<P, H, F>(
    problem: &P,
    mut frontier: F,
    algorithm: Algorithm,
    heuristic: &H,
) -> Result<SearchOutcome<P::State, P::Action>, SearchError>
where
    P: SearchProblem + ?Sized,
    H: Heuristic<P> + ?Sized,
    F: Frontier<Entry<P::State, P::Action>>,
{
    let start = problem.start_state();
    let start_priority = if algorithm.uses_heuristic() {
        heuristic.estimate(&start, problem)
    } else {
        0.0
    };
    frontier.push(
        Entry {
            states: vec![start],
            actions: Vec::new(),
            cost: 0.0,
        },
        start_priority,
    );

    let mut visited: HashSet<P::State> = HashSet::new();

    while let Some(entry) = frontier.pop() {
        let Some(current) = entry.states.last() else {
            continue;
        };

        if problem.is_goal_state(current) {
            debug!(
                "{:?} reached goal: {} actions, cost {}, {} expanded",
                algorithm,
                entry.actions.len(),
                entry.cost,
                visited.len()
            );
            return Ok(SearchOutcome {
                actions: entry.actions,
                states: entry.states,
                cost: entry.cost,
                expanded: visited.len(),
            });
        }

        if visited.contains(current) {
            continue;
        }
        visited.insert(current.clone());

        let successors = problem.successors(current);
        trace!(
            "{:?} expanding node {} with {} successors",
            algorithm,
            visited.len(),
            successors.len()
        );

        for successor in successors {
            let next = entry.extend(successor.state, successor.action, successor.cost);
            let priority = match algorithm {
                Algorithm::DepthFirst | Algorithm::BreadthFirst => 0.0,
                Algorithm::UniformCost => next.cost,
                Algorithm::AStar => {
                    let estimate = next
                        .states
                        .last()
                        .map(|state| heuristic.estimate(state, problem))
                        .unwrap_or(0.0);
                    next.cost + estimate
                }
            };
            frontier.push(next, priority);
        }
    }

    debug!(
        "{:?} exhausted frontier after {} expansions",
        algorithm,
        visited.len()
    );
    Err(SearchError::NoSolution {
        expanded: visited.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::explicit::GraphProblem;
    use crate::search::problem::Successor;
    use std::cell::RefCell;
    use std::collections::HashMap;

    fn diamond() -> GraphProblem {
        // S -> A (1) -> G (5), S -> B (2) -> G (1); cheapest is via B.
        GraphProblem::new("S", ["G"])
            .with_edge("S", "A", "S->A", 1.0)
            .with_edge("S", "B", "S->B", 2.0)
            .with_edge("A", "G", "A->G", 5.0)
            .with_edge("B", "G", "B->G", 1.0)
    }

    #[test]
    fn algorithm_parses_short_names() {
        assert_eq!("dfs".parse::<Algorithm>(), Ok(Algorithm::DepthFirst));
        assert_eq!("BFS".parse::<Algorithm>(), Ok(Algorithm::BreadthFirst));
        assert_eq!("ucs".parse::<Algorithm>(), Ok(Algorithm::UniformCost));
        assert_eq!("astar".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert!(matches!(
            "greedy".parse::<Algorithm>(),
            Err(SearchError::UnknownAlgorithm { .. })
        ));
    }

    #[test]
    fn uniform_cost_prefers_cheaper_longer_branch() {
        let outcome = uniform_cost_search(&diamond()).expect("goal reachable");
        assert_eq!(outcome.actions, vec!["S->B", "B->G"]);
        assert_eq!(outcome.cost, 3.0);
        assert_eq!(outcome.states, vec!["S", "B", "G"]);
    }

    #[test]
    fn breadth_first_returns_first_enqueued_shallow_path() {
        let outcome = breadth_first_search(&diamond()).expect("goal reachable");
        assert_eq!(outcome.actions, vec!["S->A", "A->G"]);
        assert_eq!(outcome.cost, 6.0);
    }

    #[test]
    fn depth_first_follows_last_pushed_successor() {
        let outcome = depth_first_search(&diamond()).expect("goal reachable");
        assert_eq!(outcome.actions, vec!["S->B", "B->G"]);
    }

    #[test]
    fn a_star_with_inadmissible_heuristic_may_be_suboptimal() {
        let problem = diamond().with_estimate("B", 100.0);
        let heuristic = |state: &String, problem: &GraphProblem| problem.estimate(state);
        let outcome = a_star_search(&problem, &heuristic).expect("goal reachable");
        assert_eq!(outcome.actions, vec!["S->A", "A->G"]);
        assert_eq!(outcome.cost, 6.0);
    }

    #[test]
    fn unreachable_goal_reports_no_solution() {
        let problem = GraphProblem::new("S", ["G"])
            .with_edge("S", "A", "S->A", 1.0)
            .with_edge("A", "S", "A->S", 1.0);
        for algorithm in [
            Algorithm::DepthFirst,
            Algorithm::BreadthFirst,
            Algorithm::UniformCost,
            Algorithm::AStar,
        ] {
            let result = search(&problem, algorithm, &NullHeuristic);
            assert_eq!(result, Err(SearchError::NoSolution { expanded: 2 }));
        }
    }

    struct CountingProblem {
        inner: GraphProblem,
        expansions: RefCell<HashMap<String, usize>>,
    }

    impl SearchProblem for CountingProblem {
        type State = String;
        type Action = String;

        fn start_state(&self) -> String {
            self.inner.start_state()
        }

        fn is_goal_state(&self, state: &String) -> bool {
            self.inner.is_goal_state(state)
        }

        fn successors(&self, state: &String) -> Vec<Successor<String, String>> {
            *self
                .expansions
                .borrow_mut()
                .entry(state.clone())
                .or_insert(0) += 1;
            self.inner.successors(state)
        }

        fn cost_of_actions(&self, actions: &[String]) -> Option<f64> {
            self.inner.cost_of_actions(actions)
        }
    }

    #[test]
    fn no_state_is_expanded_twice() {
        // Dense cyclic graph with many duplicate routes to every node.
        let mut inner = GraphProblem::new("n0", ["missing"]);
        for from in 0..5 {
            for to in 0..5 {
                if from != to {
                    inner = inner.with_edge(
                        &format!("n{from}"),
                        &format!("n{to}"),
                        &format!("{from}->{to}"),
                        1.0,
                    );
                }
            }
        }
        for algorithm in [
            Algorithm::DepthFirst,
            Algorithm::BreadthFirst,
            Algorithm::UniformCost,
            Algorithm::AStar,
        ] {
            let problem = CountingProblem {
                inner: inner.clone(),
                expansions: RefCell::new(HashMap::new()),
            };
            let result = search(&problem, algorithm, &NullHeuristic);
            assert_eq!(result, Err(SearchError::NoSolution { expanded: 5 }));
            let expansions = problem.expansions.borrow();
            assert_eq!(expansions.len(), 5, "{algorithm:?} should reach every node");
            assert!(
                expansions.values().all(|&count| count == 1),
                "{algorithm:?} expanded a state twice: {expansions:?}"
            );
        }
    }
}
