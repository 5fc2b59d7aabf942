//! Single-agent graph search (DFS, BFS, UCS, A*).

pub mod explicit;
pub mod frontier;
pub mod graph;
pub mod heuristic;
pub mod problem;

pub use explicit::{Edge, GraphProblem, TableHeuristic};
pub use frontier::{Frontier, PriorityQueue, Queue, Stack};
pub use graph::{
    a_star_search, breadth_first_search, depth_first_search, search, uniform_cost_search,
    Algorithm, SearchOutcome,
};
pub use heuristic::{lookup_heuristic, manhattan_distance, Heuristic, NullHeuristic};
pub use problem::{PathCost, SearchProblem, StepCost, Successor};
