use crate::error::SearchError;

use super::problem::SearchProblem;

/// Estimate of the remaining cost from a state to the nearest goal.
///
/// A* is only optimal when the estimate is admissible (never above the true
/// remaining cost). The engine does not check this.
pub trait Heuristic<P: SearchProblem + ?Sized> {
    fn estimate(&self, state: &P::State, problem: &P) -> f64;
}

impl<P, F> Heuristic<P> for F
where
    P: SearchProblem + ?Sized,
    F: Fn(&P::State, &P) -> f64,
{
    fn estimate(&self, state: &P::State, problem: &P) -> f64 {
        self(state, problem)
    }
}

/// Always zero. A* with this heuristic degenerates to uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHeuristic;

impl<P: SearchProblem + ?Sized> Heuristic<P> for NullHeuristic {
    fn estimate(&self, _state: &P::State, _problem: &P) -> f64 {
        0.0
    }
}

/// Resolve a problem-independent heuristic by name.
pub fn lookup_heuristic<'a, P>(name: &str) -> Result<Box<dyn Heuristic<P> + 'a>, SearchError>
where
    P: SearchProblem + 'a,
{
    match name.to_ascii_lowercase().as_str() {
        "null" | "nullheuristic" | "none" => Ok(Box::new(NullHeuristic)),
        _ => Err(SearchError::unimplemented_hook("heuristic", name)),
    }
}

pub fn manhattan_distance(a: (i32, i32), b: (i32, i32)) -> u32 {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}
