use crate::error::SearchError;

/// Agent index within one ply. Agent 0 is the controlled, maximizing agent.
pub type AgentIndex = usize;

/// Multi-agent game position consumed by the game-tree search.
pub trait GameState: Sized {
    type Action: Clone;

    fn num_agents(&self) -> usize;

    fn legal_actions(&self, agent: AgentIndex) -> Vec<Self::Action>;

    fn successor(&self, agent: AgentIndex, action: &Self::Action) -> Self;

    fn is_win(&self) -> bool;

    fn is_lose(&self) -> bool;

    /// Running game score, read by [`ScoreEvaluation`].
    fn score(&self) -> f64;

    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// Static scoring of a position from the controlled agent's point of view.
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S) -> f64,
{
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

/// Returns the game's own score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluation;

impl<S: GameState> Evaluator<S> for ScoreEvaluation {
    fn evaluate(&self, state: &S) -> f64 {
        state.score()
    }
}

pub const DEFAULT_EVALUATION: &str = "score";

/// Resolve an evaluation function by name.
pub fn lookup_evaluator<'a, S>(name: &str) -> Result<Box<dyn Evaluator<S> + 'a>, SearchError>
where
    S: GameState + 'a,
{
    match name.to_ascii_lowercase().as_str() {
        "score" | "scoreevaluationfunction" => Ok(Box::new(ScoreEvaluation)),
        _ => Err(SearchError::unimplemented_hook("evaluation", name)),
    }
}
