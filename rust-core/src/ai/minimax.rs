use std::str::FromStr;

use log::{debug, trace, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

use super::game::{lookup_evaluator, AgentIndex, Evaluator, GameState, DEFAULT_EVALUATION};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AiStrategy {
    Minimax,
    AlphaBeta,
    Expectimax,
    /// One-ply greedy choice, ties broken at random.
    Reflex,
}

impl AiStrategy {
    fn node_kind(self, agent: AgentIndex) -> NodeKind {
        if agent == 0 {
            NodeKind::Max
        } else if self == AiStrategy::Expectimax {
            NodeKind::Chance
        } else {
            NodeKind::Min
        }
    }

    fn prunes(self) -> bool {
        self == AiStrategy::AlphaBeta
    }
}

impl FromStr for AiStrategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" => Ok(AiStrategy::Minimax),
            "alphabeta" | "alpha-beta" | "alpha_beta" => Ok(AiStrategy::AlphaBeta),
            "expectimax" => Ok(AiStrategy::Expectimax),
            "reflex" | "greedy" => Ok(AiStrategy::Reflex),
            _ => Err(SearchError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AiDifficulty {
    Easy,
    Normal,
    Hard,
    Expert,
}

impl FromStr for AiDifficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(AiDifficulty::Easy),
            "normal" | "medium" => Ok(AiDifficulty::Normal),
            "hard" => Ok(AiDifficulty::Hard),
            "expert" | "extreme" => Ok(AiDifficulty::Expert),
            _ => Err(()),
        }
    }
}

fn default_evaluation() -> String {
    DEFAULT_EVALUATION.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiConfig {
    /// Search depth in plies; one ply is a move by every agent.
    pub depth: u8,
    pub strategy: AiStrategy,
    /// Name of the evaluation function, resolved by [`AiAgent::from_config`].
    #[serde(default = "default_evaluation")]
    pub evaluation: String,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: AiDifficulty) -> Self {
        let (depth, strategy) = match difficulty {
            AiDifficulty::Easy => (1, AiStrategy::Reflex),
            AiDifficulty::Normal => (2, AiStrategy::Minimax),
            AiDifficulty::Hard => (3, AiStrategy::AlphaBeta),
            AiDifficulty::Expert => (4, AiStrategy::AlphaBeta),
        };
        Self {
            depth,
            strategy,
            evaluation: default_evaluation(),
        }
    }

    pub fn with_strategy(mut self, strategy: AiStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_evaluation(mut self, name: impl Into<String>) -> Self {
        self.evaluation = name.into();
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig::from_difficulty(AiDifficulty::Normal)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiDecision<A> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<A>,
    pub evaluation: f64,
    pub depth: u8,
    pub nodes: u64,
    pub strategy: AiStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Max,
    Min,
    Chance,
}

/// Alpha-beta bounds owned by one call frame and copied into each child.
#[derive(Debug, Clone, Copy)]
struct Window {
    alpha: f64,
    beta: f64,
}

impl Window {
    fn open() -> Self {
        Self {
            alpha: f64::NEG_INFINITY,
            beta: f64::INFINITY,
        }
    }
}

struct SearchStats {
    nodes: u64,
}

impl SearchStats {
    fn new() -> Self {
        Self { nodes: 0 }
    }
}

/// Agent and depth of the node reached after `agent` moves. The last agent
/// hands back to agent 0 one ply shallower.
fn next_turn(agent: AgentIndex, depth: u8, num_agents: usize) -> (AgentIndex, u8) {
    if agent + 1 >= num_agents {
        (0, depth.saturating_sub(1))
    } else {
        (agent + 1, depth)
    }
}

/// Chooses moves for agent 0 by depth-limited game-tree search.
pub struct AiAgent<'e, S> {
    config: AiConfig,
    evaluator: Box<dyn Evaluator<S> + 'e>,
    rng: SmallRng,
}

impl<'e, S> AiAgent<'e, S>
where
    S: GameState + 'e,
{
    pub fn new(config: AiConfig, evaluator: impl Evaluator<S> + 'e) -> Self {
        Self {
            config,
            evaluator: Box::new(evaluator),
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn with_seed(config: AiConfig, evaluator: impl Evaluator<S> + 'e, seed: u64) -> Self {
        Self {
            config,
            evaluator: Box::new(evaluator),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Build an agent whose evaluation function is looked up by
    /// [`AiConfig::evaluation`].
    pub fn from_config(config: AiConfig) -> Result<Self, SearchError> {
        let evaluator = lookup_evaluator(&config.evaluation)?;
        Ok(Self {
            config,
            evaluator,
            rng: SmallRng::from_entropy(),
        })
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    pub fn choose_action(&mut self, state: &S) -> Result<S::Action, SearchError> {
        self.decide_action(state)
            .action
            .ok_or(SearchError::NoLegalActions)
    }

    pub fn decide_action(&mut self, state: &S) -> AiDecision<S::Action> {
        let mut stats = SearchStats::new();
        let strategy = self.config.strategy;
        let depth = self.config.depth.max(1);
        if self.config.depth == 0 {
            warn!("{:?}: depth 0 requested, searching depth 1", strategy);
        }

        stats.nodes += 1;
        if state.is_terminal() {
            return self.no_action(state, depth, &stats);
        }

        let actions = state.legal_actions(0);
        if actions.is_empty() {
            warn!("{:?}: controlled agent has no legal action", strategy);
            return self.no_action(state, depth, &stats);
        }

        if strategy == AiStrategy::Reflex {
            return self.reflex_decision(state, actions, &mut stats);
        }

        let (next_agent, next_depth) = next_turn(0, depth, state.num_agents());
        let mut window = Window::open();
        let mut best: Option<(f64, S::Action)> = None;

        for action in actions {
            let child = state.successor(0, &action);
            let value = self.node_value(&child, next_depth, next_agent, window, &mut stats);
            let improves = best.as_ref().map_or(true, |(best_value, _)| value > *best_value);
            if improves {
                best = Some((value, action));
            }
            if strategy.prunes() {
                if let Some((best_value, _)) = &best {
                    window.alpha = window.alpha.max(*best_value);
                }
            }
        }

        let (evaluation, action) = match best {
            Some((value, action)) => (value, Some(action)),
            None => (self.evaluator.evaluate(state), None),
        };

        debug!(
            "{:?} depth {} chose value {} after {} nodes",
            strategy, depth, evaluation, stats.nodes
        );

        AiDecision {
            action,
            evaluation,
            depth,
            nodes: stats.nodes,
            strategy,
        }
    }

    fn node_value(
        &self,
        state: &S,
        depth: u8,
        agent: AgentIndex,
        window: Window,
        stats: &mut SearchStats,
    ) -> f64 {
        stats.nodes += 1;

        if depth == 0 || state.is_terminal() {
            return self.evaluator.evaluate(state);
        }

        let actions = state.legal_actions(agent);
        if actions.is_empty() {
            return self.evaluator.evaluate(state);
        }

        let strategy = self.config.strategy;
        let (next_agent, next_depth) = next_turn(agent, depth, state.num_agents());
        let mut window = window;

        match strategy.node_kind(agent) {
            NodeKind::Max => {
                let mut best = f64::NEG_INFINITY;
                for action in &actions {
                    let child = state.successor(agent, action);
                    let value = self.node_value(&child, next_depth, next_agent, window, stats);
                    best = best.max(value);
                    if strategy.prunes() {
                        if best > window.beta {
                            trace!("max cutoff at agent {} depth {}", agent, depth);
                            return best;
                        }
                        window.alpha = window.alpha.max(best);
                    }
                }
                best
            }
            NodeKind::Min => {
                let mut best = f64::INFINITY;
                for action in &actions {
                    let child = state.successor(agent, action);
                    let value = self.node_value(&child, next_depth, next_agent, window, stats);
                    best = best.min(value);
                    if strategy.prunes() {
                        if best < window.alpha {
                            trace!("min cutoff at agent {} depth {}", agent, depth);
                            return best;
                        }
                        window.beta = window.beta.min(best);
                    }
                }
                best
            }
            NodeKind::Chance => {
                let total: f64 = actions
                    .iter()
                    .map(|action| {
                        let child = state.successor(agent, action);
                        self.node_value(&child, next_depth, next_agent, window, stats)
                    })
                    .sum();
                total / actions.len() as f64
            }
        }
    }

    fn reflex_decision(
        &mut self,
        state: &S,
        actions: Vec<S::Action>,
        stats: &mut SearchStats,
    ) -> AiDecision<S::Action> {
        let scores: Vec<f64> = actions
            .iter()
            .map(|action| {
                stats.nodes += 1;
                self.evaluator.evaluate(&state.successor(0, action))
            })
            .collect();
        let best_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best_indices: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|(_, score)| **score == best_score)
            .map(|(index, _)| index)
            .collect();
        let chosen = best_indices.choose(&mut self.rng).copied().unwrap_or(0);

        debug!(
            "Reflex picked among {} best of {} actions, value {}",
            best_indices.len(),
            actions.len(),
            best_score
        );

        AiDecision {
            action: actions.get(chosen).cloned(),
            evaluation: best_score,
            depth: 1,
            nodes: stats.nodes,
            strategy: AiStrategy::Reflex,
        }
    }

    fn no_action(&self, state: &S, depth: u8, stats: &SearchStats) -> AiDecision<S::Action> {
        AiDecision {
            action: None,
            evaluation: self.evaluator.evaluate(state),
            depth,
            nodes: stats.nodes,
            strategy: self.config.strategy,
        }
    }
}
