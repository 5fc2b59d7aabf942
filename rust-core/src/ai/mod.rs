//! Adversarial game-tree search (minimax, alpha-beta, expectimax).

pub mod game;
pub mod minimax;
pub mod tree;

pub use game::{lookup_evaluator, AgentIndex, Evaluator, GameState, ScoreEvaluation};
pub use minimax::{AiAgent, AiConfig, AiDecision, AiDifficulty, AiStrategy};
pub use tree::{GameTree, Outcome, TreeEdge, TreeNode, TreePosition};
