pub mod ai;
pub mod error;
mod logging;
pub mod search;

use gloo_timers::future::TimeoutFuture;
use serde_wasm_bindgen::{from_value, to_value};
use std::str::FromStr;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::js_sys::Promise;

pub use ai::{
    lookup_evaluator, AgentIndex, AiAgent, AiConfig, AiDecision, AiDifficulty, AiStrategy,
    Evaluator, GameState, GameTree, Outcome, ScoreEvaluation, TreeEdge, TreeNode, TreePosition,
};
pub use error::SearchError;
pub use search::{
    a_star_search, breadth_first_search, depth_first_search, lookup_heuristic,
    manhattan_distance, search, uniform_cost_search, Algorithm, Edge, Frontier, GraphProblem,
    Heuristic, NullHeuristic, PathCost, PriorityQueue, Queue, SearchOutcome, SearchProblem,
    Stack, StepCost, Successor, TableHeuristic,
};

#[cfg(all(feature = "wee_alloc", target_arch = "wasm32"))]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn start() {
    set_panic_hook();
    logging::init();
}

fn to_js_error(error: SearchError) -> JsValue {
    to_value(&error).unwrap_or_else(|serialize_err| JsValue::from_str(&serialize_err.to_string()))
}

fn serde_to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn parse_problem(problem_json: &str) -> Result<GraphProblem, SearchError> {
    let problem: GraphProblem =
        serde_json::from_str(problem_json).map_err(|error| SearchError::InvalidProblem {
            reason: error.to_string(),
        })?;
    problem.validate()?;
    Ok(problem)
}

/// Run a graph search over an explicit problem. `heuristic` names a
/// registered heuristic, or `"table"` for the problem's own estimates.
pub fn solve_problem(
    problem: &GraphProblem,
    algorithm: &str,
    heuristic: Option<&str>,
) -> Result<SearchOutcome<String, String>, SearchError> {
    let algorithm = Algorithm::from_str(algorithm)?;
    match heuristic.unwrap_or("null") {
        "table" => search(problem, algorithm, &TableHeuristic),
        name => {
            let heuristic = lookup_heuristic::<GraphProblem>(name)?;
            search(problem, algorithm, &*heuristic)
        }
    }
}

/// JSON in, JSON out counterpart of [`solve_problem`].
pub fn solve_graph_json(
    problem_json: &str,
    algorithm: &str,
    heuristic: Option<&str>,
) -> Result<String, SearchError> {
    let problem = parse_problem(problem_json)?;
    let outcome = solve_problem(&problem, algorithm, heuristic)?;
    serde_json::to_string(&outcome).map_err(|error| SearchError::InvalidProblem {
        reason: error.to_string(),
    })
}

/// Build a game-tree config: difficulty preset first, then overrides.
pub fn tree_config(
    difficulty: Option<&str>,
    strategy: Option<&str>,
    depth: Option<u8>,
) -> Result<AiConfig, SearchError> {
    let difficulty = difficulty
        .and_then(|value| AiDifficulty::from_str(value).ok())
        .unwrap_or(AiDifficulty::Normal);
    let mut config = AiConfig::from_difficulty(difficulty);
    if let Some(strategy) = strategy {
        config = config.with_strategy(AiStrategy::from_str(strategy)?);
    }
    if let Some(depth) = depth {
        if depth == 0 {
            return Err(SearchError::InvalidConfig {
                reason: "depth must be at least 1".to_string(),
            });
        }
        config = config.with_depth(depth);
    }
    Ok(config)
}

pub fn decide_on_tree(tree: &GameTree, config: AiConfig) -> Result<AiDecision<String>, SearchError> {
    let root = tree.position()?;
    let mut agent = AiAgent::from_config(config)?;
    Ok(agent.decide_action(&root))
}

/// JSON in, JSON out counterpart of [`decide_on_tree`].
pub fn choose_tree_action_json(
    tree_json: &str,
    difficulty: Option<&str>,
    strategy: Option<&str>,
    depth: Option<u8>,
) -> Result<String, SearchError> {
    let tree: GameTree =
        serde_json::from_str(tree_json).map_err(|error| SearchError::InvalidTree {
            reason: error.to_string(),
        })?;
    let config = tree_config(difficulty, strategy, depth)?;
    let decision = decide_on_tree(&tree, config)?;
    serde_json::to_string(&decision).map_err(|error| SearchError::InvalidTree {
        reason: error.to_string(),
    })
}

/// Holds one graph problem so JS can query it repeatedly.
#[wasm_bindgen]
pub struct GraphSolver {
    problem: GraphProblem,
}

#[wasm_bindgen]
impl GraphSolver {
    #[wasm_bindgen(constructor)]
    pub fn new(problem_json: &str) -> Result<GraphSolver, JsValue> {
        let problem = parse_problem(problem_json).map_err(to_js_error)?;
        Ok(GraphSolver { problem })
    }

    pub fn problem_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.problem).map_err(serde_to_js_error)
    }

    pub fn solve(&self, algorithm: &str, heuristic: Option<String>) -> Result<String, JsValue> {
        let outcome =
            solve_problem(&self.problem, algorithm, heuristic.as_deref()).map_err(to_js_error)?;
        serde_json::to_string(&outcome).map_err(serde_to_js_error)
    }

    /// Cost of a JSON array of actions, or `undefined` if any is illegal.
    pub fn cost_of_actions(&self, actions_json: &str) -> Result<Option<f64>, JsValue> {
        let actions: Vec<String> = serde_json::from_str(actions_json).map_err(serde_to_js_error)?;
        Ok(self.problem.cost_of_actions(&actions))
    }
}

#[wasm_bindgen(js_name = "solveGraph")]
pub fn solve_graph(
    problem_json: &str,
    algorithm: &str,
    heuristic: Option<String>,
) -> Result<String, JsValue> {
    solve_graph_json(problem_json, algorithm, heuristic.as_deref()).map_err(to_js_error)
}

#[wasm_bindgen(js_name = "chooseTreeAction")]
pub fn choose_tree_action(
    tree: JsValue,
    difficulty: Option<String>,
    strategy: Option<String>,
    depth: Option<u8>,
) -> Result<JsValue, JsValue> {
    let tree: GameTree = from_value(tree).map_err(JsValue::from)?;
    let config = tree_config(difficulty.as_deref(), strategy.as_deref(), depth)
        .map_err(to_js_error)?;
    let decision = decide_on_tree(&tree, config).map_err(to_js_error)?;
    to_value(&decision).map_err(JsValue::from)
}

#[wasm_bindgen(js_name = "thinkTreeAction")]
pub fn think_tree_action(
    tree_json: String,
    difficulty: Option<String>,
    strategy: Option<String>,
    depth: Option<u8>,
    delay_ms: Option<u32>,
) -> Promise {
    let delay = delay_ms.unwrap_or(0);

    future_to_promise(async move {
        if delay > 0 {
            TimeoutFuture::new(delay).await;
        }
        let json = choose_tree_action_json(
            &tree_json,
            difficulty.as_deref(),
            strategy.as_deref(),
            depth,
        )
        .map_err(to_js_error)?;
        Ok(JsValue::from_str(&json))
    })
}

#[cfg(feature = "console_error_panic_hook")]
fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

#[cfg(not(feature = "console_error_panic_hook"))]
fn set_panic_hook() {}
