#![cfg(target_arch = "wasm32")]

use pursuit_search::{solve_graph, GraphSolver};
use wasm_bindgen_test::*;

const PROBLEM: &str = r#"{
    "start": "A",
    "goals": ["C"],
    "edges": [
        { "from": "A", "to": "B", "action": "A->B" },
        { "from": "B", "to": "C", "action": "B->C" }
    ]
}"#;

#[wasm_bindgen_test]
fn solve_graph_returns_outcome_json() {
    let json = solve_graph(PROBLEM, "bfs", None).expect("problem should solve");
    let value: serde_json::Value = serde_json::from_str(&json).expect("outcome json");
    assert_eq!(value["actions"], serde_json::json!(["A->B", "B->C"]));
}

#[wasm_bindgen_test]
fn graph_solver_prices_action_sequences() {
    let solver = GraphSolver::new(PROBLEM).expect("problem should load");
    let cost = solver
        .cost_of_actions(r#"["A->B", "B->C"]"#)
        .expect("actions json should parse");
    assert_eq!(cost, Some(2.0));
    let illegal = solver
        .cost_of_actions(r#"["B->C"]"#)
        .expect("actions json should parse");
    assert_eq!(illegal, None);
}
