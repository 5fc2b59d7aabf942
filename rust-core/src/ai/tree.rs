use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

use super::game::{AgentIndex, GameState};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeEdge {
    pub action: String,
    pub child: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TreeNode {
    /// Static score of this position.
    #[serde(default)]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub children: Vec<TreeEdge>,
}

impl TreeNode {
    pub fn leaf(value: f64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn terminal(value: f64, outcome: Outcome) -> Self {
        Self {
            value,
            outcome: Some(outcome),
            children: Vec::new(),
        }
    }

    pub fn branch<I, A>(children: I) -> Self
    where
        I: IntoIterator<Item = (A, usize)>,
        A: Into<String>,
    {
        Self {
            value: 0.0,
            outcome: None,
            children: children
                .into_iter()
                .map(|(action, child)| TreeEdge {
                    action: action.into(),
                    child,
                })
                .collect(),
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }
}

/// Explicit game tree. Turn order is encoded by depth: the root belongs to
/// agent 0, its children to agent 1, and so on modulo `num_agents`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameTree {
    pub num_agents: usize,
    #[serde(default)]
    pub root: usize,
    pub nodes: Vec<TreeNode>,
}

impl GameTree {
    pub fn new(num_agents: usize, nodes: Vec<TreeNode>) -> Self {
        Self {
            num_agents,
            root: 0,
            nodes,
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.num_agents == 0 {
            return Err(SearchError::InvalidTree {
                reason: "num_agents must be at least 1".to_string(),
            });
        }
        if self.root >= self.nodes.len() {
            return Err(SearchError::InvalidTree {
                reason: format!("root {} out of range", self.root),
            });
        }
        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(edge) = node.children.iter().find(|edge| edge.child >= self.nodes.len()) {
                return Err(SearchError::InvalidTree {
                    reason: format!(
                        "node {index} action `{}` points at missing node {}",
                        edge.action, edge.child
                    ),
                });
            }
            let mut labels = HashSet::new();
            if let Some(edge) = node.children.iter().find(|edge| !labels.insert(&edge.action)) {
                return Err(SearchError::InvalidTree {
                    reason: format!("node {index} has more than one `{}` action", edge.action),
                });
            }
        }
        Ok(())
    }

    /// Root position of a validated tree.
    pub fn position(&self) -> Result<TreePosition<'_>, SearchError> {
        self.validate()?;
        Ok(TreePosition {
            tree: self,
            node: self.root,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreePosition<'a> {
    tree: &'a GameTree,
    node: usize,
}

impl<'a> TreePosition<'a> {
    pub fn node_index(&self) -> usize {
        self.node
    }

    fn node(&self) -> &'a TreeNode {
        &self.tree.nodes[self.node]
    }
}

impl<'a> GameState for TreePosition<'a> {
    type Action = String;

    fn num_agents(&self) -> usize {
        self.tree.num_agents
    }

    fn legal_actions(&self, _agent: AgentIndex) -> Vec<String> {
        self.node()
            .children
            .iter()
            .map(|edge| edge.action.clone())
            .collect()
    }

    fn successor(&self, _agent: AgentIndex, action: &String) -> Self {
        let child = self
            .node()
            .children
            .iter()
            .find(|edge| &edge.action == action)
            .map(|edge| edge.child)
            .unwrap_or(self.node);
        TreePosition {
            tree: self.tree,
            node: child,
        }
    }

    fn is_win(&self) -> bool {
        self.node().outcome == Some(Outcome::Win)
    }

    fn is_lose(&self) -> bool {
        self.node().outcome == Some(Outcome::Lose)
    }

    fn score(&self) -> f64 {
        self.node().value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tree_parses_and_navigates() {
        let tree: GameTree = serde_json::from_value(json!({
            "num_agents": 2,
            "nodes": [
                { "children": [{ "action": "left", "child": 1 }, { "action": "right", "child": 2 }] },
                { "value": 3.0 },
                { "value": -1.0, "outcome": "lose" }
            ]
        }))
        .expect("tree json should parse");
        let root = tree.position().expect("tree should be valid");
        assert_eq!(root.legal_actions(0), vec!["left", "right"]);
        let right = root.successor(0, &"right".to_string());
        assert_eq!(right.node_index(), 2);
        assert!(right.is_lose());
        assert!(right.is_terminal());
        assert_eq!(right.score(), -1.0);
    }

    #[test]
    fn dangling_child_fails_validation() {
        let tree = GameTree::new(2, vec![TreeNode::branch([("only", 7)])]);
        assert!(matches!(tree.validate(), Err(SearchError::InvalidTree { .. })));
    }

    #[test]
    fn repeated_action_label_fails_validation() {
        let tree = GameTree::new(
            2,
            vec![
                TreeNode::branch([("x", 1), ("x", 2)]),
                TreeNode::leaf(1.0),
                TreeNode::leaf(50.0),
            ],
        );
        assert!(matches!(tree.validate(), Err(SearchError::InvalidTree { .. })));
    }

    #[test]
    fn position_of_broken_tree_is_an_error() {
        let tree = GameTree::new(2, vec![TreeNode::branch([("go", 9)])]);
        assert!(matches!(tree.position(), Err(SearchError::InvalidTree { .. })));
    }

    #[test]
    fn zero_agents_fail_validation() {
        let tree = GameTree::new(0, vec![TreeNode::leaf(0.0)]);
        assert!(matches!(tree.validate(), Err(SearchError::InvalidTree { .. })));
    }
}
