//! Topic filtering.
//!
//! A node matches when every whitespace-separated word of the filter is a
//! case-insensitive substring of its label (word order is irrelevant). A node
//! is visible when it matches, or an ancestor matches, or a descendant
//! matches, so hits keep their surrounding context.

use std::collections::HashMap;

use super::tree::{TopicNode, TopicTree};

/// Per-node display state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeState {
    pub visible: bool,
    pub expanded: bool,
}

/// Visibility of every node for one filter string. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeState {
    tokens: Vec<String>,
    states: HashMap<String, NodeState>,
}

impl TreeState {
    /// State with every node visible and every branch expanded.
    pub fn all_visible(tree: &TopicTree) -> Self {
        compute_visibility(tree, "")
    }

    pub fn get(&self, id: &str) -> Option<NodeState> {
        self.states.get(id).copied()
    }

    /// Unknown ids are reported as hidden.
    pub fn is_visible(&self, id: &str) -> bool {
        self.get(id).is_some_and(|state| state.visible)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.get(id).is_some_and(|state| state.expanded)
    }

    /// Whether a non-blank filter produced this state.
    pub fn is_filtered(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Lowercased filter words this state was computed from.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Visible topics in display order (synthetic root excluded).
    pub fn visible_topics<'a>(&self, tree: &'a TopicTree) -> Vec<&'a TopicNode> {
        tree.topics().filter(|node| self.is_visible(&node.id)).collect()
    }

    pub fn visible_count(&self, tree: &TopicTree) -> usize {
        tree.topics().filter(|node| self.is_visible(&node.id)).count()
    }
}

/// Splits a filter string into lowercase words.
pub fn tokenize(filter_text: &str) -> Vec<String> {
    filter_text
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Returns true if every token occurs somewhere in the label (case-insensitive).
pub fn label_matches(label: &str, tokens: &[String]) -> bool {
    let label = label.to_lowercase();
    tokens.iter().all(|token| label.contains(token.as_str()))
}

/// Computes the visibility of every tree node for `filter_text`.
///
/// A blank filter makes every node visible and leaves every branch expanded.
/// Otherwise a branch is expanded exactly when one of its children is visible.
pub fn compute_visibility(tree: &TopicTree, filter_text: &str) -> TreeState {
    let tokens = tokenize(filter_text);
    let nodes = tree.nodes();
    let mut visible = vec![tokens.is_empty(); nodes.len()];
    // The synthetic root is the container for everything else.
    visible[0] = true;

    if !tokens.is_empty() {
        for (idx, node) in nodes.iter().enumerate().skip(1) {
            if !label_matches(&node.label, &tokens) {
                continue;
            }
            for flag in &mut visible[tree.subtree_range(idx)] {
                *flag = true;
            }
            let mut current = tree.parent_index(idx);
            while let Some(parent) = current {
                // A visible non-root ancestor already has its own chain marked.
                if visible[parent] && parent != 0 {
                    break;
                }
                visible[parent] = true;
                current = tree.parent_index(parent);
            }
        }
    }

    let mut has_visible_child = vec![false; nodes.len()];
    for idx in 1..nodes.len() {
        if visible[idx]
            && let Some(parent) = tree.parent_index(idx)
        {
            has_visible_child[parent] = true;
        }
    }

    let states = nodes
        .iter()
        .enumerate()
        .map(|(idx, node)| {
            let expanded = !node.is_leaf && (tokens.is_empty() || has_visible_child[idx]);
            (
                node.id.clone(),
                NodeState {
                    visible: visible[idx],
                    expanded,
                },
            )
        })
        .collect();

    TreeState { tokens, states }
}
