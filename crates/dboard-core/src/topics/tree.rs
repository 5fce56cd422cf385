//! Topic tree derivation from the category map.
//!
//! ## Design
//!
//! - **Immutable**: built once per board, structure never changes afterwards
//! - **Pre-order storage**: nodes live in display order, so a node's
//!   descendants are the contiguous run that follows it
//! - **Synthetic root**: a single hidden root (`ROOT_ID`) owns the top-level topics

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use thiserror::Error;

use super::category_map::CategoryMap;

/// Id of the synthetic root node. Reserved: category maps may not use it.
pub const ROOT_ID: &str = "__root__";

/// A discussion topic (commentable) or an intermediate category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicNode {
    pub id: String,
    pub label: String,
    /// `None` only for the synthetic root.
    pub parent_id: Option<String>,
    /// Child ids in display order.
    pub child_ids: Vec<String>,
    /// Nesting depth (0 = synthetic root, 1 = top-level topic).
    pub depth: usize,
    pub is_leaf: bool,
    pub is_cohorted: bool,
}

impl TopicNode {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// The category map cannot be turned into a tree. Fatal at board construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedHierarchyError {
    #[error("topic id must not be empty")]
    EmptyId,
    #[error("topic id `{0}` is reserved")]
    ReservedId(String),
    #[error("topic `{parent}` references unknown topic `{child}`")]
    UnknownChild { parent: String, child: String },
    #[error("topic `{child}` is listed more than once under `{parent}`")]
    DuplicateChild { parent: String, child: String },
    #[error("topic `{child}` is listed under both `{first}` and `{second}`")]
    MultipleParents {
        child: String,
        first: String,
        second: String,
    },
    #[error("cycle detected at topic `{0}`")]
    Cycle(String),
    #[error("topic `{0}` is not reachable from the top level")]
    Unreachable(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown topic `{0}`")]
pub struct UnknownTopic(pub String);

#[derive(Debug, Clone)]
pub struct TopicTree {
    nodes: Vec<TopicNode>,
    parents: Vec<Option<usize>>,
    subtree_ends: Vec<usize>,
    index: HashMap<String, usize>,
}

impl TopicTree {
    /// Builds the tree from a category map.
    ///
    /// # Errors
    ///
    /// Returns `MalformedHierarchyError` when an entry references a missing
    /// topic, a topic has more than one parent, the map contains a cycle, or
    /// an entry cannot be reached from the top level.
    pub fn from_category_map(map: &CategoryMap) -> Result<Self, MalformedHierarchyError> {
        for id in map.entries.keys() {
            if id.is_empty() {
                return Err(MalformedHierarchyError::EmptyId);
            }
            if id == ROOT_ID {
                return Err(MalformedHierarchyError::ReservedId(id.clone()));
            }
        }

        // Key: child id, Value: parent id
        let mut parent_of: HashMap<&str, &str> = HashMap::new();
        for (id, entry) in &map.entries {
            for child in &entry.children {
                if !map.entries.contains_key(child) {
                    return Err(MalformedHierarchyError::UnknownChild {
                        parent: id.clone(),
                        child: child.clone(),
                    });
                }
                if child == id {
                    return Err(MalformedHierarchyError::Cycle(id.clone()));
                }
                if let Some(first) = parent_of.insert(child.as_str(), id.as_str()) {
                    return Err(if first == id.as_str() {
                        MalformedHierarchyError::DuplicateChild {
                            parent: id.clone(),
                            child: child.clone(),
                        }
                    } else {
                        MalformedHierarchyError::MultipleParents {
                            child: child.clone(),
                            first: first.to_string(),
                            second: id.clone(),
                        }
                    });
                }
            }
        }

        let roots = top_level_ids(map, &parent_of)?;

        let mut tree = Self {
            nodes: Vec::with_capacity(map.entries.len() + 1),
            parents: Vec::with_capacity(map.entries.len() + 1),
            subtree_ends: Vec::with_capacity(map.entries.len() + 1),
            index: HashMap::with_capacity(map.entries.len() + 1),
        };
        tree.index.insert(ROOT_ID.to_string(), 0);
        tree.nodes.push(TopicNode {
            id: ROOT_ID.to_string(),
            label: String::new(),
            parent_id: None,
            child_ids: roots.iter().map(|id| (*id).to_string()).collect(),
            depth: 0,
            is_leaf: roots.is_empty(),
            is_cohorted: false,
        });
        tree.parents.push(None);
        tree.subtree_ends.push(1);

        for root in &roots {
            tree.visit(map, root, 0, 1);
        }
        tree.subtree_ends[0] = tree.nodes.len();

        // Every entry has at most one parent here, so anything the walk from
        // the top level missed either sits on a cycle or was left out of it.
        if let Some(missed) = map.entries.keys().find(|id| !tree.index.contains_key(*id)) {
            return Err(match find_cycle_from(missed, &parent_of) {
                Some(on_cycle) => MalformedHierarchyError::Cycle(on_cycle),
                None => MalformedHierarchyError::Unreachable(missed.clone()),
            });
        }

        Ok(tree)
    }

    fn visit(&mut self, map: &CategoryMap, id: &str, parent_idx: usize, depth: usize) {
        let Some(entry) = map.entries.get(id) else {
            return;
        };
        let idx = self.nodes.len();
        self.index.insert(id.to_string(), idx);
        self.nodes.push(TopicNode {
            id: id.to_string(),
            label: entry.name.clone(),
            parent_id: Some(self.nodes[parent_idx].id.clone()),
            child_ids: entry.children.clone(),
            depth,
            is_leaf: entry.children.is_empty(),
            is_cohorted: entry.is_cohorted,
        });
        self.parents.push(Some(parent_idx));
        self.subtree_ends.push(idx + 1);

        for child in &entry.children {
            self.visit(map, child, idx, depth + 1);
        }
        self.subtree_ends[idx] = self.nodes.len();
    }

    /// The synthetic root.
    pub fn root(&self) -> &TopicNode {
        &self.nodes[0]
    }

    /// Number of topics (the synthetic root is not counted).
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<&TopicNode> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Like [`TopicTree::get`] but reports unknown ids as an error.
    pub fn node(&self, id: &str) -> Result<&TopicNode, UnknownTopic> {
        self.get(id).ok_or_else(|| UnknownTopic(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All topics in display (pre-order) order, without the synthetic root.
    pub fn topics(&self) -> impl Iterator<Item = &TopicNode> {
        self.nodes.iter().skip(1)
    }

    pub fn children_of(&self, id: &str) -> Result<Vec<&TopicNode>, UnknownTopic> {
        let node = self.node(id)?;
        Ok(node
            .child_ids
            .iter()
            .filter_map(|child| self.get(child))
            .collect())
    }

    /// Ancestors from the top-level topic down to the parent.
    ///
    /// The synthetic root is omitted, so top-level topics have no ancestors.
    pub fn ancestors_of(&self, id: &str) -> Result<Vec<&TopicNode>, UnknownTopic> {
        let idx = self.position(id)?;
        let mut ancestors = Vec::new();
        let mut current = self.parents[idx];
        while let Some(parent) = current {
            if parent == 0 {
                break;
            }
            ancestors.push(&self.nodes[parent]);
            current = self.parents[parent];
        }
        ancestors.reverse();
        Ok(ancestors)
    }

    /// `ancestors_of(id)` followed by the node itself (breadcrumb order).
    pub fn path_to(&self, id: &str) -> Result<Vec<&TopicNode>, UnknownTopic> {
        let mut path = self.ancestors_of(id)?;
        if id != ROOT_ID {
            path.push(self.node(id)?);
        }
        Ok(path)
    }

    /// Every node below `id`, at all levels, in display order.
    pub fn descendants_of(&self, id: &str) -> Result<Vec<&TopicNode>, UnknownTopic> {
        let idx = self.position(id)?;
        let range = self.subtree_range(idx);
        Ok(self.nodes[range.start + 1..range.end].iter().collect())
    }

    /// Leaf topic ids under `id` in display order; a leaf yields itself.
    ///
    /// This is the commentable scope used when searching or listing under an
    /// intermediate category.
    pub fn leaf_commentable_ids_under(&self, id: &str) -> Result<Vec<String>, UnknownTopic> {
        let node = self.node(id)?;
        if node.is_leaf && !node.is_root() {
            return Ok(vec![node.id.clone()]);
        }
        Ok(self
            .descendants_of(id)?
            .into_iter()
            .filter(|n| n.is_leaf)
            .map(|n| n.id.clone())
            .collect())
    }

    /// Comma-joined form of [`TopicTree::leaf_commentable_ids_under`].
    pub fn commentable_ids_param(&self, id: &str) -> Result<String, UnknownTopic> {
        Ok(self.leaf_commentable_ids_under(id)?.join(","))
    }

    fn position(&self, id: &str) -> Result<usize, UnknownTopic> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| UnknownTopic(id.to_string()))
    }

    pub(crate) fn nodes(&self) -> &[TopicNode] {
        &self.nodes
    }

    pub(crate) fn parent_index(&self, idx: usize) -> Option<usize> {
        self.parents[idx]
    }

    /// Index range covering `idx` and all of its descendants.
    pub(crate) fn subtree_range(&self, idx: usize) -> Range<usize> {
        idx..self.subtree_ends[idx]
    }
}

fn top_level_ids<'a>(
    map: &'a CategoryMap,
    parent_of: &HashMap<&str, &str>,
) -> Result<Vec<&'a str>, MalformedHierarchyError> {
    if map.children.is_empty() {
        return Ok(map
            .entries
            .keys()
            .map(String::as_str)
            .filter(|id| !parent_of.contains_key(id))
            .collect());
    }

    let mut seen = HashSet::new();
    for id in &map.children {
        if !map.entries.contains_key(id) {
            return Err(MalformedHierarchyError::UnknownChild {
                parent: ROOT_ID.to_string(),
                child: id.clone(),
            });
        }
        if let Some(parent) = parent_of.get(id.as_str()) {
            return Err(MalformedHierarchyError::MultipleParents {
                child: id.clone(),
                first: ROOT_ID.to_string(),
                second: (*parent).to_string(),
            });
        }
        if !seen.insert(id.as_str()) {
            return Err(MalformedHierarchyError::DuplicateChild {
                parent: ROOT_ID.to_string(),
                child: id.clone(),
            });
        }
    }
    Ok(map.children.iter().map(String::as_str).collect())
}

/// Follows parent links from `start`; returns a node on the cycle if one is hit.
fn find_cycle_from<'a>(start: &'a str, parent_of: &HashMap<&'a str, &'a str>) -> Option<String> {
    let mut seen = HashSet::new();
    let mut current = start;
    loop {
        if !seen.insert(current) {
            return Some(current.to_string());
        }
        current = *parent_of.get(current)?;
    }
}
