//! Course category map as delivered by the server at board initialization.
//!
//! ```json
//! {
//!   "children": ["general", "week-1"],
//!   "entries": {
//!     "general": { "name": "General" },
//!     "week-1": { "name": "Week 1", "children": ["lecture-1"] },
//!     "lecture-1": { "name": "Lecture 1", "is_cohorted": true }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Mapping from topic id to its entry, plus the ordered top-level ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMap {
    /// Top-level topic ids in display order.
    ///
    /// When empty, every entry that is nobody's child is top-level (sorted by id).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(default)]
    pub entries: BTreeMap<String, CategoryEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(default)]
    pub is_cohorted: bool,
}

impl CategoryMap {
    /// Parses a category map from JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads and parses a category map file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read category map from {}", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Failed to parse category map from {}", path.display()))
    }

    /// Adds an entry (builder style, mostly for fixtures).
    #[must_use]
    pub fn with_entry(mut self, id: &str, name: &str, children: &[&str]) -> Self {
        self.entries.insert(
            id.to_string(),
            CategoryEntry {
                name: name.to_string(),
                children: children.iter().map(|c| (*c).to_string()).collect(),
                is_cohorted: false,
            },
        );
        self
    }

    /// Sets the top-level display order (builder style).
    #[must_use]
    pub fn with_roots(mut self, ids: &[&str]) -> Self {
        self.children = ids.iter().map(|id| (*id).to_string()).collect();
        self
    }
}
