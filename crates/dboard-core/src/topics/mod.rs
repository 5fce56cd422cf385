//! Discussion topics: the course category map, the topic tree built from it,
//! and the free-text filter that decides which tree nodes are visible.
//!
//! ## Module Structure
//!
//! - `category_map.rs`: Server-provided category map (wire format)
//! - `tree.rs`: Immutable `TopicTree` with ancestor/descendant queries
//! - `filter.rs`: `compute_visibility` and the derived `TreeState`

pub mod category_map;
pub mod filter;
pub mod tree;

pub use category_map::{CategoryEntry, CategoryMap};
pub use filter::{NodeState, TreeState, compute_visibility, label_matches, tokenize};
pub use tree::{MalformedHierarchyError, ROOT_ID, TopicNode, TopicTree, UnknownTopic};
