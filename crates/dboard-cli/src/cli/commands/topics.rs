//! Topic tree printing.

use std::path::Path;

use anyhow::{Context, Result};
use dboard_core::topics::{CategoryMap, TopicTree};
use dboard_ui::features::topics::TopicsState;
use tracing::debug;

pub fn run(map_path: &Path, filter: Option<&str>, ids_under: Option<&str>) -> Result<()> {
    let map = CategoryMap::load(map_path)?;
    let tree = TopicTree::from_category_map(&map)
        .with_context(|| format!("invalid category map {}", map_path.display()))?;

    if let Some(id) = ids_under {
        let ids = tree.commentable_ids_param(id)?;
        println!("{ids}");
        return Ok(());
    }

    let mut topics = TopicsState::new(&tree);
    topics.set_filter(&tree, filter.unwrap_or_default());
    debug!(
        filter = ?filter,
        visible = topics.tree_state.visible_count(&tree),
        total = tree.len(),
        "filtered topics"
    );

    if topics.show_all_item {
        println!("{}", TopicsState::ALL_LABEL);
    }
    if topics.show_following_item {
        println!("{}", TopicsState::FOLLOWING_LABEL);
    }
    for node in topics.tree_state.visible_topics(&tree) {
        let indent = "  ".repeat(node.depth.saturating_sub(1));
        println!("{indent}{} [{}]", node.label, node.id);
    }
    Ok(())
}
