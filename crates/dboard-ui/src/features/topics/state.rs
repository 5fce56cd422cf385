use dboard_core::topics::{TopicTree, TreeState, compute_visibility, label_matches, tokenize};

/// What the thread list is browsing. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Following,
    Topic(String),
}

impl Selection {
    pub fn topic_id(&self) -> Option<&str> {
        match self {
            Selection::Topic(id) => Some(id),
            Selection::All | Selection::Following => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub id: String,
    pub label: String,
}

/// Navigation sidebar state.
#[derive(Debug, Clone)]
pub struct TopicsState {
    /// Raw text of the topic filter box.
    pub filter_text: String,
    /// Visibility derived from `filter_text`.
    pub tree_state: TreeState,
    pub selection: Selection,
    /// `ancestors_of(topic) + [topic]`; empty for All/Following.
    pub breadcrumbs: Vec<Crumb>,
    /// Whether the "All Discussions" entry survives the filter.
    pub show_all_item: bool,
    /// Whether the "Posts I'm Following" entry survives the filter.
    pub show_following_item: bool,
    /// Cohort the board is scoped to (privileged users in cohorted courses).
    pub group_id: Option<String>,
}

impl TopicsState {
    pub const ALL_LABEL: &'static str = "All Discussions";
    pub const FOLLOWING_LABEL: &'static str = "Posts I'm Following";

    pub fn new(tree: &TopicTree) -> Self {
        Self {
            filter_text: String::new(),
            tree_state: TreeState::all_visible(tree),
            selection: Selection::All,
            breadcrumbs: Vec::new(),
            show_all_item: true,
            show_following_item: true,
            group_id: None,
        }
    }

    /// Recomputes visibility for a new filter string.
    pub fn set_filter(&mut self, tree: &TopicTree, text: &str) {
        self.filter_text = text.to_string();
        self.tree_state = compute_visibility(tree, text);
        let tokens = tokenize(text);
        self.show_all_item = label_matches(Self::ALL_LABEL, &tokens);
        self.show_following_item = label_matches(Self::FOLLOWING_LABEL, &tokens);
    }

    /// Rebuilds the breadcrumbs from the current selection.
    pub fn reset_breadcrumbs(&mut self, tree: &TopicTree) {
        self.breadcrumbs = match &self.selection {
            Selection::Topic(id) => tree
                .path_to(id)
                .map(|path| {
                    path.into_iter()
                        .map(|node| Crumb {
                            id: node.id.clone(),
                            label: node.label.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            Selection::All | Selection::Following => Vec::new(),
        };
    }

    /// Whether the given tree node is drawn as selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.topic_id() == Some(id)
    }
}
