use dboard_core::api::NewThread;
use dboard_core::context::BoardContext;
use dboard_core::topics::TopicTree;
use thiserror::Error;

use crate::common::RequestState;
use crate::events::ComposerField;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposerError {
    #[error("a title is required")]
    MissingTitle,
    #[error("a post body is required")]
    MissingBody,
    #[error("choose a topic for the new post")]
    MissingTopic,
    #[error("topic `{0}` does not exist")]
    UnknownTopic(String),
    #[error("`{0}` is a category; pick one of its topics")]
    NotALeaf(String),
}

/// New-post form.
#[derive(Debug, Clone)]
pub struct ComposerState {
    pub title: String,
    pub body: String,
    pub topic_id: Option<String>,
    pub follow: bool,
    pub anonymous: bool,
    pub anonymous_to_peers: bool,
    pub group_id: Option<String>,
    /// Last validation or submission error, shown above the form.
    pub error: Option<String>,
    pub request: RequestState,
}

impl Default for ComposerState {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            topic_id: None,
            follow: true,
            anonymous: false,
            anonymous_to_peers: false,
            group_id: None,
            error: None,
            request: RequestState::default(),
        }
    }
}

impl ComposerState {
    pub fn edit(&mut self, field: ComposerField) {
        match field {
            ComposerField::Title(title) => self.title = title,
            ComposerField::Body(body) => self.body = body,
            ComposerField::Topic(id) => self.topic_id = Some(id),
            ComposerField::Follow(follow) => self.follow = follow,
            ComposerField::Anonymous(anonymous) => self.anonymous = anonymous,
            ComposerField::AnonymousToPeers(value) => self.anonymous_to_peers = value,
            ComposerField::Group(group) => self.group_id = group,
        }
        self.error = None;
    }

    /// Preselects `topic_id` when nothing is chosen yet and it is postable.
    pub fn preselect(&mut self, tree: &TopicTree, topic_id: Option<&str>) {
        if self.topic_id.is_some() {
            return;
        }
        self.topic_id = topic_id
            .filter(|id| tree.get(id).is_some_and(|node| node.is_leaf && !node.is_root()))
            .map(str::to_string);
    }

    /// Checks the form and returns the target commentable and the payload.
    pub fn validate(
        &self,
        tree: &TopicTree,
        ctx: &BoardContext,
    ) -> Result<(String, NewThread), ComposerError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ComposerError::MissingTitle);
        }
        let body = self.body.trim();
        if body.is_empty() {
            return Err(ComposerError::MissingBody);
        }
        let topic_id = self.topic_id.as_deref().ok_or(ComposerError::MissingTopic)?;
        let node = tree
            .get(topic_id)
            .filter(|node| !node.is_root())
            .ok_or_else(|| ComposerError::UnknownTopic(topic_id.to_string()))?;
        if !node.is_leaf {
            return Err(ComposerError::NotALeaf(node.label.clone()));
        }

        let settings = &ctx.course_settings;
        let group_id = if node.is_cohorted && ctx.can_select_group() {
            self.group_id.clone()
        } else {
            None
        };
        Ok((
            node.id.clone(),
            NewThread {
                title: title.to_string(),
                body: body.to_string(),
                anonymous: settings.allow_anonymous && self.anonymous,
                anonymous_to_peers: settings.allow_anonymous_to_peers && self.anonymous_to_peers,
                auto_subscribe: self.follow,
                group_id,
            },
        ))
    }

    /// Clears the form after a post or cancel, keeping the topic choice.
    pub fn reset(&mut self) {
        let topic_id = self.topic_id.take();
        *self = Self {
            topic_id,
            ..Self::default()
        };
    }
}
