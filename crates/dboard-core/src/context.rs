//! Per-board context.
//!
//! Everything the board needs to know about the course and the viewing user
//! is carried here and handed to the board at construction.

use serde::{Deserialize, Serialize};

use crate::api::{DiscussionThread, ThreadPage};
use crate::topics::CategoryMap;

/// Thread sort order requested from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Activity,
    Comments,
    Votes,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Activity => "activity",
            SortKey::Comments => "comments",
            SortKey::Votes => "votes",
        }
    }
}

/// Forum role of a user within the course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Student,
    Moderator,
    Administrator,
    #[serde(rename = "Community TA")]
    CommunityTa,
    #[serde(rename = "Group Moderator")]
    GroupModerator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl DiscussionUser {
    /// Moderators, administrators and community TAs may act across cohorts.
    pub fn is_privileged(&self) -> bool {
        self.roles.iter().any(|role| {
            matches!(
                role,
                Role::Moderator | Role::Administrator | Role::CommunityTa
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cohort {
    pub id: String,
    pub name: String,
}

/// Course-level discussion settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSettings {
    pub category_map: CategoryMap,
    pub is_cohorted: bool,
    pub cohorts: Vec<Cohort>,
    pub allow_anonymous: bool,
    pub allow_anonymous_to_peers: bool,
}

/// Explicit per-board context (course, user, settings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardContext {
    pub course_id: String,
    pub course_name: String,
    pub user: DiscussionUser,
    pub sort_preference: SortKey,
    pub course_settings: CourseSettings,
}

impl BoardContext {
    /// Whether the cohort (group) selector applies to this user.
    pub fn can_select_group(&self) -> bool {
        self.course_settings.is_cohorted && self.user.is_privileged()
    }
}

/// Bootstrap payload the page hands to the board factory.
#[derive(Debug, Clone, Deserialize)]
pub struct BoardOptions {
    pub course_id: String,
    #[serde(default)]
    pub course_name: String,
    pub user_info: DiscussionUser,
    #[serde(default)]
    pub sort_preference: SortKey,
    #[serde(default)]
    pub course_settings: CourseSettings,
    #[serde(default)]
    pub threads: Vec<DiscussionThread>,
    #[serde(default)]
    pub thread_pages: Option<u32>,
}

impl BoardOptions {
    /// Splits the bootstrap payload into the context and the initial thread page.
    pub fn into_parts(self) -> (BoardContext, ThreadPage) {
        let page = ThreadPage {
            discussion_data: self.threads,
            page: 1,
            num_pages: self.thread_pages.unwrap_or(1).max(1),
            corrected_text: None,
        };
        let ctx = BoardContext {
            course_id: self.course_id,
            course_name: self.course_name,
            user: self.user_info,
            sort_preference: self.sort_preference,
            course_settings: self.course_settings,
        };
        (ctx, page)
    }
}
