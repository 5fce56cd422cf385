use serde::{Deserialize, Deserializer, Serialize};

use crate::context::SortKey;

/// A thread summary as listed by the forum endpoints.
///
/// Rendering is done elsewhere, so only the fields the board reasons about
/// are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionThread {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub commentable_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub pinned: bool,
}

/// One page of threads (listing or search).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadPage {
    #[serde(default)]
    pub discussion_data: Vec<DiscussionThread>,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "first_page")]
    pub num_pages: u32,
    #[serde(default)]
    pub corrected_text: Option<String>,
}

fn first_page() -> u32 {
    1
}

impl ThreadPage {
    /// Server-suggested spelling correction, if any (blank is treated as none).
    pub fn correction(&self) -> Option<&str> {
        self.corrected_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }

    pub fn has_more(&self) -> bool {
        self.page < self.num_pages
    }
}

/// Query parameters of the thread-text search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentable_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub page: u32,
    pub sort_key: SortKey,
}

/// Query parameters of the all/followed thread listing endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRequest {
    pub page: u32,
    pub sort_key: SortKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentable_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMatch {
    pub username: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSearchResponse {
    #[serde(default)]
    pub users: Vec<UserMatch>,
}

/// Form body of the create-thread endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewThread {
    pub title: String,
    pub body: String,
    pub anonymous: bool,
    pub anonymous_to_peers: bool,
    pub auto_subscribe: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// Accepts ids sent either as JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
