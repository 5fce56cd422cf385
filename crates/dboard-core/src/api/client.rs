use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::types::{
    DiscussionThread, ListingRequest, NewThread, SearchRequest, ThreadPage, UserSearchResponse,
};
use crate::config::Config;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL: {0}")]
    BaseUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON client for the course discussion endpoints.
///
/// Every endpoint lives under `<base>/courses/<course_id>/discussion/`.
#[derive(Debug, Clone)]
pub struct DiscussionClient {
    http: reqwest::Client,
    base: Url,
    course_id: String,
}

impl DiscussionClient {
    pub fn new(base_url: &str, course_id: &str, timeout: Duration) -> ApiResult<Self> {
        let base =
            Url::parse(base_url).map_err(|err| ApiError::BaseUrl(format!("{base_url}: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::BaseUrl(base_url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base,
            course_id: course_id.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(
            &config.base_url,
            &config.course_id,
            config.request_timeout(),
        )
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Thread-text search.
    pub async fn search_threads(&self, request: &SearchRequest) -> ApiResult<ThreadPage> {
        let url = self.endpoint(&["forum", "search"])?;
        self.get_json(url, request).await
    }

    /// Username search used as the search fallback.
    pub async fn search_users(&self, username: &str) -> ApiResult<UserSearchResponse> {
        let url = self.endpoint(&["users"])?;
        self.get_json(url, &[("username", username)]).await
    }

    /// All threads, optionally scoped to commentable ids.
    pub async fn list_threads(&self, request: &ListingRequest) -> ApiResult<ThreadPage> {
        let url = self.endpoint(&["forum"])?;
        self.get_json(url, request).await
    }

    /// Threads the user follows.
    pub async fn followed_threads(&self, request: &ListingRequest) -> ApiResult<ThreadPage> {
        let url = self.endpoint(&["forum", "followed"])?;
        self.get_json(url, request).await
    }

    /// Creates a thread under a leaf topic.
    pub async fn create_thread(
        &self,
        commentable_id: &str,
        thread: &NewThread,
    ) -> ApiResult<DiscussionThread> {
        let url = self.endpoint(&[commentable_id, "threads", "create"])?;
        debug!(%url, "POST");
        let response = self.http.post(url.clone()).form(thread).send().await?;
        decode(url, response).await
    }

    fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::BaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["courses", self.course_id.as_str(), "discussion"])
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T, Q>(&self, url: Url, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        debug!(%url, "GET");
        let response = self.http.get(url.clone()).query(query).send().await?;
        decode(url, response).await
    }
}

async fn decode<T: DeserializeOwned>(url: Url, response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}
