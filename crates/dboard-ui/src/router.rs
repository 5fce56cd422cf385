//! Location fragments and navigation history.
//!
//! | Route       | Fragment                        |
//! |-------------|---------------------------------|
//! | `All`       | (empty)                         |
//! | `Following` | `following`                     |
//! | `Topic`     | `topics/<id>`                   |
//! | `Thread`    | `<topic>/threads/<thread>`      |
//! | `Search`    | `search?text=<urlencoded text>` |
//! | `NewPost`   | `new`                           |
//!
//! Path components are form-urlencoded, so ids containing `/` survive.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::form_urlencoded;

use crate::features::topics::Selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    All,
    Following,
    Topic(String),
    Thread { topic_id: String, thread_id: String },
    Search(String),
    NewPost,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unrecognized location `{0}`")]
    Unrecognized(String),
    #[error("search location `{0}` has no text parameter")]
    MissingSearchText(String),
}

impl Route {
    pub fn parse(fragment: &str) -> Result<Self, RouteError> {
        let trimmed = fragment
            .strip_prefix('#')
            .unwrap_or(fragment)
            .trim_matches('/');

        if let Some(query) = trimmed.strip_prefix("search?") {
            return form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "text")
                .map(|(_, text)| Route::Search(text.into_owned()))
                .ok_or_else(|| RouteError::MissingSearchText(fragment.to_string()));
        }

        let unrecognized = || RouteError::Unrecognized(fragment.to_string());
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };
        match segments.as_slice() {
            [] => Ok(Route::All),
            ["following"] => Ok(Route::Following),
            ["new"] => Ok(Route::NewPost),
            ["topics", id] => Ok(Route::Topic(decode_segment(id).ok_or_else(unrecognized)?)),
            [topic, "threads", thread] => Ok(Route::Thread {
                topic_id: decode_segment(topic).ok_or_else(unrecognized)?,
                thread_id: decode_segment(thread).ok_or_else(unrecognized)?,
            }),
            _ => Err(unrecognized()),
        }
    }

    /// Fragment without the leading `#`.
    pub fn to_fragment(&self) -> String {
        match self {
            Route::All => String::new(),
            Route::Following => "following".to_string(),
            Route::NewPost => "new".to_string(),
            Route::Topic(id) => format!("topics/{}", encode_segment(id)),
            Route::Thread {
                topic_id,
                thread_id,
            } => format!(
                "{}/threads/{}",
                encode_segment(topic_id),
                encode_segment(thread_id)
            ),
            Route::Search(text) => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("text", text)
                    .finish();
                format!("search?{query}")
            }
        }
    }

    /// Listing route for a sidebar selection.
    pub fn from_selection(selection: &Selection) -> Self {
        match selection {
            Selection::All => Route::All,
            Selection::Following => Route::Following,
            Selection::Topic(id) => Route::Topic(id.clone()),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_fragment())
    }
}

fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

fn decode_segment(segment: &str) -> Option<String> {
    if segment.is_empty() || segment.contains(['=', '&']) {
        return None;
    }
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
}

/// Linear history of visited fragments with a cursor.
#[derive(Debug, Clone)]
pub struct NavigationRouter {
    entries: Vec<String>,
    cursor: usize,
}

impl Default for NavigationRouter {
    fn default() -> Self {
        Self::new("")
    }
}

impl NavigationRouter {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![normalize(initial)],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    pub fn current_route(&self) -> Result<Route, RouteError> {
        Route::parse(self.current())
    }

    /// Pushes `route` and drops forward history. Returns false when already there.
    pub fn navigate(&mut self, route: &Route) -> bool {
        self.push(route.to_fragment())
    }

    /// Swaps the current entry without growing history.
    pub fn replace(&mut self, route: &Route) {
        self.entries[self.cursor] = route.to_fragment();
    }

    /// Records a location change made outside the board.
    ///
    /// Moving to the neighbouring entry is treated as back/forward; any other
    /// new fragment is pushed. Returns whether the location actually changed.
    pub fn sync(&mut self, fragment: &str) -> bool {
        let fragment = normalize(fragment);
        if fragment == self.current() {
            return false;
        }
        if self.cursor > 0 && self.entries[self.cursor - 1] == fragment {
            self.cursor -= 1;
            return true;
        }
        if self.entries.get(self.cursor + 1) == Some(&fragment) {
            self.cursor += 1;
            return true;
        }
        self.push(fragment)
    }

    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Restarts history at `fragment`.
    pub fn reset(&mut self, fragment: &str) {
        *self = Self::new(fragment);
    }

    fn push(&mut self, fragment: String) -> bool {
        if fragment == self.current() {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment);
        self.cursor += 1;
        true
    }
}

fn normalize(fragment: &str) -> String {
    fragment
        .strip_prefix('#')
        .unwrap_or(fragment)
        .trim_matches('/')
        .to_string()
}
