//! One-shot board search.
//!
//! Mounts a board for the course, optionally selects a topic, runs the search
//! to completion (including the username lookup) and prints threads then
//! alerts.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use dboard_core::api::{DiscussionClient, ThreadPage};
use dboard_core::config::Config;
use dboard_core::context::{BoardContext, CourseSettings, DiscussionUser};
use dboard_core::topics::CategoryMap;
use dboard_ui::events::{SearchUiEvent, TopicsUiEvent};
use dboard_ui::features::search::SearchPhase;
use dboard_ui::features::topics::Selection;
use dboard_ui::{BoardRuntime, BoardState, UiEvent};

pub struct SearchOptions<'a> {
    pub map: &'a Path,
    pub text: &'a str,
    pub topic: Option<&'a str>,
    pub course: Option<&'a str>,
    pub config: &'a Config,
}

pub async fn run(opts: SearchOptions<'_>) -> Result<()> {
    let course_id = opts
        .course
        .unwrap_or(opts.config.course_id.as_str())
        .trim()
        .to_string();
    if course_id.is_empty() {
        bail!("No course configured. Pass --course or set course_id in the config file.");
    }

    let category_map = CategoryMap::load(opts.map)?;
    let ctx = BoardContext {
        course_name: course_id.clone(),
        course_id,
        user: DiscussionUser {
            id: String::new(),
            username: String::new(),
            roles: Vec::new(),
        },
        sort_preference: opts.config.sort_key,
        course_settings: CourseSettings {
            category_map,
            ..CourseSettings::default()
        },
    };
    let client = DiscussionClient::new(
        &opts.config.base_url,
        &ctx.course_id,
        opts.config.request_timeout(),
    )
    .context("create discussion client")?;
    let state = BoardState::new(ctx, empty_page())
        .with_context(|| format!("invalid category map {}", opts.map.display()))?;
    let mut board = BoardRuntime::new(state, client);

    if let Some(topic) = opts.topic {
        if !board.state.tree.contains(topic) {
            bail!("Unknown topic '{topic}'");
        }
        board.dispatch(UiEvent::Topics(TopicsUiEvent::Select(Selection::Topic(
            topic.to_string(),
        ))));
        board.settle().await;
    }

    board.dispatch(UiEvent::Search(SearchUiEvent::Submit(opts.text.to_string())));
    board.settle().await;

    if let SearchPhase::Failed { error, .. } = &board.state.search.phase {
        return Err(anyhow!("{error}")).context("search failed");
    }

    for thread in &board.state.threads.threads {
        println!("{}\t{}", thread.id, thread.title);
    }
    for alert in board.state.search.alerts.list_in_order() {
        println!("[{}] {}", alert.css_class, alert.message);
    }
    Ok(())
}

fn empty_page() -> ThreadPage {
    ThreadPage {
        discussion_data: Vec::new(),
        page: 1,
        num_pages: 1,
        corrected_text: None,
    }
}
