//! Board reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects.

use dboard_core::api::SearchRequest;
use dboard_core::topics::ROOT_ID;
use tracing::{debug, warn};

use crate::bus::{BoardEvent, SelectedTopic};
use crate::effects::UiEffect;
use crate::events::{
    ComposerUiEvent, RouteUiEvent, SearchUiEvent, ThreadUiEvent, TopicsUiEvent, UiEvent,
};
use crate::features::threads::ThreadSource;
use crate::features::topics::Selection;
use crate::features::{composer, search, threads};
use crate::mutations::{SearchMutation, StateMutation, ThreadMutation, TopicsMutation};
use crate::router::Route;
use crate::state::{BoardState, Panel};

/// The main reducer function.
///
/// Mutates state for `event` and returns effects for the runtime. Alert and
/// panel changes are detected here, once per event, so every path that
/// touches them is reported exactly once.
pub fn update(state: &mut BoardState, event: UiEvent) -> Vec<UiEffect> {
    let alerts_revision = state.search.alerts.revision();
    let panel = state.panel;

    let mut effects = match event {
        UiEvent::Topics(event) => handle_topics_event(state, event),
        UiEvent::Search(event) => handle_search_event(state, event),
        UiEvent::Threads(event) => handle_thread_event(state, event),
        UiEvent::Route(event) => handle_route_event(state, event),
        UiEvent::Composer(event) => handle_composer_event(state, event),
    };

    if state.panel != panel {
        effects.push(UiEffect::Emit(BoardEvent::PanelChanged(state.panel)));
    }
    if state.search.alerts.revision() != alerts_revision {
        effects.push(UiEffect::Emit(BoardEvent::AlertsChanged(
            state.search.alerts.list_in_order().to_vec(),
        )));
    }
    effects
}

fn handle_topics_event(state: &mut BoardState, event: TopicsUiEvent) -> Vec<UiEffect> {
    match event {
        TopicsUiEvent::FilterChanged(text) => {
            state.topics.set_filter(&state.tree, &text);
            vec![]
        }
        TopicsUiEvent::Select(selection) => navigate(state, Route::from_selection(&selection)),
        TopicsUiEvent::SetGroup(group_id) => {
            if !state.ctx.can_select_group() {
                warn!(user = %state.ctx.user.username, "group selection is not available");
                return vec![];
            }
            state.topics.group_id = group_id;
            reload_current_view(state)
        }
    }
}

fn handle_search_event(state: &mut BoardState, event: SearchUiEvent) -> Vec<UiEffect> {
    match event {
        SearchUiEvent::Submit(text) => {
            let text = text.trim();
            if text.is_empty() {
                let route = Route::from_selection(&state.topics.selection);
                return navigate(state, route);
            }
            navigate(state, Route::Search(text.to_string()))
        }
        SearchUiEvent::Clear => {
            let route = Route::from_selection(&state.topics.selection);
            navigate(state, route)
        }
        SearchUiEvent::DismissAlert(handle) => {
            state.search.alerts.remove(handle);
            vec![]
        }
        SearchUiEvent::ThreadSearchCompleted {
            id,
            request,
            result,
        } => search::handle_thread_search_result(
            &mut state.search,
            &mut state.threads,
            id,
            request,
            result,
        ),
        SearchUiEvent::UserSearchCompleted {
            id,
            username,
            result,
        } => {
            search::handle_user_search_result(
                &mut state.search,
                &state.ctx.course_id,
                id,
                &username,
                result,
            );
            vec![]
        }
    }
}

fn handle_thread_event(state: &mut BoardState, event: ThreadUiEvent) -> Vec<UiEffect> {
    match event {
        ThreadUiEvent::Select { thread_id } => {
            let topic_id = state
                .threads
                .find(&thread_id)
                .and_then(|thread| thread.commentable_id.clone())
                .or_else(|| state.topics.selection.topic_id().map(str::to_string))
                .unwrap_or_else(|| "all".to_string());
            navigate(
                state,
                Route::Thread {
                    topic_id,
                    thread_id,
                },
            )
        }
        ThreadUiEvent::LoadMore => {
            let sort_key = state.ctx.sort_preference;
            let group_id = state.group_scope();
            threads::load_more(&mut state.threads, &mut state.seq, sort_key, group_id)
        }
        ThreadUiEvent::Loaded {
            id,
            source,
            append,
            result,
        } => {
            let mutations = threads::handle_loaded(&mut state.threads, id, source, append, result);
            apply_mutations(state, mutations);
            vec![]
        }
        ThreadUiEvent::Updated(thread) => {
            apply_mutations(
                state,
                vec![StateMutation::Threads(ThreadMutation::Upsert(thread))],
            );
            vec![]
        }
        ThreadUiEvent::Removed { thread_id } => {
            apply_mutations(
                state,
                vec![StateMutation::Threads(ThreadMutation::Remove(thread_id))],
            );
            vec![]
        }
    }
}

fn handle_route_event(state: &mut BoardState, event: RouteUiEvent) -> Vec<UiEffect> {
    match event {
        RouteUiEvent::Start { fragment } => {
            state.router.reset(&fragment);
            match Route::parse(&fragment) {
                // The bootstrap page already is the unfiltered listing.
                Ok(Route::All) => select_topic(state, Selection::All, false),
                Ok(route) => apply_route(state, route),
                Err(err) => {
                    warn!(%err, "unrecognized start location, showing all threads");
                    state.router.reset("");
                    select_topic(state, Selection::All, false)
                }
            }
        }
        RouteUiEvent::Navigate(route) => navigate(state, route),
        RouteUiEvent::FragmentChanged(fragment) => {
            if !state.router.sync(&fragment) {
                return vec![];
            }
            match Route::parse(&fragment) {
                Ok(route) => apply_route(state, route),
                Err(err) => {
                    warn!(%err, "ignoring location change");
                    vec![]
                }
            }
        }
        RouteUiEvent::Back => {
            let fragment = state.router.back().map(str::to_string);
            follow_history(state, fragment)
        }
        RouteUiEvent::Forward => {
            let fragment = state.router.forward().map(str::to_string);
            follow_history(state, fragment)
        }
    }
}

fn handle_composer_event(state: &mut BoardState, event: ComposerUiEvent) -> Vec<UiEffect> {
    match event {
        ComposerUiEvent::Open => navigate(state, Route::NewPost),
        ComposerUiEvent::Cancel => {
            state.composer.reset();
            if state.router.can_go_back() {
                let fragment = state.router.back().map(str::to_string);
                return follow_history(state, fragment);
            }
            let route = Route::from_selection(&state.topics.selection);
            navigate(state, route)
        }
        ComposerUiEvent::Edit(field) => {
            state.composer.edit(field);
            vec![]
        }
        ComposerUiEvent::Submit => {
            composer::submit(&mut state.composer, &state.tree, &state.ctx, &mut state.seq)
        }
        ComposerUiEvent::Created { id, result } => {
            let Some(thread) = composer::handle_created(&mut state.composer, id, result) else {
                return vec![];
            };
            let route = Route::Thread {
                topic_id: thread
                    .commentable_id
                    .clone()
                    .unwrap_or_else(|| "all".to_string()),
                thread_id: thread.id.clone(),
            };
            apply_mutations(
                state,
                vec![StateMutation::Threads(ThreadMutation::Upsert(thread))],
            );
            navigate(state, route)
        }
    }
}

/// Applies cross-slice mutations returned by feature reducers.
fn apply_mutations(state: &mut BoardState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        match mutation {
            StateMutation::Topics(TopicsMutation::ResetBreadcrumbs) => {
                state.topics.reset_breadcrumbs(&state.tree);
            }
            StateMutation::Search(SearchMutation::ClearSearch) => {
                search::clear_search(&mut state.search);
                if state.threads.pending.as_ref().is_some_and(ThreadSource::is_search) {
                    state.threads.pending = None;
                }
            }
            StateMutation::Search(SearchMutation::ClearSearchBox) => {
                state.search.clear_box();
            }
            StateMutation::Search(SearchMutation::ClearAlerts) => {
                state.search.alerts.clear();
            }
            StateMutation::Threads(mutation) => {
                if state.threads.apply(mutation) {
                    state.search.alerts.clear();
                }
            }
        }
    }
}

/// Pushes `route` onto history (if new) and applies it.
fn navigate(state: &mut BoardState, route: Route) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    if state.router.navigate(&route) {
        debug!(fragment = %state.router.current(), "location changed");
        effects.push(UiEffect::Emit(BoardEvent::LocationChanged {
            fragment: state.router.current().to_string(),
        }));
    }
    effects.extend(apply_route(state, route));
    effects
}

fn follow_history(state: &mut BoardState, fragment: Option<String>) -> Vec<UiEffect> {
    let Some(fragment) = fragment else {
        return vec![];
    };
    let mut effects = vec![UiEffect::Emit(BoardEvent::LocationChanged {
        fragment: fragment.clone(),
    })];
    match Route::parse(&fragment) {
        Ok(route) => effects.extend(apply_route(state, route)),
        Err(err) => warn!(%err, "ignoring history entry"),
    }
    effects
}

/// Restores the board view for `route`.
fn apply_route(state: &mut BoardState, route: Route) -> Vec<UiEffect> {
    match route {
        Route::All => select_topic(state, Selection::All, true),
        Route::Following => select_topic(state, Selection::Following, true),
        Route::Topic(id) => {
            if id == ROOT_ID || !state.tree.contains(&id) {
                warn!(topic = %id, "ignoring location for unknown topic");
                return vec![];
            }
            select_topic(state, Selection::Topic(id), true)
        }
        Route::Thread { thread_id, .. } => select_thread(state, thread_id),
        Route::Search(text) => start_search(state, &text),
        Route::NewPost => {
            state.panel = Panel::NewPost;
            let topic_id = state.topics.selection.topic_id().map(str::to_string);
            state.composer.preselect(&state.tree, topic_id.as_deref());
            vec![]
        }
    }
}

fn select_topic(state: &mut BoardState, selection: Selection, reload: bool) -> Vec<UiEffect> {
    state.panel = Panel::Board;
    state.threads.selected = None;
    let selected = match &selection {
        Selection::All => SelectedTopic::All,
        Selection::Following => SelectedTopic::Following,
        Selection::Topic(id) => state
            .tree
            .get(id)
            .cloned()
            .map_or(SelectedTopic::All, SelectedTopic::Topic),
    };
    state.topics.selection = selection;

    // Independent topic-selected listeners.
    apply_mutations(
        state,
        vec![
            StateMutation::Topics(TopicsMutation::ResetBreadcrumbs),
            StateMutation::Search(SearchMutation::ClearSearch),
        ],
    );

    let mut effects = vec![UiEffect::Emit(BoardEvent::TopicSelected(selected))];
    if reload {
        effects.push(load_selection(state));
    }
    effects
}

fn select_thread(state: &mut BoardState, thread_id: String) -> Vec<UiEffect> {
    state.panel = Panel::Board;
    state.threads.selected = Some(thread_id.clone());
    apply_mutations(
        state,
        vec![StateMutation::Search(SearchMutation::ClearSearchBox)],
    );
    vec![UiEffect::Emit(BoardEvent::ThreadSelected { thread_id })]
}

fn start_search(state: &mut BoardState, text: &str) -> Vec<UiEffect> {
    let text = text.trim();
    if text.is_empty() {
        apply_mutations(
            state,
            vec![StateMutation::Search(SearchMutation::ClearSearch)],
        );
        return vec![load_selection(state)];
    }

    state.panel = Panel::Board;
    // A search supersedes any listing in flight.
    state.threads.request.clear();
    let id = state.seq.next_id();
    let commentable_ids = state
        .topics
        .selection
        .topic_id()
        .and_then(|topic| state.tree.commentable_ids_param(topic).ok());
    state.threads.pending = Some(ThreadSource::Search {
        text: text.to_string(),
        commentable_ids: commentable_ids.clone(),
    });
    let request = SearchRequest {
        text: text.to_string(),
        commentable_ids,
        group_id: state.group_scope(),
        page: 1,
        sort_key: state.ctx.sort_preference,
    };
    search::search_for(&mut state.search, id, request)
}

/// Re-issues whatever produced the current thread list.
fn reload_current_view(state: &mut BoardState) -> Vec<UiEffect> {
    if let ThreadSource::Search { text, .. } = state.threads.current_source() {
        let text = text.clone();
        return start_search(state, &text);
    }
    vec![load_selection(state)]
}

fn load_selection(state: &mut BoardState) -> UiEffect {
    let source = match &state.topics.selection {
        Selection::All => ThreadSource::All,
        Selection::Following => ThreadSource::Following,
        Selection::Topic(id) => ThreadSource::Topic {
            id: id.clone(),
            commentable_ids: state.tree.commentable_ids_param(id).unwrap_or_default(),
        },
    };
    let sort_key = state.ctx.sort_preference;
    let group_id = state.group_scope();
    threads::load_first_page(&mut state.threads, &mut state.seq, source, sort_key, group_id)
}

#[cfg(test)]
mod tests {
    use dboard_core::api::{DiscussionThread, ThreadPage, UserMatch, UserSearchResponse};
    use dboard_core::context::{BoardContext, CourseSettings, DiscussionUser, Role, SortKey};
    use dboard_core::topics::CategoryMap;

    use super::*;
    use crate::common::RequestId;
    use crate::effects::ThreadQuery;
    use crate::events::ComposerField;
    use crate::features::search::{NO_RESULTS_MESSAGE, SearchPhase};

    fn category_map() -> CategoryMap {
        CategoryMap::default()
            .with_entry("parent", "Parent", &["child", "sibling"])
            .with_entry("child", "Child", &[])
            .with_entry("sibling", "Sibling", &[])
            .with_entry("other", "Other Category", &[])
            .with_roots(&["parent", "other"])
    }

    fn thread(id: &str, commentable: &str) -> DiscussionThread {
        DiscussionThread {
            id: id.to_string(),
            title: format!("Thread {id}"),
            body: String::new(),
            commentable_id: Some(commentable.to_string()),
            username: None,
            comments_count: 0,
            pinned: false,
        }
    }

    fn page(threads: Vec<DiscussionThread>, corrected: Option<&str>) -> ThreadPage {
        ThreadPage {
            discussion_data: threads,
            page: 1,
            num_pages: 1,
            corrected_text: corrected.map(str::to_string),
        }
    }

    fn board() -> BoardState {
        let ctx = BoardContext {
            course_id: "course-v1:edX+DemoX+2024".to_string(),
            course_name: "Demo".to_string(),
            user: DiscussionUser {
                id: "1".to_string(),
                username: "staff".to_string(),
                roles: vec![Role::Moderator],
            },
            sort_preference: SortKey::Activity,
            course_settings: CourseSettings {
                category_map: category_map(),
                is_cohorted: true,
                ..CourseSettings::default()
            },
        };
        BoardState::new(ctx, page(vec![thread("t1", "child")], None)).unwrap()
    }

    fn emitted(effects: &[UiEffect]) -> Vec<&'static str> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                UiEffect::Emit(event) => Some(event.name()),
                _ => None,
            })
            .collect()
    }

    fn search_id(effects: &[UiEffect]) -> (RequestId, SearchRequest) {
        effects
            .iter()
            .find_map(|effect| match effect {
                UiEffect::ThreadSearch { id, request } => Some((*id, request.clone())),
                _ => None,
            })
            .expect("thread search effect")
    }

    fn submit(state: &mut BoardState, text: &str) -> (RequestId, SearchRequest) {
        let effects = update(state, UiEvent::Search(SearchUiEvent::Submit(text.to_string())));
        search_id(&effects)
    }

    fn complete_search(
        state: &mut BoardState,
        id: RequestId,
        request: SearchRequest,
        result: Result<ThreadPage, String>,
    ) -> Vec<UiEffect> {
        update(
            state,
            UiEvent::Search(SearchUiEvent::ThreadSearchCompleted {
                id,
                request,
                result,
            }),
        )
    }

    #[test]
    fn test_search_is_scoped_to_selected_topic() {
        let mut state = board();
        update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::Select(Selection::Topic("parent".to_string()))),
        );
        let (_, request) = submit(&mut state, "gizmo");
        assert_eq!(request.commentable_ids.as_deref(), Some("child,sibling"));
        assert_eq!(state.router.current(), "search?text=gizmo");
    }

    #[test]
    fn test_only_latest_search_applies() {
        let mut state = board();
        let (a, request_a) = submit(&mut state, "a");
        let (b, request_b) = submit(&mut state, "b");

        let effects = complete_search(
            &mut state,
            b,
            request_b,
            Ok(page(vec![thread("b1", "child")], None)),
        );
        assert!(emitted(&effects).contains(&"search:completed"));
        let effects = complete_search(
            &mut state,
            a,
            request_a,
            Ok(page(vec![thread("a1", "child")], Some("aa"))),
        );
        assert!(effects.is_empty());
        assert_eq!(state.threads.threads[0].id, "b1");
        assert!(state.search.alerts.is_empty());
    }

    #[test]
    fn test_search_success_chains_user_search_and_alerts() {
        let mut state = board();
        let (id, request) = submit(&mut state, "gizmo");
        let effects = complete_search(&mut state, id, request, Ok(page(vec![], None)));

        assert!(effects.contains(&UiEffect::UserSearch {
            id,
            username: "gizmo".to_string()
        }));
        assert!(emitted(&effects).contains(&"search:alerts-changed"));
        assert_eq!(state.search.alerts.messages(), vec![NO_RESULTS_MESSAGE]);

        let effects = update(
            &mut state,
            UiEvent::Search(SearchUiEvent::UserSearchCompleted {
                id,
                username: "gizmo".to_string(),
                result: Ok(UserSearchResponse {
                    users: vec![UserMatch {
                        username: "gizmo".to_string(),
                        id: "7".to_string(),
                    }],
                }),
            }),
        );
        assert_eq!(emitted(&effects), vec!["search:alerts-changed"]);
        assert_eq!(state.search.alerts.len(), 2);
    }

    #[test]
    fn test_search_failure_keeps_results_and_skips_user_search() {
        let mut state = board();
        let (id, request) = submit(&mut state, "gizmo");
        let effects = complete_search(&mut state, id, request, Err("HTTP 500".to_string()));

        assert!(!effects
            .iter()
            .any(|effect| matches!(effect, UiEffect::UserSearch { .. })));
        assert_eq!(state.threads.threads[0].id, "t1");
        assert!(matches!(state.search.phase, SearchPhase::Failed { .. }));
    }

    #[test]
    fn test_topic_selection_clears_search_and_sets_breadcrumbs() {
        let mut state = board();
        let (id, request) = submit(&mut state, "gizmo");
        complete_search(&mut state, id, request, Ok(page(vec![], Some("gizmos"))));
        assert!(!state.search.alerts.is_empty());

        let effects = update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::Select(Selection::Topic("child".to_string()))),
        );

        assert!(state.search.alerts.is_empty());
        assert!(state.search.box_text.is_empty());
        assert_eq!(state.search.phase, SearchPhase::Idle);
        let crumbs: Vec<_> = state.topics.breadcrumbs.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(crumbs, vec!["parent", "child"]);
        assert_eq!(
            emitted(&effects),
            vec!["location:changed", "topic:selected", "search:alerts-changed"]
        );
        assert!(effects.iter().any(|effect| matches!(
            effect,
            UiEffect::LoadThreads {
                query: ThreadQuery::All(request),
                ..
            } if request.commentable_ids.as_deref() == Some("child")
        )));
    }

    #[test]
    fn test_following_selection_empties_breadcrumbs() {
        let mut state = board();
        update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::Select(Selection::Topic("child".to_string()))),
        );
        let effects = update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::Select(Selection::Following)),
        );
        assert!(state.topics.breadcrumbs.is_empty());
        assert!(effects.iter().any(|effect| matches!(
            effect,
            UiEffect::LoadThreads {
                query: ThreadQuery::Following(_),
                ..
            }
        )));
    }

    #[test]
    fn test_thread_selection_only_clears_search_box() {
        let mut state = board();
        let (id, request) = submit(&mut state, "gizmo");
        complete_search(
            &mut state,
            id,
            request,
            Ok(page(vec![thread("t2", "sibling")], Some("gizmos"))),
        );

        let effects = update(
            &mut state,
            UiEvent::Threads(ThreadUiEvent::Select {
                thread_id: "t2".to_string(),
            }),
        );
        assert!(state.search.box_text.is_empty());
        assert_eq!(state.search.alerts.len(), 1);
        assert_eq!(state.threads.selected.as_deref(), Some("t2"));
        assert_eq!(state.router.current(), "sibling/threads/t2");
        assert!(emitted(&effects).contains(&"thread:selected"));
    }

    #[test]
    fn test_listing_replacement_clears_alerts() {
        let mut state = board();
        let (id, request) = submit(&mut state, "gizmo");
        complete_search(&mut state, id, request, Ok(page(vec![], None)));

        let effects = update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::Select(Selection::All)),
        );
        let Some(UiEffect::LoadThreads { id, source, .. }) = effects
            .iter()
            .find(|effect| matches!(effect, UiEffect::LoadThreads { .. }))
            .cloned()
        else {
            panic!("expected listing load");
        };
        state.search.alerts.add("stale notice");

        update(
            &mut state,
            UiEvent::Threads(ThreadUiEvent::Loaded {
                id,
                source,
                append: false,
                result: Ok(page(vec![thread("t3", "other")], None)),
            }),
        );
        assert!(state.search.alerts.is_empty());
        assert_eq!(state.threads.threads[0].id, "t3");
    }

    #[test]
    fn test_search_supersedes_listing_in_flight() {
        let mut state = board();
        let effects = update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::Select(Selection::Following)),
        );
        let Some(UiEffect::LoadThreads { id, source, .. }) = effects
            .iter()
            .find(|effect| matches!(effect, UiEffect::LoadThreads { .. }))
            .cloned()
        else {
            panic!("expected listing load");
        };
        submit(&mut state, "gizmo");

        update(
            &mut state,
            UiEvent::Threads(ThreadUiEvent::Loaded {
                id,
                source,
                append: false,
                result: Ok(page(vec![thread("late", "child")], None)),
            }),
        );
        assert_eq!(state.threads.threads[0].id, "t1");
    }

    #[test]
    fn test_blank_search_reloads_selection() {
        let mut state = board();
        submit(&mut state, "gizmo");
        let effects = update(&mut state, UiEvent::Search(SearchUiEvent::Submit("   ".to_string())));
        assert_eq!(state.search.phase, SearchPhase::Idle);
        assert!(effects.iter().any(|effect| matches!(effect, UiEffect::LoadThreads { .. })));
        assert_eq!(state.router.current(), "");
    }

    #[test]
    fn test_unknown_topic_route_is_ignored() {
        let mut state = board();
        let effects = update(
            &mut state,
            UiEvent::Route(RouteUiEvent::FragmentChanged("#topics/missing".to_string())),
        );
        assert!(effects.is_empty());
        assert_eq!(state.topics.selection, Selection::All);
    }

    #[test]
    fn test_start_restores_topic_route() {
        let mut state = board();
        let effects = update(
            &mut state,
            UiEvent::Route(RouteUiEvent::Start {
                fragment: "#topics/sibling".to_string(),
            }),
        );
        assert_eq!(state.topics.selection, Selection::Topic("sibling".to_string()));
        assert!(emitted(&effects).contains(&"topic:selected"));

        let effects = update(
            &mut state,
            UiEvent::Route(RouteUiEvent::Start {
                fragment: String::new(),
            }),
        );
        assert!(!effects.iter().any(|effect| matches!(effect, UiEffect::LoadThreads { .. })));
    }

    #[test]
    fn test_back_restores_previous_selection() {
        let mut state = board();
        update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::Select(Selection::Topic("child".to_string()))),
        );
        update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::Select(Selection::Following)),
        );
        let effects = update(&mut state, UiEvent::Route(RouteUiEvent::Back));
        assert_eq!(state.topics.selection, Selection::Topic("child".to_string()));
        assert_eq!(emitted(&effects)[0], "location:changed");
    }

    #[test]
    fn test_new_post_flow() {
        let mut state = board();
        update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::Select(Selection::Topic("child".to_string()))),
        );
        let effects = update(&mut state, UiEvent::Composer(ComposerUiEvent::Open));
        assert_eq!(state.panel, Panel::NewPost);
        assert_eq!(state.composer.topic_id.as_deref(), Some("child"));
        assert!(emitted(&effects).contains(&"panel:changed"));

        update(
            &mut state,
            UiEvent::Composer(ComposerUiEvent::Edit(ComposerField::Title("Hi".to_string()))),
        );
        update(
            &mut state,
            UiEvent::Composer(ComposerUiEvent::Edit(ComposerField::Body("Body".to_string()))),
        );
        let effects = update(&mut state, UiEvent::Composer(ComposerUiEvent::Submit));
        let Some(UiEffect::CreateThread { id, .. }) = effects.first().cloned() else {
            panic!("expected create effect");
        };

        state.search.alerts.add("leftover");
        update(
            &mut state,
            UiEvent::Composer(ComposerUiEvent::Created {
                id,
                result: Ok(thread("t9", "child")),
            }),
        );
        assert_eq!(state.panel, Panel::Board);
        assert_eq!(state.threads.threads[0].id, "t9");
        assert!(state.search.alerts.is_empty());
        assert_eq!(state.router.current(), "child/threads/t9");
    }

    #[test]
    fn test_group_scope_applies_to_privileged_users() {
        let mut state = board();
        let effects = update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::SetGroup(Some("g1".to_string()))),
        );
        assert!(effects.iter().any(|effect| matches!(
            effect,
            UiEffect::LoadThreads {
                query: ThreadQuery::All(request),
                ..
            } if request.group_id.as_deref() == Some("g1")
        )));
    }

    fn listing_effect(effects: &[UiEffect]) -> (RequestId, ThreadSource) {
        effects
            .iter()
            .find_map(|effect| match effect {
                UiEffect::LoadThreads { id, source, .. } => Some((*id, source.clone())),
                _ => None,
            })
            .expect("listing effect")
    }

    fn thread_ids(state: &BoardState) -> Vec<&str> {
        state.threads.threads.iter().map(|t| t.id.as_str()).collect()
    }

    fn paged(threads: Vec<DiscussionThread>, page: u32, num_pages: u32) -> ThreadPage {
        ThreadPage {
            discussion_data: threads,
            page,
            num_pages,
            corrected_text: None,
        }
    }

    #[test]
    fn test_load_more_during_search_does_not_touch_results() {
        let mut state = board();
        state.threads.num_pages = 3;
        let (id, request) = submit(&mut state, "gizmo");

        let effects = update(&mut state, UiEvent::Threads(ThreadUiEvent::LoadMore));
        assert!(effects.is_empty());

        complete_search(&mut state, id, request, Ok(page(vec![thread("s1", "child")], None)));
        assert_eq!(thread_ids(&state), vec!["s1"]);
        assert!(!state.threads.has_more());
    }

    #[test]
    fn test_late_listing_page_after_search_results_is_dropped() {
        let mut state = board();
        state.threads.num_pages = 3;
        let effects = update(&mut state, UiEvent::Threads(ThreadUiEvent::LoadMore));
        let (listing, source) = listing_effect(&effects);
        assert_eq!(source, ThreadSource::All);

        let (id, request) = submit(&mut state, "gizmo");
        complete_search(&mut state, id, request, Ok(page(vec![thread("s1", "child")], None)));

        update(
            &mut state,
            UiEvent::Threads(ThreadUiEvent::Loaded {
                id: listing,
                source,
                append: true,
                result: Ok(paged(vec![thread("all2", "other")], 2, 3)),
            }),
        );
        assert_eq!(thread_ids(&state), vec!["s1"]);
        assert_eq!(state.threads.page, 1);
        assert!(state.threads.source.is_search());
    }

    #[test]
    fn test_late_listing_page_before_search_results_is_dropped() {
        let mut state = board();
        state.threads.num_pages = 3;
        let effects = update(&mut state, UiEvent::Threads(ThreadUiEvent::LoadMore));
        let (listing, source) = listing_effect(&effects);
        let (id, request) = submit(&mut state, "gizmo");

        update(
            &mut state,
            UiEvent::Threads(ThreadUiEvent::Loaded {
                id: listing,
                source,
                append: true,
                result: Ok(paged(vec![thread("all2", "other")], 2, 3)),
            }),
        );
        assert_eq!(thread_ids(&state), vec!["t1"]);

        complete_search(&mut state, id, request, Ok(page(vec![thread("s1", "child")], None)));
        assert_eq!(thread_ids(&state), vec!["s1"]);
    }

    #[test]
    fn test_group_change_during_search_reissues_search() {
        let mut state = board();
        let (first, request) = submit(&mut state, "gizmo");

        let effects = update(
            &mut state,
            UiEvent::Topics(TopicsUiEvent::SetGroup(Some("g1".to_string()))),
        );
        assert!(!effects.iter().any(|effect| matches!(effect, UiEffect::LoadThreads { .. })));
        let (second, scoped) = search_id(&effects);
        assert_eq!(scoped.group_id.as_deref(), Some("g1"));

        let effects = complete_search(&mut state, first, request, Ok(page(vec![], None)));
        assert!(effects.is_empty());
        complete_search(&mut state, second, scoped, Ok(page(vec![thread("s1", "child")], None)));
        assert_eq!(thread_ids(&state), vec!["s1"]);
    }

    #[test]
    fn test_external_update_clears_alerts() {
        let mut state = board();
        let (id, request) = submit(&mut state, "gizmo");
        complete_search(&mut state, id, request, Ok(page(vec![], Some("gizmos"))));
        assert_eq!(state.search.alerts.len(), 1);

        let effects = update(
            &mut state,
            UiEvent::Threads(ThreadUiEvent::Updated(thread("t5", "child"))),
        );
        assert!(state.search.alerts.is_empty());
        assert_eq!(emitted(&effects), vec!["search:alerts-changed"]);
        assert_eq!(thread_ids(&state), vec!["t5"]);
    }

    #[test]
    fn test_external_removal_clears_alerts_only_when_listed() {
        let mut state = board();
        let (id, request) = submit(&mut state, "gizmo");
        complete_search(
            &mut state,
            id,
            request,
            Ok(page(vec![thread("s1", "child")], Some("gizmos"))),
        );

        let effects = update(
            &mut state,
            UiEvent::Threads(ThreadUiEvent::Removed {
                thread_id: "missing".to_string(),
            }),
        );
        assert!(effects.is_empty());
        assert_eq!(state.search.alerts.len(), 1);

        let effects = update(
            &mut state,
            UiEvent::Threads(ThreadUiEvent::Removed {
                thread_id: "s1".to_string(),
            }),
        );
        assert!(state.search.alerts.is_empty());
        assert_eq!(emitted(&effects), vec!["search:alerts-changed"]);
        assert!(state.threads.is_empty());
    }
}
