//! Integration tests for `DiscussionClient` against a mock LMS.

use std::time::Duration;

use dboard_core::api::{
    ApiError, DiscussionClient, ListingRequest, NewThread, SearchRequest,
};
use dboard_core::context::SortKey;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COURSE: &str = "course-v1:edX+DemoX+2024";

fn client_for(server: &MockServer) -> DiscussionClient {
    DiscussionClient::new(&server.uri(), COURSE, Duration::from_secs(5)).unwrap()
}

fn discussion_path(rest: &str) -> String {
    format!("/courses/{COURSE}/discussion/{rest}")
}

#[tokio::test]
async fn test_search_threads_sends_scope_and_parses_correction() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(discussion_path("forum/search")))
        .and(query_param("text", "gizmo"))
        .and(query_param("commentable_ids", "child,sibling"))
        .and(query_param("sort_key", "votes"))
        .and(header("x-requested-with", "XMLHttpRequest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "discussion_data": [{"id": "t1", "title": "Gizmos"}],
            "page": 1,
            "num_pages": 2,
            "corrected_text": "gizmos"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .search_threads(&SearchRequest {
            text: "gizmo".to_string(),
            commentable_ids: Some("child,sibling".to_string()),
            group_id: None,
            page: 1,
            sort_key: SortKey::Votes,
        })
        .await
        .unwrap();

    assert_eq!(page.discussion_data.len(), 1);
    assert_eq!(page.correction(), Some("gizmos"));
    assert!(page.has_more());
}

#[tokio::test]
async fn test_search_users() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(discussion_path("users")))
        .and(query_param("username", "gizmo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"username": "gizmo", "id": 12}]
        })))
        .mount(&server)
        .await;

    let response = client_for(&server).search_users("gizmo").await.unwrap();
    assert_eq!(response.users.len(), 1);
    assert_eq!(response.users[0].username, "gizmo");
    assert_eq!(response.users[0].id, "12");
}

#[tokio::test]
async fn test_listing_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(discussion_path("forum")))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "discussion_data": [], "page": 2, "num_pages": 2
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(discussion_path("forum/followed")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "discussion_data": [{"id": 5}], "page": 1, "num_pages": 1
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ListingRequest {
        page: 2,
        sort_key: SortKey::Activity,
        commentable_ids: None,
        group_id: None,
    };
    let all = client.list_threads(&request).await.unwrap();
    assert_eq!(all.page, 2);
    assert!(!all.has_more());

    let followed = client
        .followed_threads(&ListingRequest { page: 1, ..request })
        .await
        .unwrap();
    assert_eq!(followed.discussion_data[0].id, "5");
}

#[tokio::test]
async fn test_create_thread_posts_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(discussion_path("lecture-1/threads/create")))
        .and(body_string_contains("title=Question"))
        .and(body_string_contains("auto_subscribe=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "new-thread", "title": "Question", "commentable_id": "lecture-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let thread = client_for(&server)
        .create_thread(
            "lecture-1",
            &NewThread {
                title: "Question".to_string(),
                body: "How?".to_string(),
                anonymous: false,
                anonymous_to_peers: false,
                auto_subscribe: true,
                group_id: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(thread.id, "new-thread");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(discussion_path("users")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).search_users("gizmo").await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(discussion_path("users")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).search_users("gizmo").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}
