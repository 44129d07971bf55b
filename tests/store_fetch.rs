//! Fetch lifecycle and error classification, driven end-to-end against a
//! live mock server.

use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use verdant::models::{INVALID_RESPONSE_FORMAT, NETWORK_ERROR, TIMEOUT_ERROR, UNKNOWN_ERROR};
use verdant::{Action, ApiClient, ApiConfig, ResourceAction, Store};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn store_for(base_url: String, timeout_ms: u64) -> Arc<Store> {
    let config = ApiConfig {
        base_url,
        timeout_ms,
        retry_attempts: 3,
    };
    Arc::new(Store::new(ApiClient::new(config).unwrap()))
}

fn category_json(id: u64, title: &str, rank: u32) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "image": {
            "id": id,
            "url": format!("https://example.com/{id}.jpg"),
            "name": title.to_lowercase(),
        },
        "rank": rank,
        "createdAt": "2023-01-01T00:00:00Z",
        "updatedAt": "2023-01-01T00:00:00Z",
    })
}

fn question_json(id: u64, title: &str, order: u32) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "subtitle": "Care guide",
        "image_uri": format!("https://example.com/q{id}.jpg"),
        "uri": format!("https://example.com/articles/{id}"),
        "order": order,
    })
}

async fn mount_categories(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/getCategories"))
        .respond_with(template)
        .mount(server)
        .await;
}

async fn mount_questions(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/getQuestions"))
        .respond_with(template)
        .mount(server)
        .await;
}

#[test]
fn initial_state_is_empty_idle() {
    let store = Store::new(ApiClient::new(ApiConfig::default()).unwrap());
    let state = store.state();

    assert!(state.categories.items.is_empty());
    assert!(!state.categories.loading);
    assert_eq!(state.categories.error, None);
    assert!(state.questions.items.is_empty());
    assert!(!state.questions.loading);
    assert_eq!(state.questions.error, None);
}

#[tokio::test]
async fn pending_state_is_set_before_io_settles() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "data": [] }))
            .set_delay(Duration::from_millis(200)),
    )
    .await;

    let store = store_for(server.uri(), 5_000);
    let handle = store.fetch_categories();

    let state = store.state();
    assert!(state.categories.loading);
    assert_eq!(state.categories.error, None);

    handle.await.unwrap();
    assert!(!store.state().categories.loading);
}

#[tokio::test]
async fn successful_fetch_replaces_items_in_response_order() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "data": [category_json(1, "Indoor Plants", 1), category_json(2, "Outdoor Plants", 2)]
        })),
    )
    .await;

    let store = store_for(server.uri(), 5_000);
    store.fetch_categories().await.unwrap();

    let state = store.state();
    assert_eq!(state.categories.items.len(), 2);
    assert_eq!(state.categories.items[0].title, "Indoor Plants");
    assert_eq!(state.categories.items[1].title, "Outdoor Plants");
    assert!(!state.categories.loading);
    assert_eq!(state.categories.error, None);
}

#[tokio::test]
async fn successful_questions_fetch_decodes_bare_array() {
    let server = MockServer::start().await;
    mount_questions(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!([question_json(1, "How to water succulents?", 1)])),
    )
    .await;

    let store = store_for(server.uri(), 5_000);
    store.fetch_questions().await.unwrap();

    let state = store.state();
    assert_eq!(state.questions.items.len(), 1);
    assert_eq!(state.questions.items[0].title, "How to water succulents?");
    assert_eq!(state.questions.error, None);
}

#[tokio::test]
async fn empty_collection_is_a_success() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "data": [] })),
    )
    .await;

    let store = store_for(server.uri(), 5_000);
    store.fetch_categories().await.unwrap();

    let state = store.state();
    assert!(state.categories.items.is_empty());
    assert_eq!(state.categories.error, None);
}

#[tokio::test]
async fn missing_data_field_classifies_as_invalid_format_and_keeps_items() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "data": [category_json(1, "Indoor Plants", 1)] })),
    )
    .await;

    let store = store_for(server.uri(), 5_000);
    store.fetch_categories().await.unwrap();
    assert_eq!(store.state().categories.items.len(), 1);

    server.reset().await;
    mount_categories(&server, ResponseTemplate::new(200).set_body_json(json!({}))).await;

    store.fetch_categories().await.unwrap();
    let state = store.state();
    assert_eq!(state.categories.error.as_deref(), Some(INVALID_RESPONSE_FORMAT));
    assert_eq!(state.categories.items.len(), 1);
    assert!(!state.categories.loading);
}

#[tokio::test]
async fn null_questions_body_classifies_as_invalid_format() {
    let server = MockServer::start().await;
    mount_questions(&server, ResponseTemplate::new(200).set_body_json(json!(null))).await;

    let store = store_for(server.uri(), 5_000);
    store.fetch_questions().await.unwrap();

    let state = store.state();
    assert_eq!(state.questions.error.as_deref(), Some(INVALID_RESPONSE_FORMAT));
    assert!(state.questions.items.is_empty());
}

#[tokio::test]
async fn deadline_abort_classifies_as_timeout() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "data": [] }))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let store = store_for(server.uri(), 100);
    store.fetch_categories().await.unwrap();

    let state = store.state();
    assert_eq!(state.categories.error.as_deref(), Some(TIMEOUT_ERROR));
    assert!(!state.categories.loading);
}

#[tokio::test]
async fn unreachable_server_classifies_as_network_error() {
    // bind a server only to learn a free port, then shut it down
    let server = MockServer::start().await;
    let dead_uri = server.uri();
    drop(server);

    let store = store_for(dead_uri, 5_000);
    store.fetch_categories().await.unwrap();

    let state = store.state();
    assert_eq!(state.categories.error.as_deref(), Some(NETWORK_ERROR));
}

#[tokio::test]
async fn server_supplied_message_is_surfaced_verbatim() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        ResponseTemplate::new(500).set_body_json(json!({ "message": "Custom failure" })),
    )
    .await;

    let store = store_for(server.uri(), 5_000);
    store.fetch_categories().await.unwrap();

    assert_eq!(store.state().categories.error.as_deref(), Some("Custom failure"));
}

#[tokio::test]
async fn server_error_without_message_is_generic_per_resource() {
    let server = MockServer::start().await;
    mount_categories(&server, ResponseTemplate::new(500).set_body_json(json!({}))).await;
    mount_questions(&server, ResponseTemplate::new(500).set_body_json(json!({}))).await;

    let store = store_for(server.uri(), 5_000);
    store.fetch_categories().await.unwrap();
    store.fetch_questions().await.unwrap();

    let state = store.state();
    assert_eq!(
        state.categories.error.as_deref(),
        Some("Failed to fetch categories")
    );
    assert_eq!(
        state.questions.error.as_deref(),
        Some("Failed to fetch questions")
    );
}

#[tokio::test]
async fn non_transport_failure_classifies_as_unknown() {
    let store = store_for("not a base url".to_string(), 5_000);
    store.fetch_categories().await.unwrap();

    assert_eq!(store.state().categories.error.as_deref(), Some(UNKNOWN_ERROR));
}

#[tokio::test]
async fn stale_items_survive_a_failed_refetch() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "data": [category_json(1, "Indoor Plants", 1)] })),
    )
    .await;

    let store = store_for(server.uri(), 5_000);
    store.fetch_categories().await.unwrap();

    server.reset().await;
    mount_categories(&server, ResponseTemplate::new(500).set_body_json(json!({}))).await;

    store.fetch_categories().await.unwrap();
    let state = store.state();
    assert_eq!(state.categories.items.len(), 1);
    assert_eq!(state.categories.items[0].title, "Indoor Plants");
    assert!(state.categories.error.is_some());
}

#[tokio::test]
async fn clear_is_idempotent() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "data": [category_json(1, "Indoor Plants", 1)] })),
    )
    .await;

    let store = store_for(server.uri(), 5_000);
    store.fetch_categories().await.unwrap();
    store.dispatch(Action::Categories(ResourceAction::SetError(
        "manual".to_string(),
    )));

    store.dispatch(Action::Categories(ResourceAction::Clear));
    let once = store.state();
    store.dispatch(Action::Categories(ResourceAction::Clear));

    assert_eq!(store.state(), once);
    assert!(once.categories.items.is_empty());
    assert_eq!(once.categories.error, None);
}

#[tokio::test]
async fn clear_does_not_mask_an_in_flight_fetch() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "data": [category_json(1, "Indoor Plants", 1)] }))
            .set_delay(Duration::from_millis(200)),
    )
    .await;

    let store = store_for(server.uri(), 5_000);
    let handle = store.fetch_categories();

    store.dispatch(Action::Categories(ResourceAction::Clear));
    let mid_flight = store.state();
    assert!(mid_flight.categories.items.is_empty());
    assert!(mid_flight.categories.loading);

    // the in-flight completion still lands afterward
    handle.await.unwrap();
    assert_eq!(store.state().categories.items.len(), 1);
}

/// First request gets a slow response, every later request a fast one.
struct SlowThenFast {
    hits: AtomicUsize,
}

impl Respond for SlowThenFast {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        if self.hits.fetch_add(1, Ordering::SeqCst) == 0 {
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [category_json(1, "Slow", 1)] }))
                .set_delay(Duration::from_millis(400))
        } else {
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": [category_json(2, "Fast", 2)] }))
        }
    }
}

#[tokio::test]
async fn overlapping_fetches_resolve_last_write_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/getCategories"))
        .respond_with(SlowThenFast {
            hits: AtomicUsize::new(0),
        })
        .mount(&server)
        .await;

    let store = store_for(server.uri(), 5_000);

    let first = store.fetch_categories();
    // give the first request time to reach the server before issuing the second
    tokio::time::sleep(Duration::from_millis(100)).await;
    let second = store.fetch_categories();

    first.await.unwrap();
    second.await.unwrap();

    // the slow response settles last and owns the slice, even though its
    // fetch was issued first
    let state = store.state();
    assert_eq!(state.categories.items.len(), 1);
    assert_eq!(state.categories.items[0].title, "Slow");
    assert_eq!(state.categories.error, None);
}

#[tokio::test]
async fn subscribers_observe_the_full_lifecycle() {
    let server = MockServer::start().await;
    mount_categories(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "data": [category_json(1, "Indoor Plants", 1)] })),
    )
    .await;

    let store = store_for(server.uri(), 5_000);
    let observed: Arc<std::sync::Mutex<Vec<(bool, usize)>>> =
        Arc::new(std::sync::Mutex::new(Vec::new()));

    let sink = Arc::clone(&observed);
    store.subscribe(move |state| {
        sink.lock()
            .unwrap()
            .push((state.categories.loading, state.categories.items.len()));
    });

    store.fetch_categories().await.unwrap();

    let observed = observed.lock().unwrap();
    assert_eq!(observed.first(), Some(&(true, 0)));
    assert_eq!(observed.last(), Some(&(false, 1)));
}
