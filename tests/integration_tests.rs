//! End-to-end tests for the todo service.
//!
//! Each test starts the real router on an ephemeral port and talks to it
//! over HTTP with `reqwest`. Redirects are not followed so the `/tasks`
//! alias can be asserted directly.
//!
//! Run with: `cargo test --test integration_tests`
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use chrono::Utc;
use reqwest::header::LOCATION;
use reqwest::{Client, StatusCode, redirect};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use todo_service::{AppState, Config, TaskStore, build_router};

/// Test fixture owning a running server and an HTTP client.
struct TestFixture {
    base_url: String,
    client: Client,
    store: TaskStore,
}

impl TestFixture {
    /// Start a server with the default configuration.
    async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    /// Start a server with a custom configuration.
    async fn with_config(config: Config) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to ephemeral port");
        let addr = listener.local_addr().expect("Failed to get local address");

        let store = TaskStore::new();
        let app = build_router(AppState::with_store(store.clone(), config));

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: format!("http://{addr}"),
            client,
            store,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn create(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/todos"))
            .json(body)
            .send()
            .await
            .expect("Create request failed")
    }
}

fn todo_json(id: i64, name: &str, due_in: chrono::Duration, completed: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "dueDate": (Utc::now() + due_in).to_rfc3339(),
        "isCompleted": completed,
    })
}

// ============================================================================
// Creation & Retrieval
// ============================================================================

#[tokio::test]
async fn test_create_get_list_scenario() {
    let fixture = TestFixture::new().await;
    let payload = todo_json(1, "A", chrono::Duration::days(1), false);

    let response = fixture.create(&payload).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(LOCATION).unwrap(),
        "/todos/{id}",
        "Location is the literal route template"
    );
    let created: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "A");
    assert_eq!(created["isCompleted"], false);

    let response = fixture
        .client
        .get(fixture.url("/todos/1"))
        .send()
        .await
        .expect("Get request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(fetched, created);

    let response = fixture
        .client
        .get(fixture.url("/todos"))
        .send()
        .await
        .expect("List request failed");
    assert_eq!(response.status(), StatusCode::OK);
    let listed: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn test_created_todos_listed_in_order() {
    let fixture = TestFixture::new().await;

    for (id, name) in [(10, "first"), (5, "second"), (7, "third")] {
        let response = fixture
            .create(&todo_json(id, name, chrono::Duration::hours(3), false))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let listed: Vec<Value> = fixture
        .client
        .get(fixture.url("/todos"))
        .send()
        .await
        .expect("List request failed")
        .json()
        .await
        .expect("Failed to parse response");

    let names: Vec<&str> = listed.iter().filter_map(|t| t["name"].as_str()).collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_create_accepts_dates_without_offset() {
    let fixture = TestFixture::new().await;

    for (id, due) in [(1, "2999-01-01T00:00:00"), (2, "2999-01-01")] {
        let response = fixture
            .create(&json!({"id": id, "name": "A", "dueDate": due, "isCompleted": false}))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED, "dueDate {due}");

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["dueDate"], "2999-01-01T00:00:00Z");
    }

    assert_eq!(fixture.store.len().await, 2);
}

#[tokio::test]
async fn test_get_unknown_id_returns_404() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .get(fixture.url("/todos/12345"))
        .send()
        .await
        .expect("Get request failed");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().is_empty());
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_past_due_date_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .create(&todo_json(1, "late", -chrono::Duration::days(1), false))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"].get("dueDate").is_some());
    assert!(body["errors"].get("isCompleted").is_none());
    assert!(fixture.store.is_empty().await);
}

#[tokio::test]
async fn test_completed_todo_is_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .create(&todo_json(1, "done", chrono::Duration::days(1), true))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["errors"].get("isCompleted").is_some());
    assert!(body["errors"].get("dueDate").is_none());
}

#[tokio::test]
async fn test_both_errors_in_one_response() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .create(&todo_json(1, "both", -chrono::Duration::minutes(5), true))
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "One or more validation errors occurred.");
    assert!(body["errors"].get("dueDate").is_some());
    assert!(body["errors"].get("isCompleted").is_some());
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let fixture = TestFixture::new().await;

    let response = fixture.create(&json!({"id": 1, "name": "A"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Missing required field: dueDate");
}

// ============================================================================
// Access Control
// ============================================================================

#[tokio::test]
async fn test_delete_always_forbidden() {
    let fixture = TestFixture::new().await;
    fixture
        .create(&todo_json(1, "keep me", chrono::Duration::days(1), false))
        .await;
    let before = fixture.store.get_todos().await;

    for path in ["/todos/1", "/todos/2", "/todos"] {
        let response = fixture
            .client
            .delete(fixture.url(path))
            .send()
            .await
            .expect("Delete request failed");

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            response.text().await.unwrap(),
            "No tienes permiso para borrar."
        );
    }

    assert_eq!(fixture.store.get_todos().await, before);
}

#[tokio::test]
async fn test_delete_when_access_control_disabled() {
    let fixture = TestFixture::with_config(Config {
        deny_delete: false,
        ..Config::default()
    })
    .await;
    fixture
        .create(&todo_json(1, "A", chrono::Duration::days(1), false))
        .await;

    let response = fixture
        .client
        .delete(fixture.url("/todos/1"))
        .send()
        .await
        .expect("Delete request failed");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(fixture.store.is_empty().await);

    let response = fixture
        .client
        .delete(fixture.url("/todos/1"))
        .send()
        .await
        .expect("Delete request failed");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ============================================================================
// Redirect & Health
// ============================================================================

#[tokio::test]
async fn test_tasks_alias_redirects_to_todos() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .get(fixture.url("/tasks/5"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/todos/5");
}

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .expect("Health request failed");
    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["todos_count"], 0);
    assert!(body.get("version").is_some());
}
