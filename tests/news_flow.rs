//! End-to-end tests: Firestore REST (mocked) → repository → controller → cards.
//!
//! Each test starts its own wiremock server standing in for the
//! `documents:runQuery` endpoint.

use chrono::{Duration, Utc};
use dailynews::app::{App, Content, LoadState, ERROR_MESSAGE};
use dailynews::config::Config;
use dailynews::news::{NewsRepository, Rendered, Selection, EMPTY_STATE, FALLBACK_LIMIT};
use dailynews::store::{Category, FirestoreStore};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/v1/projects/daily-news/databases/(default)/documents:runQuery";

fn repository_for(server: &MockServer) -> NewsRepository {
    let config = Config {
        project_id: Some("daily-news".to_string()),
        base_url: server.uri(),
        ..Config::default()
    };
    let store = FirestoreStore::new(&config).unwrap();
    NewsRepository::new(Arc::new(store))
}

fn row(id: &str, category: &str, hours_ago: i64) -> Value {
    let date = (Utc::now() - Duration::hours(hours_ago)).to_rfc3339();
    json!({
        "document": {
            "name": format!("projects/daily-news/databases/(default)/documents/news/{}", id),
            "fields": {
                "category": { "stringValue": category },
                "title": { "stringValue": format!("{} 헤드라인", id) },
                "summary": { "stringValue": "요약" },
                "link": { "stringValue": format!("https://n.news.naver.com/{}", id) },
                "date": { "timestampValue": date }
            }
        },
        "readTime": date
    })
}

fn empty_result() -> Value {
    json!([{ "readTime": Utc::now().to_rfc3339() }])
}

/// Mount the "since midnight" query (date filter) and the "most recent"
/// query (limit) as separate mocks.
async fn mount(server: &MockServer, today: Value, recent: Value) {
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_string_contains("GREATER_THAN_OR_EQUAL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(today))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_string_contains("\"limit\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(recent))
        .mount(server)
        .await;
}

fn card_ids(app: &App) -> Vec<String> {
    match app.content() {
        Content::Feed(rendered) => rendered.cards().iter().map(|c| c.id.to_string()).collect(),
        Content::Error(msg) => panic!("unexpected error state: {}", msg),
    }
}

#[tokio::test]
async fn test_today_items_are_shown_without_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_string_contains("GREATER_THAN_OR_EQUAL"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([row("a", "stock", 0), row("b", "it", 0)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(QUERY_PATH))
        .and(body_string_contains("\"limit\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_result()))
        .expect(0)
        .mount(&server)
        .await;

    let repository = repository_for(&server);
    let mut app = App::new();
    app.load(&repository).await;

    assert_eq!(app.load_state(), LoadState::Loaded);
    assert!(!app.is_loading());
    assert_eq!(card_ids(&app), vec!["a", "b"]);
}

#[tokio::test]
async fn test_empty_today_falls_back_to_recent() {
    let server = MockServer::start().await;
    let recent: Vec<Value> = (0..6)
        .map(|i| row(&format!("old{}", i), "economy", 30 + i))
        .collect();
    mount(&server, empty_result(), Value::Array(recent)).await;

    let items = repository_for(&server).load_today_or_recent().await.unwrap();

    assert_eq!(items.len(), FALLBACK_LIMIT);
    assert_eq!(&*items[0].id, "old0");
    assert!(items.windows(2).all(|w| w[0].date >= w[1].date));
}

#[tokio::test]
async fn test_yesterday_only_store_renders_one_card() {
    let server = MockServer::start().await;
    mount(&server, empty_result(), json!([row("yesterday", "it", 30)])).await;

    let mut app = App::new();
    app.load(&repository_for(&server)).await;

    assert_eq!(card_ids(&app), vec!["yesterday"]);
    match app.content() {
        Content::Feed(rendered) => assert_eq!(rendered.cards()[0].label, "IT"),
        other => panic!("expected cards, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stock_selection_over_mixed_categories() {
    let server = MockServer::start().await;
    mount(
        &server,
        json!([row("s1", "stock", 0), row("e1", "economy", 0), row("e2", "economy", 0)]),
        empty_result(),
    )
    .await;

    let mut app = App::new();
    app.load(&repository_for(&server)).await;
    assert_eq!(card_ids(&app).len(), 3);

    app.select_category(Selection::Only(Category::Stock));
    assert_eq!(card_ids(&app), vec!["s1"]);

    app.select_category(Selection::All);
    assert_eq!(card_ids(&app).len(), 3);
}

#[tokio::test]
async fn test_empty_store_shows_empty_state() {
    let server = MockServer::start().await;
    mount(&server, empty_result(), empty_result()).await;

    let mut app = App::new();
    app.load(&repository_for(&server)).await;

    assert_eq!(app.load_state(), LoadState::Loaded);
    match app.content() {
        Content::Feed(Rendered::Empty { lines }) => assert_eq!(*lines, EMPTY_STATE),
        other => panic!("expected empty state, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_keeps_previous_data() {
    let server = MockServer::start().await;
    mount(&server, json!([row("kept", "stock", 0)]), empty_result()).await;

    let repository = repository_for(&server);
    let mut app = App::new();
    app.load(&repository).await;
    assert_eq!(app.view_state().news_data.len(), 1);

    server.reset().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    app.load(&repository).await;

    assert_eq!(app.load_state(), LoadState::Failed);
    assert!(!app.is_loading());
    assert!(matches!(app.content(), Content::Error(msg) if *msg == ERROR_MESSAGE));
    assert_eq!(&*app.view_state().news_data[0].id, "kept");
}
