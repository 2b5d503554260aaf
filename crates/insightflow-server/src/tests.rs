//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::time::Duration;
use tower::ServiceExt;

use insightflow_core::{ProviderClient, StubProvider};

fn setup_test_app() -> Router {
    let corpus = ReviewCorpus::embedded().unwrap();
    let provider = ProviderClient::Stub(StubProvider::with_delay(Duration::ZERO));
    create_router(corpus, provider, None, ServerConfig::default())
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

// ========== Analyze API Tests ==========

#[tokio::test]
async fn test_analyze_store() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/analyze",
            serde_json::json!({
                "subject": "연남동 카페",
                "category": "store"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["report"]["subject"], "연남동 카페");
    assert_eq!(json["report"]["category"], "store");
    assert_eq!(json["report"]["tier"], "consulting");
    assert_eq!(json["provider"], "stub");

    let score = json["report"]["sentiment_score"].as_u64().unwrap();
    assert!(score <= 100);

    // Store canned payload carries an urgent issue -> exactly one alert
    assert!(json["alert"]["message"].as_str().unwrap().contains("배송"));
}

#[tokio::test]
async fn test_analyze_mall_tier_basic() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/analyze",
            serde_json::json!({
                "subject": "우리집 원두상점",
                "category": "mall",
                "tier": "basic"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["report"]["tier"], "basic");

    let sections = json["report"]["sections"].as_array().unwrap();
    // Product-style popular items from the mall canned set
    let tags = sections
        .iter()
        .find(|s| s["kind"] == "tags")
        .expect("tag section present");
    let items: Vec<&str> = tags["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i.as_str().unwrap())
        .collect();
    assert!(items.contains(&"프리미엄 원두 세트"));
    assert!(!items.contains(&"시그니처 라떼"));
}

#[tokio::test]
async fn test_analyze_trend_sections() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/analyze",
            serde_json::json!({
                "subject": "연남동 카페",
                "category": "store",
                "tier": "trend"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let sections = json["report"]["sections"].as_array().unwrap();

    let table = sections
        .iter()
        .find(|s| s["kind"] == "revenue_table")
        .expect("revenue table present");
    let rows = table["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["revenue_display"], "4,200,000");
    assert_eq!(rows[0]["growth_style"], "positive");
    assert_eq!(rows[2]["growth_style"], "negative");

    let chart = sections
        .iter()
        .find(|s| s["kind"] == "trend_chart")
        .expect("trend chart present");
    assert_eq!(chart["bars"].as_array().unwrap().len(), 6);

    // Trend tier carries no consulting block
    assert!(!sections.iter().any(|s| s["kind"] == "consulting"));
}

#[tokio::test]
async fn test_analyze_blank_subject_rejected() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/analyze",
            serde_json::json!({
                "subject": "   ",
                "category": "store"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("Subject"));
}

#[tokio::test]
async fn test_analyze_unknown_category_rejected() {
    let app = setup_test_app();

    let response = app
        .oneshot(post_json(
            "/api/analyze",
            serde_json::json!({
                "subject": "카페",
                "category": "bazaar"
            }),
        ))
        .await
        .unwrap();

    // Deserialization failure in the request body
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ========== Corpus API Tests ==========

#[tokio::test]
async fn test_get_corpus() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/corpus")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let count = json["count"].as_u64().unwrap();
    assert!(count > 0);
    assert_eq!(json["reviews"].as_array().unwrap().len() as u64, count);

    let first = &json["reviews"][0];
    let rating = first["rating"].as_u64().unwrap();
    assert!((1..=5).contains(&rating));
}

// ========== Health API Tests ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["provider"]["backend"], "stub");
    assert_eq!(json["provider"]["healthy"], true);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
