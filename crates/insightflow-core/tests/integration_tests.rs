//! Integration tests for insightflow-core
//!
//! These tests exercise the full corpus -> request -> provider ->
//! render -> session workflow on the stub path, the way the demo runs
//! without a configured credential.

use std::time::Duration;

use insightflow_core::{
    render, AnalysisRequest, Category, CompletionOutcome, Error, InsightProvider, ProviderClient,
    ReportSession, ReviewCorpus, Section, StubProvider, Tier, TREND_MONTHS,
};

fn stub_client() -> ProviderClient {
    ProviderClient::Stub(StubProvider::with_delay(Duration::from_millis(20)))
}

fn corpus_request(subject: &str, category: Category, tier: Tier) -> AnalysisRequest {
    let corpus = ReviewCorpus::embedded().unwrap();
    AnalysisRequest::new(subject, corpus.reviews().to_vec(), category, tier).unwrap()
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

#[tokio::test]
async fn test_store_demo_flow_raises_one_alert() {
    let provider = stub_client();
    let request = corpus_request("연남동 카페", Category::Store, Tier::Consulting);

    let started = std::time::Instant::now();
    let insight = provider.request_insight(&request).await.unwrap();
    // Simulated provider delay applies on the stub path
    assert!(started.elapsed() >= Duration::from_millis(20));

    assert!(insight.sentiment_score <= 100);
    assert_eq!(insight.monthly_trend.len(), TREND_MONTHS);
    assert!(!insight.urgent_issue.is_empty());

    let rendered = render(&request.subject, &insight, request.category, request.tier).unwrap();
    let alert = rendered.alert.expect("exactly one alert banner");
    assert_eq!(alert.message, insight.urgent_issue);
    assert_eq!(rendered.report.subject, "연남동 카페");
}

#[tokio::test]
async fn test_mall_demo_flow_uses_product_vocabulary() {
    let provider = stub_client();
    let request = corpus_request("우리집 원두상점", Category::Mall, Tier::Consulting);

    let insight = provider.request_insight(&request).await.unwrap();
    let store_insight = StubProvider::canned_insight(Category::Store);

    // Popular items are product-style labels, not the store's menu
    for item in &insight.popular_items {
        assert!(!store_insight.popular_items.contains(item));
    }

    // Revenue item names come from the mall set, never the store set
    let store_items: Vec<_> = store_insight
        .revenue_by_item
        .iter()
        .map(|r| r.item.clone())
        .collect();
    assert!(!insight.revenue_by_item.is_empty());
    for row in &insight.revenue_by_item {
        assert!(!store_items.contains(&row.item));
    }
}

#[tokio::test]
async fn test_full_session_cycle() {
    let provider = stub_client();
    let mut session = ReportSession::new();

    let request = corpus_request("연남동 카페", Category::Store, Tier::Trend);
    let token = session.begin().expect("idle session accepts a request");
    assert!(session.begin().is_none());

    let insight = provider.request_insight(&request).await.unwrap();
    let rendered = render(&request.subject, &insight, request.category, request.tier).unwrap();
    assert_eq!(
        session.finish(token, rendered),
        CompletionOutcome::Applied
    );

    let report = &session.current().unwrap().report;
    assert_eq!(report.tier, Tier::Trend);
    let rows = report
        .sections
        .iter()
        .find_map(|s| match s {
            Section::RevenueTable { rows } => Some(rows.len()),
            _ => None,
        })
        .unwrap();
    assert_eq!(rows, insight.revenue_by_item.len());
}

#[tokio::test]
async fn test_tab_switch_discards_stale_result() {
    let provider = stub_client();
    let mut session = ReportSession::new();

    // Request on the store tab...
    let store_request = corpus_request("연남동 카페", Category::Store, Tier::Basic);
    let stale_token = session.begin().unwrap();
    let store_insight = provider.request_insight(&store_request).await.unwrap();
    let stale_rendered = render(
        &store_request.subject,
        &store_insight,
        store_request.category,
        store_request.tier,
    )
    .unwrap();

    // ...user switches to the mall tab before it lands
    session.switch_category();
    let mall_request = corpus_request("우리집 원두상점", Category::Mall, Tier::Basic);
    let fresh_token = session.begin().unwrap();
    let mall_insight = provider.request_insight(&mall_request).await.unwrap();
    let fresh_rendered = render(
        &mall_request.subject,
        &mall_insight,
        mall_request.category,
        mall_request.tier,
    )
    .unwrap();

    assert_eq!(
        session.finish(fresh_token, fresh_rendered),
        CompletionOutcome::Applied
    );
    assert_eq!(
        session.finish(stale_token, stale_rendered),
        CompletionOutcome::DiscardedStale
    );
    assert_eq!(session.current().unwrap().report.category, Category::Mall);
}

// =============================================================================
// Input validation
// =============================================================================

#[test]
fn test_blank_subject_rejected_before_any_call() {
    let corpus = ReviewCorpus::embedded().unwrap();
    let result = AnalysisRequest::new(
        "",
        corpus.reviews().to_vec(),
        Category::Store,
        Tier::Basic,
    );
    assert!(matches!(result, Err(Error::EmptyInput)));
}

#[test]
fn test_embedded_corpus_is_prompt_ready() {
    let corpus = ReviewCorpus::embedded().unwrap();
    let block = corpus.prompt_block();
    assert_eq!(block.lines().count(), corpus.len());
    for line in block.lines() {
        assert!(line.starts_with("[rating "));
    }
}
