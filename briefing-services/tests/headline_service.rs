mod common;

use std::sync::Arc;

use briefing_core::{Category, EnvelopeStatus};
use briefing_news::AggregationPolicy;
use briefing_services::HeadlineService;

use common::ScriptedHeadlines;

const INDIA_TECH_TERMS: &str =
    "technology OR India OR Indian OR tech OR innovation OR startup OR digital";

fn service(source: Arc<ScriptedHeadlines>) -> HeadlineService {
    HeadlineService::new(source, AggregationPolicy::default())
}

fn top_calls(source: &ScriptedHeadlines) -> Vec<String> {
    source
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("top:"))
        .collect()
}

#[tokio::test]
async fn test_top_headlines_first() {
    let source = Arc::new(ScriptedHeadlines::answering("top:in:technology"));

    let envelope = service(source.clone())
        .fetch_headlines(Category::Technology, "in", 3)
        .await;

    assert!(envelope.is_success());
    assert_eq!(envelope.articles.len(), 3);
    assert_eq!(envelope.apis_used, vec!["NewsAPI"]);
    assert_eq!(envelope.sources_used, vec!["top-headlines"]);
    assert_eq!(source.calls(), vec!["top:in:technology"]);
}

#[tokio::test]
async fn test_enhanced_search_after_empty_headlines() {
    let source = Arc::new(ScriptedHeadlines::answering("search:2:"));

    let envelope = service(source.clone())
        .fetch_headlines(Category::Technology, "IN", 3)
        .await;

    assert_eq!(envelope.sources_used, vec!["everything"]);
    assert_eq!(
        source.calls(),
        vec![
            "top:in:technology".to_string(),
            format!("search:2:{}", INDIA_TECH_TERMS),
        ]
    );
}

#[tokio::test]
async fn test_broad_search_third() {
    let source = Arc::new(ScriptedHeadlines::answering("search:3:"));

    let envelope = service(source.clone())
        .fetch_headlines(Category::Technology, "in", 3)
        .await;

    assert_eq!(envelope.sources_used, vec!["broad-search"]);
    assert_eq!(
        source.calls().last().map(String::as_str),
        Some("search:3:technology OR tech OR innovation OR digital OR startup")
    );
}

#[tokio::test]
async fn test_general_category_before_other_countries() {
    let source = Arc::new(ScriptedHeadlines::answering("top:in:general"));

    let envelope = service(source.clone())
        .fetch_headlines(Category::Technology, "in", 3)
        .await;

    assert_eq!(envelope.sources_used, vec!["general-category"]);
    assert_eq!(top_calls(&source), vec!["top:in:technology", "top:in:general"]);
}

#[tokio::test]
async fn test_alternate_countries_in_order() {
    let source = Arc::new(ScriptedHeadlines::answering("top:gb:technology"));

    let envelope = service(source.clone())
        .fetch_headlines(Category::Technology, "in", 3)
        .await;

    assert_eq!(envelope.sources_used, vec!["country-gb"]);
    assert_eq!(
        top_calls(&source),
        vec![
            "top:in:technology",
            "top:in:general",
            "top:us:technology",
            "top:gb:technology",
        ]
    );
}

#[tokio::test]
async fn test_exhausted_strategies_fail() {
    let source = Arc::new(ScriptedHeadlines::silent());

    let envelope = service(source.clone())
        .fetch_headlines(Category::Technology, "in", 3)
        .await;

    assert_eq!(envelope.status, EnvelopeStatus::Error);
    assert_eq!(
        envelope.error.as_deref(),
        Some("No news articles found despite multiple search strategies")
    );
    assert_eq!(
        top_calls(&source),
        vec![
            "top:in:technology",
            "top:in:general",
            "top:us:technology",
            "top:gb:technology",
            "top:au:technology",
            "top:ca:technology",
        ]
    );
}

#[tokio::test]
async fn test_general_request_skips_category_relaxation() {
    let source = Arc::new(ScriptedHeadlines::silent());

    service(source.clone())
        .fetch_headlines(Category::General, "fr", 3)
        .await;

    assert_eq!(
        top_calls(&source),
        vec![
            "top:fr:general",
            "top:us:general",
            "top:in:general",
            "top:gb:general",
            "top:au:general",
            "top:ca:general",
        ]
    );
}
