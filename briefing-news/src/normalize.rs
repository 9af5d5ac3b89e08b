//! Normalization, validity filtering and near-duplicate removal
//!
//! Every adapter funnels its provider-specific record through
//! [`RawArticle::into_article`]; the aggregator then runs [`finalize`] over the
//! concatenated output of a call.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use briefing_core::{Article, ArticleSource};

use crate::config::AggregationPolicy;

/// Provider record before normalization
#[derive(Debug, Default, Clone)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<String>,
    pub source: String,
    pub content: Option<String>,
}

impl RawArticle {
    /// Trim every field, default absent ones to empty and canonicalize the timestamp
    pub fn into_article(self) -> Article {
        let published_at = self.published_at.unwrap_or_default();
        Article {
            title: clean(self.title),
            description: clean(self.description),
            url: clean(self.url),
            published_at: canonical_timestamp(published_at.trim()),
            source: ArticleSource::new(self.source.trim()),
            content: clean(self.content),
        }
    }
}

fn clean(field: Option<String>) -> String {
    field.map(|s| s.trim().to_string()).unwrap_or_default()
}

/// Parse the timestamp formats providers are known to emit
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.with_timezone(&Utc));
    }
    // NewsData / WorldNews style, no offset: assume UTC
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    // Currents: "2024-05-01 10:00:00 +0000"
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.with_timezone(&Utc));
    }

    None
}

/// Rewrite parseable timestamps as UTC RFC 3339; keep anything else verbatim
pub fn canonical_timestamp(value: &str) -> String {
    match parse_timestamp(value) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => value.to_string(),
    }
}

/// Check an article against the content-quality rules
pub fn is_valid(article: &Article, policy: &AggregationPolicy) -> bool {
    let title = article.title.trim();
    let description = article.description.trim();

    if title.is_empty() || description.is_empty() {
        return false;
    }

    if title.chars().count() < policy.min_title_len
        || description.chars().count() < policy.min_description_len
    {
        return false;
    }

    let title_lower = title.to_lowercase();
    let desc_lower = description.to_lowercase();
    !policy.blocked_phrases.iter().any(|phrase| {
        let phrase = phrase.to_lowercase();
        title_lower.contains(&phrase) || desc_lower.contains(&phrase)
    })
}

/// Drop every article that fails [`is_valid`], keeping order
pub fn filter_valid(articles: Vec<Article>, policy: &AggregationPolicy) -> Vec<Article> {
    articles
        .into_iter()
        .filter(|article| is_valid(article, policy))
        .collect()
}

fn title_tokens(title: &str) -> HashSet<String> {
    title
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Shared-token ratio relative to the larger token set
pub fn title_similarity(a: &str, b: &str) -> f64 {
    overlap(&title_tokens(a), &title_tokens(b))
}

fn overlap(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / larger as f64
}

/// Greedy, order-dependent near-duplicate removal
///
/// The first article of each story wins; later articles whose titles share
/// more than `threshold` of their tokens with a kept title are discarded.
/// Articles with an empty title are dropped.
pub fn dedupe(articles: Vec<Article>, threshold: f64) -> Vec<Article> {
    let mut kept_titles: Vec<HashSet<String>> = Vec::new();
    let mut unique = Vec::with_capacity(articles.len());

    for article in articles {
        let tokens = title_tokens(&article.title);
        if tokens.is_empty() {
            continue;
        }

        let is_duplicate = kept_titles
            .iter()
            .any(|seen| overlap(&tokens, seen) > threshold);

        if !is_duplicate {
            kept_titles.push(tokens);
            unique.push(article);
        }
    }

    unique
}

fn recency_cmp(a: &Article, b: &Article) -> Ordering {
    match (parse_timestamp(&a.published_at), parse_timestamp(&b.published_at)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        // Unparseable strings before empty ones, each group descending
        (None, None) => b.published_at.cmp(&a.published_at),
    }
}

/// Newest first; unparseable timestamps after valid ones, empty ones last
pub fn sort_by_recency(articles: &mut [Article]) {
    articles.sort_by(recency_cmp);
}

/// Filter, dedupe, sort and truncate a merged article list
///
/// Returns the number of distinct valid articles before truncation together
/// with the truncated list.
pub fn finalize(
    articles: Vec<Article>,
    policy: &AggregationPolicy,
    max_articles: usize,
) -> (usize, Vec<Article>) {
    let valid = filter_valid(articles, policy);
    let mut unique = dedupe(valid, policy.duplicate_threshold);
    sort_by_recency(&mut unique);
    let total = unique.len();
    unique.truncate(max_articles);
    (total, unique)
}
