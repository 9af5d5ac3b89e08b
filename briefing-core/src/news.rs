//! News data structures shared by every provider adapter and the aggregator

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::BriefingError;
use crate::region::Region;

/// Source of a news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    /// Name of the news source (e.g., "Reuters", "The Hindu")
    pub name: String,
}

impl ArticleSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A normalized news article
///
/// Every provider response is mapped onto this shape. Articles are never
/// mutated after normalization; the pipeline only filters and reorders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article headline
    pub title: String,
    /// Short summary or excerpt
    pub description: String,
    /// Article URL
    pub url: String,
    /// Publication timestamp, UTC RFC 3339 when the provider value was parseable
    pub published_at: String,
    /// Source information
    pub source: ArticleSource,
    /// Body text when the provider supplies it, empty otherwise
    #[serde(default)]
    pub content: String,
}

/// News category understood by the aggregator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Technology,
    Business,
    Health,
    Sports,
    #[default]
    General,
    Entertainment,
    Science,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Technology,
        Category::Business,
        Category::Health,
        Category::Sports,
        Category::General,
        Category::Entertainment,
        Category::Science,
    ];

    /// Lower-case wire token used in provider query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Business => "business",
            Category::Health => "health",
            Category::Sports => "sports",
            Category::General => "general",
            Category::Entertainment => "entertainment",
            Category::Science => "science",
        }
    }

    pub fn is_general(&self) -> bool {
        matches!(self, Category::General)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = BriefingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == token)
            .ok_or_else(|| BriefingError::invalid_input(format!("unknown news category '{}'", s)))
    }
}

/// A caller's request for news
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsQuery {
    pub category: Category,
    pub region: Region,
    /// Ceiling on returned articles, always at least 1
    pub max_articles: usize,
}

impl NewsQuery {
    pub fn new(category: Category, region: Region, max_articles: usize) -> Self {
        Self {
            category,
            region,
            max_articles: max_articles.max(1),
        }
    }

    /// Build a query from loosely-typed caller input
    ///
    /// An unrecognized category degrades to `general` rather than failing the
    /// request; unknown regions resolve to `global` (see [`Region::parse`]).
    pub fn parse(category: &str, region: &str, max_articles: usize) -> Self {
        let category = category.parse().unwrap_or_else(|e| {
            warn!("{}; using general", e);
            Category::General
        });
        Self::new(category, Region::parse(region), max_articles)
    }
}

/// Outcome of an aggregation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Result envelope returned by every aggregation entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub status: EnvelopeStatus,
    /// Number of distinct valid articles found before truncation
    pub total_results: usize,
    /// Articles ordered newest first, never longer than the requested maximum
    pub articles: Vec<Article>,
    /// Providers that contributed at least one article
    pub apis_used: Vec<String>,
    /// Fallback strategies that were invoked and yielded articles
    pub sources_used: Vec<String>,
    /// Human-readable explanation, present only on terminal failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl ResultEnvelope {
    pub fn success(
        total_results: usize,
        articles: Vec<Article>,
        apis_used: Vec<String>,
        sources_used: Vec<String>,
    ) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            total_results,
            articles,
            apis_used,
            sources_used,
            error: None,
            generated_at: Utc::now(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            total_results: 0,
            articles: Vec::new(),
            apis_used: Vec::new(),
            sources_used: Vec::new(),
            error: Some(message.into()),
            generated_at: Utc::now(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == EnvelopeStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!("  Technology ".parse::<Category>().unwrap(), Category::Technology);
        assert!("politics".parse::<Category>().is_err());
    }

    #[test]
    fn test_query_parse_is_lenient() {
        let query = NewsQuery::parse("politics", "in", 0);
        assert_eq!(query.category, Category::General);
        assert_eq!(query.region, Region::India);
        assert_eq!(query.max_articles, 1);
    }

    #[test]
    fn test_envelope_serialization() {
        let envelope = ResultEnvelope::failure("nothing found");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "nothing found");
        assert_eq!(json["articles"].as_array().unwrap().len(), 0);

        let envelope = ResultEnvelope::success(0, vec![], vec!["GNews".into()], vec![]);
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "success");
        assert!(json.get("error").is_none());
        assert_eq!(json["apis_used"][0], "GNews");
    }
}
