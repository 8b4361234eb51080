use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Sentiment label attached to every article by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            "neutral" => Ok(Sentiment::Neutral),
            other => Err(Error::Config(format!("Unknown sentiment: {}", other))),
        }
    }
}

/// Sentiment facet of the filter bar: either unconstrained or one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SentimentFilter {
    #[default]
    All,
    Only(Sentiment),
}

impl SentimentFilter {
    pub fn as_param(&self) -> Option<&'static str> {
        match self {
            SentimentFilter::All => None,
            SentimentFilter::Only(sentiment) => Some(sentiment.as_str()),
        }
    }
}

impl fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentFilter::All => f.write_str("all"),
            SentimentFilter::Only(sentiment) => sentiment.fmt(f),
        }
    }
}

impl FromStr for SentimentFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(SentimentFilter::All)
        } else {
            s.parse().map(SentimentFilter::Only)
        }
    }
}

impl From<Sentiment> for SentimentFilter {
    fn from(sentiment: Sentiment) -> Self {
        SentimentFilter::Only(sentiment)
    }
}

/// A string-valued facet (source or category).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    pub fn as_param(&self) -> Option<&str> {
        match self {
            Facet::All => None,
            Facet::Only(value) => Some(value.as_str()),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::All => f.write_str("all"),
            Facet::Only(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Facet {
    fn from(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("all") {
            Facet::All
        } else {
            Facet::Only(value.to_string())
        }
    }
}

impl From<String> for Facet {
    fn from(value: String) -> Self {
        Facet::from(value.as_str())
    }
}

/// The four independent filter facets owned by the dashboard.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filters {
    pub search: String,
    pub sentiment: SentimentFilter,
    pub source: Facet,
    pub category: Facet,
}

/// Parameters for `GET /articles`. `None` and empty strings are never sent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArticleQuery {
    pub limit: Option<u32>,
    pub sentiment: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ArticleQuery {
    pub fn from_filters(filters: &Filters, limit: Option<u32>) -> Self {
        Self {
            limit,
            sentiment: filters.sentiment.as_param().map(str::to_string),
            source: filters.source.as_param().map(str::to_string),
            category: filters.category.as_param().map(str::to_string),
            search: Some(filters.search.clone()),
        }
    }

    /// Query pairs in wire order, with absent and empty values dropped.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let candidates = [
            ("limit", self.limit.map(|limit| limit.to_string())),
            ("sentiment", self.sentiment.clone()),
            ("source", self.source.clone()),
            ("category", self.category.clone()),
            ("search", self.search.clone()),
        ];

        candidates
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
            .collect()
    }
}

/// Article record exactly as `GET /articles` returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiArticle {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub author: Option<String>,
    pub published_at: String,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub read_time: u32,
    #[serde(default)]
    pub scraped_at: Option<String>,
}

/// Article in the shape the dashboard displays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub url: String,
    pub source: String,
    pub author: Option<String>,
    pub published_at: DateTime<Utc>,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub category: String,
    pub image_url: Option<String>,
    pub read_time: u32,
}

impl From<ApiArticle> for Article {
    fn from(api: ApiArticle) -> Self {
        let published_at = parse_timestamp(&api.published_at).unwrap_or_else(|| {
            tracing::warn!("⚠️ Unparseable published_at {:?} on article {}", api.published_at, api.id);
            DateTime::<Utc>::default()
        });

        Self {
            id: api.id,
            title: api.title,
            summary: api.summary.unwrap_or_default(),
            content: api.content.unwrap_or_default(),
            url: api.url,
            source: api.source,
            author: api.author,
            published_at,
            sentiment: api.sentiment,
            sentiment_score: api.sentiment_score,
            category: api.category,
            image_url: api.image_url,
            read_time: api.read_time,
        }
    }
}

/// Parses the backend's timestamps: RFC 3339, or a naive ISO-8601 date-time
/// which is taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Aggregate sentiment counts over the whole article store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentStats {
    pub positive: u64,
    pub negative: u64,
    pub neutral: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapingStatus {
    #[serde(default)]
    pub last_scrape: Option<String>,
    #[serde(default)]
    pub articles_scraped: u64,
    #[serde(default)]
    pub sources_active: u64,
    #[serde(default = "default_scraping_state")]
    pub status: String,
    #[serde(default)]
    pub next_scrape: Option<String>,
}

fn default_scraping_state() -> String {
    "idle".to_string()
}

impl ScrapingStatus {
    pub fn last_scrape_at(&self) -> Option<DateTime<Utc>> {
        self.last_scrape.as_deref().and_then(parse_timestamp)
    }

    pub fn next_scrape_at(&self) -> Option<DateTime<Utc>> {
        self.next_scrape.as_deref().and_then(parse_timestamp)
    }
}

/// Acknowledgement returned by `POST /scrape`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeAck {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}
