use async_trait::async_trait;

use crate::types::{ApiArticle, ArticleQuery, Message, ScrapeAck, ScrapingStatus, SentimentStats};
use crate::Result;

/// The news backend as seen from the dashboard.
///
/// Implementations never panic on a failed request: every failure comes back
/// as an [`crate::Error`] whose `Display` is the message shown to the user.
#[async_trait]
pub trait NewsApi: Send + Sync {
    /// Fetch articles matching the query, in the order the server returns them.
    async fn get_articles(&self, query: &ArticleQuery) -> Result<Vec<ApiArticle>>;

    async fn get_sentiment_stats(&self) -> Result<SentimentStats>;

    /// Every source value that can be used as a filter.
    async fn get_sources(&self) -> Result<Vec<String>>;

    /// Every category value that can be used as a filter.
    async fn get_categories(&self) -> Result<Vec<String>>;

    /// Ask the backend to start a scrape in the background.
    async fn trigger_scraping(&self) -> Result<ScrapeAck>;

    async fn get_scraping_status(&self) -> Result<ScrapingStatus>;

    /// Drop every stored article.
    async fn clear_articles(&self) -> Result<Message>;
}
