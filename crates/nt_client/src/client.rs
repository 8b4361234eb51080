use std::fmt;

use async_trait::async_trait;
use nt_core::{
    ApiArticle, ArticleQuery, Error, Message, NewsApi, Result, ScrapeAck, ScrapingStatus,
    SentimentStats,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};
use url::Url;

use crate::config::ClientConfig;

#[derive(Deserialize)]
struct SourcesResponse {
    sources: Vec<String>,
}

#[derive(Deserialize)]
struct CategoriesResponse {
    categories: Vec<String>,
}

/// HTTP implementation of [`NewsApi`].
///
/// Holds no state besides the connection pool, so one instance can be shared
/// behind an `Arc` by every consumer.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config.parsed_base_url()?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Full URL for `path` (which starts with `/`) under the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url.as_str(), path))?)
    }

    /// URL for `GET /articles` with empty parameters left out.
    pub fn articles_url(&self, query: &ArticleQuery) -> Result<Url> {
        let mut url = self.endpoint("/articles")?;
        let pairs = query.to_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, method: Method, url: Result<Url>) -> Result<T> {
        let result = match url {
            Ok(url) => {
                debug!("🌐 {} {}", method, url);
                self.execute(self.client.request(method, url)).await
            }
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            error!("API Error: {}", e);
        }
        result
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http { status: status.as_u16() });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Run the backend's dedicated CNN scrape synchronously and return its
    /// summary message.
    pub async fn scrape_cnn(&self) -> Result<Message> {
        self.fetch(Method::POST, self.endpoint("/scrape-cnn")).await
    }
}

#[async_trait]
impl NewsApi for ApiClient {
    async fn get_articles(&self, query: &ArticleQuery) -> Result<Vec<ApiArticle>> {
        self.fetch(Method::GET, self.articles_url(query)).await
    }

    async fn get_sentiment_stats(&self) -> Result<SentimentStats> {
        self.fetch(Method::GET, self.endpoint("/sentiment-stats")).await
    }

    async fn get_sources(&self) -> Result<Vec<String>> {
        self.fetch::<SourcesResponse>(Method::GET, self.endpoint("/sources"))
            .await
            .map(|r| r.sources)
    }

    async fn get_categories(&self) -> Result<Vec<String>> {
        self.fetch::<CategoriesResponse>(Method::GET, self.endpoint("/categories"))
            .await
            .map(|r| r.categories)
    }

    async fn trigger_scraping(&self) -> Result<ScrapeAck> {
        self.fetch(Method::POST, self.endpoint("/scrape")).await
    }

    async fn get_scraping_status(&self) -> Result<ScrapingStatus> {
        self.fetch(Method::GET, self.endpoint("/scraping-status")).await
    }

    async fn clear_articles(&self) -> Result<Message> {
        self.fetch(Method::DELETE, self.endpoint("/articles")).await
    }
}
