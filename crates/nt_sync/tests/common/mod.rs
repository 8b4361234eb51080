#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use nt_core::{
    ApiArticle, ArticleQuery, Error, Message, NewsApi, Result, ScrapeAck, ScrapingStatus,
    Sentiment, SentimentStats,
};

/// In-memory [`NewsApi`] that counts calls and can be told to fail or stall.
pub struct ScriptedApi {
    pub article_calls: AtomicUsize,
    pub stats_calls: AtomicUsize,
    pub source_calls: AtomicUsize,
    pub category_calls: AtomicUsize,
    pub scrape_calls: AtomicUsize,
    pub fail_articles: AtomicBool,
    pub fail_stats: AtomicBool,
    pub fail_metadata: AtomicBool,
    pub fail_scrape: AtomicBool,
    pub queries: Mutex<Vec<ArticleQuery>>,
    pub article_delays: Mutex<VecDeque<Duration>>,
    pub stats: Mutex<SentimentStats>,
    pub sources: Mutex<Vec<String>>,
}

impl Default for ScriptedApi {
    fn default() -> Self {
        Self {
            article_calls: AtomicUsize::new(0),
            stats_calls: AtomicUsize::new(0),
            source_calls: AtomicUsize::new(0),
            category_calls: AtomicUsize::new(0),
            scrape_calls: AtomicUsize::new(0),
            fail_articles: AtomicBool::new(false),
            fail_stats: AtomicBool::new(false),
            fail_metadata: AtomicBool::new(false),
            fail_scrape: AtomicBool::new(false),
            queries: Mutex::new(Vec::new()),
            article_delays: Mutex::new(VecDeque::new()),
            stats: Mutex::new(SentimentStats { positive: 3, negative: 1, neutral: 0, total: 4 }),
            sources: Mutex::new(vec!["NDTV".to_string(), "CNN".to_string()]),
        }
    }
}

impl ScriptedApi {
    pub fn articles(&self) -> usize {
        self.article_calls.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> usize {
        self.stats_calls.load(Ordering::SeqCst)
    }

    pub fn metadata(&self) -> usize {
        self.source_calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<ArticleQuery> {
        self.queries.lock().unwrap().last().cloned()
    }

    pub fn delay_next_article_fetch(&self, delay: Duration) {
        self.article_delays.lock().unwrap().push_back(delay);
    }
}

/// One article per response, titled after the search that produced it.
pub fn article_for(query: &ArticleQuery) -> ApiArticle {
    let title = query.search.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| "headline".to_string());
    ApiArticle {
        id: format!("id-{}", title),
        title,
        summary: None,
        content: None,
        url: "https://news.example.com/story".to_string(),
        source: "NDTV".to_string(),
        author: None,
        published_at: "2024-01-01T00:00:00Z".to_string(),
        sentiment: Sentiment::Positive,
        sentiment_score: 0.6,
        category: "General".to_string(),
        image_url: None,
        read_time: 2,
        scraped_at: None,
    }
}

#[async_trait]
impl NewsApi for ScriptedApi {
    async fn get_articles(&self, query: &ArticleQuery) -> Result<Vec<ApiArticle>> {
        self.article_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        let delay = self.article_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_articles.load(Ordering::SeqCst) {
            return Err(Error::Http { status: 500 });
        }
        Ok(vec![article_for(query)])
    }

    async fn get_sentiment_stats(&self) -> Result<SentimentStats> {
        self.stats_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(Error::transport("connection refused"));
        }
        Ok(*self.stats.lock().unwrap())
    }

    async fn get_sources(&self) -> Result<Vec<String>> {
        self.source_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_metadata.load(Ordering::SeqCst) {
            return Err(Error::transport("connection refused"));
        }
        Ok(self.sources.lock().unwrap().clone())
    }

    async fn get_categories(&self) -> Result<Vec<String>> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_metadata.load(Ordering::SeqCst) {
            return Err(Error::transport("connection refused"));
        }
        Ok(vec!["General".to_string(), "Health".to_string()])
    }

    async fn trigger_scraping(&self) -> Result<ScrapeAck> {
        self.scrape_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_scrape.load(Ordering::SeqCst) {
            return Err(Error::Http { status: 503 });
        }
        Ok(ScrapeAck {
            message: "Scraping started in background".to_string(),
            status: Some("triggered".to_string()),
        })
    }

    async fn get_scraping_status(&self) -> Result<ScrapingStatus> {
        Ok(ScrapingStatus {
            last_scrape: None,
            articles_scraped: 0,
            sources_active: 0,
            status: "idle".to_string(),
            next_scrape: None,
        })
    }

    async fn clear_articles(&self) -> Result<Message> {
        Ok(Message { message: "All articles cleared".to_string() })
    }
}

/// Let spawned tasks run; with paused time this also advances the clock.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}
