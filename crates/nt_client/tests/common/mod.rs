#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// What the fake backend saw.
#[derive(Clone, Default)]
pub struct Recorded {
    pub article_queries: Arc<Mutex<Vec<Option<String>>>>,
    pub scrape_calls: Arc<Mutex<usize>>,
    pub clear_calls: Arc<Mutex<usize>>,
}

impl Recorded {
    pub fn article_queries(&self) -> Vec<Option<String>> {
        self.article_queries.lock().unwrap().clone()
    }
}

pub fn sample_article() -> Value {
    json!({
        "id": "65a1",
        "title": "Parliament passes budget",
        "summary": null,
        "content": "The budget passed late on Tuesday.",
        "url": "https://news.example.com/budget",
        "source": "NDTV",
        "author": "Staff",
        "published_at": "2024-01-01T00:00:00Z",
        "sentiment": "neutral",
        "sentiment_score": 0.02,
        "category": "General",
        "image_url": null,
        "read_time": 4,
        "scraped_at": "2024-01-01T00:10:00"
    })
}

async fn list_articles(State(recorded): State<Recorded>, RawQuery(query): RawQuery) -> Json<Value> {
    recorded.article_queries.lock().unwrap().push(query);
    Json(json!([sample_article()]))
}

async fn clear_articles(State(recorded): State<Recorded>) -> Json<Value> {
    *recorded.clear_calls.lock().unwrap() += 1;
    Json(json!({ "message": "All articles cleared" }))
}

async fn trigger_scrape(State(recorded): State<Recorded>) -> Json<Value> {
    *recorded.scrape_calls.lock().unwrap() += 1;
    Json(json!({ "message": "Scraping started in background", "status": "triggered" }))
}

/// Backend that answers every endpoint the way the real service does.
pub fn healthy_backend(recorded: Recorded) -> Router {
    Router::new()
        .route("/api/articles", get(list_articles).delete(clear_articles))
        .route(
            "/api/sentiment-stats",
            get(|| async { Json(json!({ "positive": 3, "negative": 1, "neutral": 0, "total": 4 })) }),
        )
        .route("/api/sources", get(|| async { Json(json!({ "sources": ["NDTV", "CNN"] })) }))
        .route(
            "/api/categories",
            get(|| async { Json(json!({ "categories": ["General", "Health"] })) }),
        )
        .route("/api/scrape", post(trigger_scrape))
        .route(
            "/api/scrape-cnn",
            post(|| async { Json(json!({ "message": "12 CNN articles scraped and saved." })) }),
        )
        .route(
            "/api/scraping-status",
            get(|| async {
                Json(json!({
                    "last_scrape": "2024-01-01T00:00:00",
                    "articles_scraped": 40,
                    "sources_active": 3,
                    "status": "completed",
                    "next_scrape": null
                }))
            }),
        )
        .with_state(recorded)
}

/// Backend whose endpoints fail in each of the ways a request can fail.
pub fn broken_backend() -> Router {
    Router::new()
        .route(
            "/api/articles",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "db down" }))) }),
        )
        .route("/api/sentiment-stats", get(|| async { "definitely not json" }))
        .route("/api/sources", get(|| async { Json(json!({ "wrong_key": [] })) }))
        .route("/api/scrape", post(|| async { StatusCode::SERVICE_UNAVAILABLE }))
}

/// Serve `router` on an ephemeral port and return its `/api` base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

/// A base URL nothing is listening on.
pub async fn dead_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}
