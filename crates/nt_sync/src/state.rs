use nt_core::{Article, Filters, SentimentStats};

/// Everything a presentation layer needs to draw the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub articles: Vec<Article>,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: Filters,
    pub sentiment_stats: SentimentStats,
    pub sources: Vec<String>,
    pub categories: Vec<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            articles: Vec::new(),
            // The initial load starts as soon as a controller exists.
            loading: true,
            error: None,
            filters: Filters::default(),
            sentiment_stats: SentimentStats::default(),
            sources: Vec::new(),
            categories: Vec::new(),
        }
    }
}

/// Connection indicator derived from the loading and error flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveStatus {
    Error,
    Loading,
    Live,
}

impl LiveStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LiveStatus::Error => "Connection Error",
            LiveStatus::Loading => "Loading...",
            LiveStatus::Live => "Live Updates",
        }
    }
}

impl DashboardState {
    pub fn status(&self) -> LiveStatus {
        if self.error.is_some() {
            LiveStatus::Error
        } else if self.loading {
            LiveStatus::Loading
        } else {
            LiveStatus::Live
        }
    }
}
