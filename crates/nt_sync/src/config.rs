use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_SCRAPE_REFRESH_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_ARTICLE_LIMIT: u32 = 50;

/// Timings and request sizing for [`crate::NewsController`].
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Quiet period after the last filter change before re-fetching.
    pub debounce: Duration,
    /// Period of the background refresh of articles and stats. Zero turns
    /// the background refresh off.
    pub poll_interval: Duration,
    /// How long after an accepted scrape the full refresh runs.
    pub scrape_refresh_delay: Duration,
    pub article_limit: Option<u32>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            scrape_refresh_delay: DEFAULT_SCRAPE_REFRESH_DELAY,
            article_limit: Some(DEFAULT_ARTICLE_LIMIT),
        }
    }
}

impl SyncConfig {
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_article_limit(mut self, limit: Option<u32>) -> Self {
        self.article_limit = limit;
        self
    }
}
