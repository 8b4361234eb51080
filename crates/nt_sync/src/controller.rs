use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nt_core::{
    ApiResult, Article, ArticleQuery, Facet, Filters, NewsApi, ScrapeAck, SentimentFilter,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::state::DashboardState;

/// State and collaborators shared between the controller and its timer tasks.
struct Shared {
    api: Arc<dyn NewsApi>,
    state: watch::Sender<DashboardState>,
    config: SyncConfig,
    article_seq: AtomicU64,
}

impl Shared {
    async fn fetch_articles(&self) {
        let seq = self.article_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let filters = self.state.borrow().filters.clone();
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let query = ArticleQuery::from_filters(&filters, self.config.article_limit);
        let result = self.api.get_articles(&query).await;

        self.state.send_if_modified(|state| {
            // A later fetch has started; its result is the one that counts.
            if self.article_seq.load(Ordering::SeqCst) != seq {
                debug!("⏭️ Dropping superseded article response #{}", seq);
                return false;
            }
            match result {
                Ok(raw) => {
                    debug!("📰 Received {} articles", raw.len());
                    state.articles = raw.into_iter().map(Article::from).collect();
                }
                Err(e) => {
                    warn!("⚠️ Failed to fetch articles: {}", e);
                    state.error = Some(e.to_string());
                    state.articles.clear();
                }
            }
            state.loading = false;
            true
        });
    }

    async fn fetch_stats(&self) {
        match self.api.get_sentiment_stats().await {
            Ok(stats) => {
                self.state.send_if_modified(|state| {
                    let changed = state.sentiment_stats != stats;
                    state.sentiment_stats = stats;
                    changed
                });
            }
            Err(e) => warn!("⚠️ Failed to fetch sentiment stats: {}", e),
        }
    }

    async fn fetch_metadata(&self) {
        let (sources, categories) =
            tokio::join!(self.api.get_sources(), self.api.get_categories());

        match sources {
            Ok(sources) => {
                self.state.send_if_modified(|state| {
                    let changed = state.sources != sources;
                    state.sources = sources;
                    changed
                });
            }
            Err(e) => warn!("⚠️ Failed to fetch sources: {}", e),
        }
        match categories {
            Ok(categories) => {
                self.state.send_if_modified(|state| {
                    let changed = state.categories != categories;
                    state.categories = categories;
                    changed
                });
            }
            Err(e) => warn!("⚠️ Failed to fetch categories: {}", e),
        }
    }

    /// Articles and stats; what filter changes and the poll timer refresh.
    async fn refresh_filtered(&self) {
        tokio::join!(self.fetch_articles(), self.fetch_stats());
    }

    /// Articles, stats and facet lists. Each applies its own result.
    async fn refresh_all(&self) {
        tokio::join!(self.fetch_articles(), self.fetch_stats(), self.fetch_metadata());
    }
}

/// Keeps dashboard state in sync with the news API.
///
/// Creating a controller starts the initial load, so it must happen inside a
/// tokio runtime. Filter setters re-fetch after a quiet period, a background
/// timer refreshes periodically, and dropping the controller cancels every
/// timer it owns. Requests already on the wire are left to finish.
pub struct NewsController {
    shared: Arc<Shared>,
    debounce: Option<JoinHandle<()>>,
    poll: Option<JoinHandle<()>>,
    scheduled_refreshes: Vec<JoinHandle<()>>,
}

impl NewsController {
    pub fn new(api: Arc<dyn NewsApi>) -> Self {
        Self::with_config(api, SyncConfig::default())
    }

    pub fn with_config(api: Arc<dyn NewsApi>, config: SyncConfig) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        let shared = Arc::new(Shared {
            api,
            state,
            config,
            article_seq: AtomicU64::new(0),
        });

        let initial = shared.clone();
        tokio::spawn(async move {
            info!("🚀 Loading articles, stats and facets");
            initial.refresh_all().await;
        });

        let mut controller = Self {
            shared,
            debounce: None,
            poll: None,
            scheduled_refreshes: Vec::new(),
        };
        controller.arm_poll();
        controller
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> DashboardState {
        self.shared.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.shared.state.subscribe()
    }

    pub fn filters(&self) -> Filters {
        self.shared.state.borrow().filters.clone()
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        self.update_filters(|filters| filters.search = search);
    }

    pub fn set_sentiment_filter(&mut self, sentiment: impl Into<SentimentFilter>) {
        let sentiment = sentiment.into();
        self.update_filters(|filters| filters.sentiment = sentiment);
    }

    pub fn set_source_filter(&mut self, source: impl Into<Facet>) {
        let source = source.into();
        self.update_filters(|filters| filters.source = source);
    }

    pub fn set_category_filter(&mut self, category: impl Into<Facet>) {
        let category = category.into();
        self.update_filters(|filters| filters.category = category);
    }

    /// Re-fetch articles, stats and facet lists, returning once all three
    /// have been applied.
    pub async fn refresh(&self) {
        info!("🔄 Manual refresh");
        self.shared.refresh_all().await;
    }

    /// Ask the backend to scrape. When it accepts, a full refresh is
    /// scheduled after `scrape_refresh_delay`; the returned result is only the
    /// backend's immediate answer.
    pub async fn trigger_scraping(&mut self) -> ApiResult<ScrapeAck> {
        let result = self.shared.api.trigger_scraping().await;
        match &result {
            Ok(ack) => {
                info!("🦗 Scrape accepted: {}", ack.message);
                self.schedule_refresh();
            }
            Err(e) => warn!("⚠️ Scrape trigger failed: {}", e),
        }
        result
    }

    /// Cancel every pending timer. Also runs on drop.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
        if let Some(handle) = self.poll.take() {
            handle.abort();
        }
        for handle in self.scheduled_refreshes.drain(..) {
            handle.abort();
        }
    }

    fn update_filters(&mut self, apply: impl FnOnce(&mut Filters)) {
        let changed = self.shared.state.send_if_modified(|state| {
            let before = state.filters.clone();
            apply(&mut state.filters);
            state.filters != before
        });
        if changed {
            debug!("🔎 Filters changed: {:?}", self.filters());
            self.arm_debounce();
            self.arm_poll();
        }
    }

    fn arm_debounce(&mut self) {
        if let Some(handle) = self.debounce.take() {
            handle.abort();
        }
        let shared = self.shared.clone();
        let quiet = shared.config.debounce;
        self.debounce = Some(tokio::spawn(async move {
            time::sleep(quiet).await;
            // Detached so a later re-arm never cancels a request in flight.
            tokio::spawn(async move { shared.refresh_filtered().await });
        }));
    }

    fn arm_poll(&mut self) {
        if let Some(handle) = self.poll.take() {
            handle.abort();
        }
        let shared = self.shared.clone();
        let period = shared.config.poll_interval;
        if period.is_zero() {
            warn!("⚠️ Poll interval is zero, periodic refresh disabled");
            return;
        }
        self.poll = Some(tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!("⏰ Periodic refresh");
                let shared = shared.clone();
                tokio::spawn(async move { shared.refresh_filtered().await });
            }
        }));
    }

    fn schedule_refresh(&mut self) {
        self.scheduled_refreshes.retain(|handle| !handle.is_finished());
        let shared = self.shared.clone();
        let delay = shared.config.scrape_refresh_delay;
        self.scheduled_refreshes.push(tokio::spawn(async move {
            time::sleep(delay).await;
            info!("🔄 Refreshing after scrape");
            shared.refresh_all().await;
        }));
    }
}

impl Drop for NewsController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
