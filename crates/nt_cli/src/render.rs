use chrono::{DateTime, Utc};
use nt_core::display::{format_relative, format_score, stat_cards};
use nt_core::{Article, ScrapingStatus, SentimentStats};
use nt_sync::DashboardState;

pub fn article(article: &Article, now: DateTime<Utc>) -> String {
    let mut meta = vec![
        article.source.clone(),
        article.category.clone(),
        format_relative(article.published_at, now),
        format!("{} min read", article.read_time),
    ];
    if let Some(author) = &article.author {
        meta.push(format!("by {}", author));
    }

    let mut out = format!(
        "[{} {}] {}\n    {}",
        article.sentiment.label(),
        format_score(article.sentiment_score),
        article.title,
        meta.join(" • ")
    );
    if !article.summary.is_empty() {
        out.push_str(&format!("\n    {}", article.summary));
    }
    out.push_str(&format!("\n    {}", article.url));
    out
}

pub fn stats(stats: &SentimentStats) -> String {
    stat_cards(stats)
        .iter()
        .map(|card| format!("{} {} ({}%)", card.label, card.value, card.percentage))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn scraping_status(status: &ScrapingStatus) -> String {
    let when = |at: Option<DateTime<Utc>>| {
        at.map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "never".to_string())
    };
    format!(
        "status: {}\narticles scraped: {}\nsources active: {}\nlast scrape: {}\nnext scrape: {}",
        status.status,
        status.articles_scraped,
        status.sources_active,
        when(status.last_scrape_at()),
        when(status.next_scrape_at()),
    )
}

pub fn dashboard(state: &DashboardState, now: DateTime<Utc>) -> String {
    let filters = &state.filters;
    let mut lines = vec![
        format!(
            "● {}  search={:?} sentiment={} source={} category={}",
            state.status().label(),
            filters.search,
            filters.sentiment,
            filters.source,
            filters.category
        ),
        format!("sources: {}", state.sources.join(", ")),
        format!("categories: {}", state.categories.join(", ")),
    ];

    if let Some(error) = &state.error {
        lines.push(format!("Error Loading Data: {}", error));
    }

    if state.loading {
        lines.push("Loading...".to_string());
        return lines.join("\n");
    }

    lines.push(stats(&state.sentiment_stats));
    if state.articles.is_empty() {
        lines.push(if state.error.is_some() {
            "Failed to load articles.".to_string()
        } else {
            "No articles found matching your criteria.".to_string()
        });
    } else {
        lines.extend(state.articles.iter().map(|a| article(a, now)));
    }
    lines.join("\n")
}
