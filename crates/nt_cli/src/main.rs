use std::sync::Arc;

use chrono::Utc;
use clap::Parser;
use nt_client::{ApiClient, ClientConfig};
use nt_core::logging::init_logging;
use nt_core::{Article, ArticleQuery, NewsApi, SentimentFilter};
use nt_sync::SyncConfig;
use tracing::info;

mod duration;
mod render;
mod watch;

use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "News sentiment dashboard client", long_about = None)]
pub struct Cli {
    /// Base URL of the news API, e.g. http://localhost:8000/api. Defaults to NT_API_URL or NT_API_HOST/NT_API_PORT.
    #[arg(long)]
    api_url: Option<String>,
    /// Log filter such as "debug" or "nt_sync=debug,info". Defaults to RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,
    /// Per-request timeout (e.g. 10s, 1m). Defaults to 30s.
    #[arg(long)]
    timeout: Option<HumanDuration>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List articles, optionally filtered
    Articles {
        #[arg(long, default_value_t = 50)]
        limit: u32,
        /// positive, negative, neutral or all
        #[arg(long, default_value = "all")]
        sentiment: SentimentFilter,
        #[arg(long)]
        source: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show sentiment counts and percentages
    Stats,
    /// List sources that can be filtered on
    Sources,
    /// List categories that can be filtered on
    Categories,
    /// Ask the backend to scrape now
    Scrape {
        /// Run only the CNN scrape and wait for it to finish
        #[arg(long)]
        cnn: bool,
    },
    /// Show the backend's scraping status
    Status,
    /// Delete every stored article
    Clear,
    /// Live dashboard driven from stdin
    Watch {
        /// How often to refresh in the background (e.g. 30s, 5m, 1h)
        #[arg(long, default_value = "5m")]
        poll_interval: HumanDuration,
        /// Most articles to request per refresh
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_url(url);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout.0);
    }
    let client = ApiClient::new(config)?;
    info!("🌐 Using news API at {}", client.base_url());

    match cli.command {
        Commands::Articles { limit, sentiment, source, category, search } => {
            let query = ArticleQuery {
                limit: Some(limit),
                sentiment: sentiment.as_param().map(str::to_string),
                source,
                category,
                search,
            };
            let articles = client.get_articles(&query).await?;
            if articles.is_empty() {
                println!("No articles found matching your criteria.");
            }
            let now = Utc::now();
            for article in articles.into_iter().map(Article::from) {
                println!("{}\n", render::article(&article, now));
            }
        }
        Commands::Stats => {
            let stats = client.get_sentiment_stats().await?;
            println!("{}", render::stats(&stats));
        }
        Commands::Sources => {
            for source in client.get_sources().await? {
                println!("{}", source);
            }
        }
        Commands::Categories => {
            for category in client.get_categories().await? {
                println!("{}", category);
            }
        }
        Commands::Scrape { cnn: true } => {
            let done = client.scrape_cnn().await?;
            println!("🦗 {}", done.message);
        }
        Commands::Scrape { cnn: false } => {
            let ack = client.trigger_scraping().await?;
            println!("🦗 {}", ack.message);
        }
        Commands::Status => {
            let status = client.get_scraping_status().await?;
            println!("{}", render::scraping_status(&status));
        }
        Commands::Clear => {
            let cleared = client.clear_articles().await?;
            println!("🧹 {}", cleared.message);
        }
        Commands::Watch { poll_interval, limit } => {
            let api: Arc<dyn NewsApi> = Arc::new(client);
            let config = SyncConfig::default()
                .with_poll_interval(poll_interval.0)
                .with_article_limit(Some(limit));
            watch::run(api, config).await?;
        }
    }

    Ok(())
}
