use std::sync::Arc;

use chrono::Utc;
use nt_core::{Facet, NewsApi, SentimentFilter};
use nt_sync::{NewsController, SyncConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::render;

pub const HELP: &str = "commands: search <text> | sentiment <positive|negative|neutral|all> | \
source <name|all> | category <name|all> | refresh | scrape | help | quit";

/// A line typed into the interactive dashboard.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchCommand {
    Search(String),
    Sentiment(SentimentFilter),
    Source(Facet),
    Category(Facet),
    Refresh,
    Scrape,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> std::result::Result<WatchCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "search" => Ok(WatchCommand::Search(rest.to_string())),
        "sentiment" => rest
            .parse()
            .map(WatchCommand::Sentiment)
            .map_err(|e| e.to_string()),
        "source" if !rest.is_empty() => Ok(WatchCommand::Source(Facet::from(rest))),
        "category" if !rest.is_empty() => Ok(WatchCommand::Category(Facet::from(rest))),
        "refresh" | "r" => Ok(WatchCommand::Refresh),
        "scrape" => Ok(WatchCommand::Scrape),
        "help" | "?" => Ok(WatchCommand::Help),
        "quit" | "exit" | "q" => Ok(WatchCommand::Quit),
        "source" | "category" => Err(format!("{} needs a value (or 'all')", verb)),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command: {}", other)),
    }
}

/// Run the controller and redraw on every change until stdin closes or the
/// user quits.
pub async fn run(api: Arc<dyn NewsApi>, config: SyncConfig) -> anyhow::Result<()> {
    let mut controller = NewsController::with_config(api, config);
    let mut updates = controller.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);
    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                println!("\n{}", render::dashboard(&state, Utc::now()));
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line) {
                    Ok(WatchCommand::Quit) => break,
                    Ok(command) => apply(&mut controller, command).await,
                    Err(e) => eprintln!("{}", e),
                }
            }
        }
    }

    info!("👋 Stopping dashboard");
    controller.shutdown();
    Ok(())
}

async fn apply(controller: &mut NewsController, command: WatchCommand) {
    match command {
        WatchCommand::Search(search) => controller.set_search(search),
        WatchCommand::Sentiment(sentiment) => controller.set_sentiment_filter(sentiment),
        WatchCommand::Source(source) => controller.set_source_filter(source),
        WatchCommand::Category(category) => controller.set_category_filter(category),
        WatchCommand::Refresh => controller.refresh().await,
        WatchCommand::Scrape => match controller.trigger_scraping().await {
            Ok(ack) => println!("{}", ack.message),
            Err(e) => eprintln!("Scrape failed: {}", e),
        },
        WatchCommand::Help => println!("{}", HELP),
        WatchCommand::Quit => {}
    }
}
