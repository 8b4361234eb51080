pub mod config;
pub mod controller;
pub mod state;

pub use config::SyncConfig;
pub use controller::NewsController;
pub use state::{DashboardState, LiveStatus};

pub mod prelude {
    pub use super::{DashboardState, LiveStatus, NewsController, SyncConfig};
    pub use nt_core::{Article, Facet, Filters, Sentiment, SentimentFilter, SentimentStats};
}
