pub mod api;
pub mod display;
pub mod error;
pub mod logging;
pub mod types;

pub use api::NewsApi;
pub use error::{Error, Result};
pub use types::{
    ApiArticle, Article, ArticleQuery, Facet, Filters, Message, ScrapeAck, ScrapingStatus,
    Sentiment, SentimentFilter, SentimentStats,
};

/// Result shape every API call produces: the payload or a displayable error.
pub type ApiResult<T> = Result<T>;

pub mod prelude {
    pub use crate::{ApiResult, Article, Error, NewsApi, Result};
}
