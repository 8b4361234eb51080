pub mod client;
pub mod config;

pub use client::ApiClient;
pub use config::ClientConfig;

pub mod prelude {
    pub use super::{ApiClient, ClientConfig};
    pub use nt_core::{ApiResult, Error, NewsApi, Result};
}
