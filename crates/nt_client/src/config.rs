use std::env;
use std::time::Duration;

use nt_core::{Error, Result};
use url::Url;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: &str = "8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://{}:{}/api", DEFAULT_HOST, DEFAULT_PORT),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// `NT_API_URL` wins outright; otherwise the URL is assembled from
    /// `NT_API_HOST` and `NT_API_PORT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("NT_API_URL").filter(|u| !u.trim().is_empty()) {
            return Self::new(url);
        }
        let host = lookup("NT_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = lookup("NT_API_PORT").unwrap_or_else(|| DEFAULT_PORT.to_string());
        Self::new(format!("http://{}:{}/api", host, port))
    }

    pub fn with_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The base URL parsed and normalised to have no trailing slash.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let url = Url::parse(trimmed)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidUrl(format!(
                "unsupported scheme {:?} in {}",
                url.scheme(),
                self.base_url
            )));
        }
        Ok(url)
    }
}
