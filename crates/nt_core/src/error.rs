use thiserror::Error;

const UNKNOWN_ERROR: &str = "Unknown error";

/// Everything that can go wrong between the dashboard and the news API.
///
/// The `Display` output is what the dashboard shows to the user, so the
/// request-level variants print their message without a prefix.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Transport(String),

    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("{0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(non_empty(message.into()))
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(non_empty(message.into()))
    }
}

fn non_empty(message: String) -> String {
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Http { status: status.as_u16() };
        }
        if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
