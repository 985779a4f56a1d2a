//! Error types for the tweet collector.
//!
//! Every failure except a post lacking an embedded original ends the run.
//! That one is not an error at all: it is `Post::Original`.

/// Errors raised while loading configuration or talking to the Twitter API.
#[derive(Debug)]
pub enum CollectorError {
    /// A required secret is absent from the configuration source.
    ConfigurationMissing(String),
    /// The API rejected the OAuth 1.0a credentials (HTTP 401).
    Authentication(String),
    /// The API refused the request under its rate limit policy (HTTP 429).
    /// `reset` is the epoch second from `x-rate-limit-reset`, when sent.
    RateLimited { reset: Option<i64> },
    /// Any other non-success status.
    Api { status: u16, message: String },
    /// Transport failure before a response was received.
    Network(String),
    /// The response body could not be decoded.
    Parse(String),
    /// The request could not be signed.
    Signing(String),
}

impl std::fmt::Display for CollectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigurationMissing(name) => {
                write!(f, "missing required configuration value '{}'", name)
            }
            Self::Authentication(s) => write!(f, "Twitter API authentication failed: {}", s),
            Self::RateLimited { reset: Some(reset) } => {
                write!(f, "Twitter API rate limit exceeded (resets at {})", reset)
            }
            Self::RateLimited { reset: None } => write!(f, "Twitter API rate limit exceeded"),
            Self::Api { status, message } => {
                write!(f, "Twitter API error ({}): {}", status, message)
            }
            Self::Network(s) => write!(f, "unable to send request: {}", s),
            Self::Parse(s) => write!(f, "unable to parse Twitter API response: {}", s),
            Self::Signing(s) => write!(f, "unable to sign request: {}", s),
        }
    }
}

impl std::error::Error for CollectorError {}

impl From<reqwest::Error> for CollectorError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

impl From<serde_json::Error> for CollectorError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
