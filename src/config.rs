//! Configuration module for the tweet collector.
//!
//! This module contains the credential structure and environment variable handling
//! for the Twitter/X v1.1 API integration.

use log::{debug, error, info};
use std::env;

use crate::error::CollectorError;

/// Default base URL for the Twitter/X v1.1 REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/1.1";

/// Configuration struct for Twitter/X API credentials.
///
/// Holds the four OAuth 1.0a secrets used to sign every request. The values are
/// loaded once at startup and never change for the lifetime of the process.
#[derive(Clone)]
pub struct TwitterConfig {
    /// The consumer (API) key
    pub api_key: String,
    /// The consumer (API) key secret
    pub api_key_secret: String,
    /// The user access token
    pub access_token: String,
    /// The user access token secret
    pub access_token_secret: String,
}

impl std::fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("api_key", &mask_secret(&self.api_key))
            .field("api_key_secret", &"[REDACTED]")
            .field("access_token", &mask_secret(&self.access_token))
            .field("access_token_secret", &"[REDACTED]")
            .finish()
    }
}

impl TwitterConfig {
    /// Creates a new `TwitterConfig` by loading credentials from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `api_key`: Consumer key from the Twitter Developer Portal
    /// - `api_key_secret`: Consumer key secret
    /// - `access_token`: Access token for the acting user
    /// - `access_token_secret`: Access token secret for the acting user
    ///
    /// # Returns
    ///
    /// - `Ok(TwitterConfig)`: If all four variables are present and non-empty
    /// - `Err(CollectorError::ConfigurationMissing)`: Naming the first missing variable
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use tweet_collector::TwitterConfig;
    ///
    /// let config = TwitterConfig::from_env().expect("credentials are set");
    /// ```
    pub fn from_env() -> Result<Self, CollectorError> {
        info!("Loading Twitter configuration from environment variables");
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary key-value source.
    ///
    /// `lookup` returns `None` for absent keys. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CollectorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load = |name: &str| -> Result<String, CollectorError> {
            match lookup(name) {
                Some(value) if !value.is_empty() => {
                    info!("Found {} with length: {}", name, value.len());
                    debug!("{} (masked): {}", name, mask_secret(&value));
                    Ok(value)
                }
                _ => {
                    error!("Failed to load {} from configuration", name);
                    error!("Make sure the {} environment variable is set", name);
                    Err(CollectorError::ConfigurationMissing(name.to_string()))
                }
            }
        };

        Ok(Self {
            api_key: load("api_key")?,
            api_key_secret: load("api_key_secret")?,
            access_token: load("access_token")?,
            access_token_secret: load("access_token_secret")?,
        })
    }
}

/// Masks a secret for logging, keeping only a short prefix.
fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(4).collect();
    format!("{}... ({} chars)", prefix, secret.chars().count())
}

/// Gets the Twitter API base URL from the environment or returns the default.
///
/// Reads `TWITTER_API_BASE_URL`. A trailing `/` is stripped so paths can be
/// appended directly.
///
/// # Returns
///
/// The configured base URL, or `https://api.twitter.com/1.1` if unset or empty.
pub fn get_api_base_url() -> String {
    base_url_or_default(env::var("TWITTER_API_BASE_URL").ok())
}

fn base_url_or_default(value: Option<String>) -> String {
    match value {
        Some(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        _ => DEFAULT_API_BASE_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn full_source() -> HashMap<&'static str, String> {
        HashMap::from([
            ("api_key", "consumer-key-123".to_string()),
            ("api_key_secret", "consumer-secret-456".to_string()),
            ("access_token", "token-789".to_string()),
            ("access_token_secret", "token-secret-000".to_string()),
        ])
    }

    #[test]
    fn test_from_lookup_loads_all_secrets() {
        let source = full_source();
        let config = TwitterConfig::from_lookup(|k| source.get(k).cloned()).unwrap();
        assert_eq!(config.api_key, "consumer-key-123");
        assert_eq!(config.api_key_secret, "consumer-secret-456");
        assert_eq!(config.access_token, "token-789");
        assert_eq!(config.access_token_secret, "token-secret-000");
    }

    #[test]
    fn test_from_lookup_fails_on_missing_secret() {
        let mut source = full_source();
        source.remove("access_token");
        let err = TwitterConfig::from_lookup(|k| source.get(k).cloned()).unwrap_err();
        match err {
            CollectorError::ConfigurationMissing(name) => assert_eq!(name, "access_token"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_from_lookup_treats_empty_as_missing() {
        let mut source = full_source();
        source.insert("api_key_secret", String::new());
        let err = TwitterConfig::from_lookup(|k| source.get(k).cloned()).unwrap_err();
        match err {
            CollectorError::ConfigurationMissing(name) => assert_eq!(name, "api_key_secret"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let source = full_source();
        let config = TwitterConfig::from_lookup(|k| source.get(k).cloned()).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("consumer-secret-456"));
        assert!(!debug.contains("token-secret-000"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_base_url_default_and_override() {
        assert_eq!(base_url_or_default(None), DEFAULT_API_BASE_URL);
        assert_eq!(base_url_or_default(Some("  ".into())), DEFAULT_API_BASE_URL);
        assert_eq!(
            base_url_or_default(Some("http://localhost:8080/1.1/".into())),
            "http://localhost:8080/1.1"
        );
    }
}
