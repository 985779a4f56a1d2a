//! OAuth authentication module for Twitter/X API integration.
//!
//! This module implements OAuth 1.0a request signing (HMAC-SHA1) as required by the
//! v1.1 REST endpoints. Every request carries its own signature computed from the
//! four credentials in `TwitterConfig`, the HTTP method, the base URL, and all
//! request parameters.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::{distributions::Alphanumeric, Rng};
use sha1::Sha1;

use crate::config::TwitterConfig;
use crate::error::CollectorError;

type HmacSha1 = Hmac<Sha1>;

const NONCE_LENGTH: usize = 32;

/// Percent-encodes a value per RFC 3986, as OAuth 1.0a requires.
///
/// Only `A-Z a-z 0-9 - . _ ~` pass through unchanged.
pub(crate) fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Builds the OAuth 1.0a `Authorization` header for a request.
///
/// A fresh nonce and the current timestamp are generated on each call.
///
/// # Parameters
///
/// - `config`: The four OAuth 1.0a credentials
/// - `method`: HTTP method, e.g. `GET`
/// - `base_url`: Request URL without query string
/// - `params`: Decoded query (or form) parameters sent with the request
///
/// # Returns
///
/// A header value of the form `OAuth oauth_consumer_key="...", ...`.
pub fn build_oauth1_header(
    config: &TwitterConfig,
    method: &str,
    base_url: &str,
    params: &[(String, String)],
) -> Result<String, CollectorError> {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect();
    let timestamp = chrono::Utc::now().timestamp().to_string();
    build_oauth1_header_with(config, method, base_url, params, &nonce, &timestamp)
}

/// Same as [`build_oauth1_header`] with an explicit nonce and timestamp.
pub(crate) fn build_oauth1_header_with(
    config: &TwitterConfig,
    method: &str,
    base_url: &str,
    params: &[(String, String)],
    nonce: &str,
    timestamp: &str,
) -> Result<String, CollectorError> {
    let mut oauth_params = vec![
        ("oauth_consumer_key".to_string(), config.api_key.clone()),
        ("oauth_nonce".to_string(), nonce.to_string()),
        ("oauth_signature_method".to_string(), "HMAC-SHA1".to_string()),
        ("oauth_timestamp".to_string(), timestamp.to_string()),
        ("oauth_token".to_string(), config.access_token.clone()),
        ("oauth_version".to_string(), "1.0".to_string()),
    ];

    let base_string = signature_base_string(method, base_url, params, &oauth_params);
    let signing_key = format!(
        "{}&{}",
        percent_encode(&config.api_key_secret),
        percent_encode(&config.access_token_secret)
    );

    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
        .map_err(|e| CollectorError::Signing(e.to_string()))?;
    mac.update(base_string.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    oauth_params.push(("oauth_signature".to_string(), signature));
    oauth_params.sort();

    let fields: Vec<String> = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect();

    Ok(format!("OAuth {}", fields.join(", ")))
}

/// Builds the signature base string: `METHOD&url&params`, each part encoded,
/// with the parameters encoded and sorted by key then value.
fn signature_base_string(
    method: &str,
    base_url: &str,
    params: &[(String, String)],
    oauth_params: &[(String, String)],
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .chain(oauth_params.iter())
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&parameter_string)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // Worked example from the Twitter developer documentation on
    // "Creating a signature".
    fn docs_config() -> TwitterConfig {
        TwitterConfig {
            api_key: "xvz1evFS4wEEPTGEFPHBog".to_string(),
            api_key_secret: "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw".to_string(),
            access_token: "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb".to_string(),
            access_token_secret: "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE".to_string(),
        }
    }

    fn docs_params() -> Vec<(String, String)> {
        vec![
            (
                "status".to_string(),
                "Hello Ladies + Gentlemen, a signed OAuth request!".to_string(),
            ),
            ("include_entities".to_string(), "true".to_string()),
        ]
    }

    #[test]
    fn test_percent_encode_reserved_characters() {
        assert_eq!(
            percent_encode("Ladies + Gentlemen"),
            "Ladies%20%2B%20Gentlemen"
        );
        assert_eq!(percent_encode("An encoded string!"), "An%20encoded%20string%21");
        assert_eq!(percent_encode("Dogs, Cats & Mice"), "Dogs%2C%20Cats%20%26%20Mice");
        assert_eq!(percent_encode("a-b.c_d~e"), "a-b.c_d~e");
    }

    #[test]
    fn test_signature_matches_documented_example() {
        let header = build_oauth1_header_with(
            &docs_config(),
            "POST",
            "https://api.twitter.com/1.1/statuses/update.json",
            &docs_params(),
            "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg",
            "1318622958",
        )
        .unwrap();

        assert!(header.starts_with("OAuth "));
        assert!(header.contains("oauth_signature=\"hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D\""));
        assert!(header.contains("oauth_consumer_key=\"xvz1evFS4wEEPTGEFPHBog\""));
        assert!(header.contains("oauth_signature_method=\"HMAC-SHA1\""));
        assert!(header.contains("oauth_version=\"1.0\""));
    }

    #[test]
    fn test_base_string_sorts_and_encodes_parameters() {
        let oauth = vec![("oauth_nonce".to_string(), "abc".to_string())];
        let base = signature_base_string(
            "get",
            "https://api.twitter.com/1.1/search/tweets.json",
            &[
                ("q".to_string(), "bitcoin since:2020-01-01".to_string()),
                ("lang".to_string(), "en".to_string()),
            ],
            &oauth,
        );
        assert_eq!(
            base,
            "GET&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fsearch%2Ftweets.json&\
             lang%3Den%26oauth_nonce%3Dabc%26q%3Dbitcoin%2520since%253A2020-01-01"
        );
    }

    #[test]
    fn test_header_nonce_differs_between_calls() {
        let config = docs_config();
        let url = "https://api.twitter.com/1.1/search/tweets.json";
        let a = build_oauth1_header(&config, "GET", url, &[]).unwrap();
        let b = build_oauth1_header(&config, "GET", url, &[]).unwrap();
        assert_ne!(a, b);
    }
}
