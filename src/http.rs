//! Shared HTTP plumbing for the service clients

use reqwest::{Client, Url};
use std::time::Duration;

use crate::errors::{RagError, Result};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Build a reqwest client with the given request timeout
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RagError::ConfigError(format!("Failed to build HTTP client: {}", e)))
}

/// Parse a service endpoint, failing fast on blank or non-http(s) values.
///
/// `setting` names the configuration key, used in the error.
pub fn parse_endpoint(raw: &str, setting: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RagError::missing(setting));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| RagError::ConfigError(format!("{} is not a valid URL: {}", setting, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RagError::ConfigError(format!(
            "{} must use http or https, got {}",
            setting, other
        ))),
    }
}

/// Append path segments to an endpoint, percent-encoding each one.
///
/// A trailing slash on the endpoint is tolerated; `/` or `?` inside a
/// segment stays part of that segment.
pub fn endpoint_url(endpoint: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = endpoint.clone();
    url.path_segments_mut()
        .map_err(|_| RagError::ConfigError(format!("{} cannot take a path", endpoint)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Require a non-blank setting value
pub fn require(value: &str, setting: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RagError::missing(setting));
    }
    Ok(trimmed.to_string())
}
