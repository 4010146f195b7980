// ABOUTME: Shared HTTP plumbing for analysis and image transfer requests
// ABOUTME: Client construction, JPEG multipart forms, endpoint joining and URL resolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ClientConfig;
use crate::constants::{analysis, service_names};
use crate::errors::{FoodError, FoodResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use url::Url;

/// Build the HTTP client shared by every component
///
/// The timeout comes from configuration; there is no other deadline logic.
///
/// # Errors
///
/// Returns `FoodError::Config` if the auth token is not a valid header value
/// or the TLS backend cannot be initialized
pub fn build_http_client(config: &ClientConfig) -> FoodResult<reqwest::Client> {
    let mut headers = HeaderMap::new();
    if let Some(token) = &config.auth_token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| FoodError::config(format!("invalid auth token: {e}")))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    let mut builder = reqwest::Client::builder()
        .user_agent(format!(
            "{}/{}",
            service_names::COREVIA_FOOD,
            env!("CARGO_PKG_VERSION")
        ))
        .default_headers(headers);
    if let Some(timeout) = config.http_timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|e| FoodError::config(format!("failed to build HTTP client: {e}")))
}

/// Multipart form with the JPEG bytes in the `file` field
///
/// # Errors
///
/// Returns an error if the JPEG mime type is rejected by the multipart encoder
pub fn jpeg_form(bytes: Vec<u8>, file_name: impl Into<String>) -> FoodResult<Form> {
    let part = Part::bytes(bytes)
        .file_name(file_name.into())
        .mime_str(analysis::JPEG_MIME_TYPE)?;
    Ok(Form::new().part(analysis::UPLOAD_FIELD_NAME, part))
}

/// Join a configured base URL and an API path
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    match (base_url.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{base_url}{}", &path[1..]),
        (false, false) => format!("{base_url}/{path}"),
        _ => format!("{base_url}{path}"),
    }
}

/// Resolve an image URL that may be absolute or relative to the backend
///
/// Absolute `http`/`https` URLs pass through; anything else is treated as a
/// path on the backend host.
///
/// # Errors
///
/// Returns `FoodError::InvalidInput` if the result is not a valid URL
pub fn resolve_url(base_url: &str, url: &str) -> FoodResult<Url> {
    let url = url.trim();
    if url.is_empty() {
        return Err(FoodError::invalid_input("image URL is empty"));
    }

    if let Ok(absolute) = Url::parse(url) {
        if matches!(absolute.scheme(), "http" | "https") {
            return Ok(absolute);
        }
    }

    let joined = endpoint(base_url, url);
    Url::parse(&joined).map_err(|e| FoodError::invalid_input(format!("invalid image URL '{joined}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_normalizes_slashes() {
        assert_eq!(endpoint("http://host", "/api"), "http://host/api");
        assert_eq!(endpoint("http://host/", "/api"), "http://host/api");
        assert_eq!(endpoint("http://host", "api"), "http://host/api");
        assert_eq!(endpoint("http://host/", "api"), "http://host/api");
    }

    #[test]
    fn test_resolve_absolute_url_passes_through() {
        let url = resolve_url("http://backend:8000", "https://cdn.example.com/a.jpg").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn test_resolve_relative_url_uses_base() {
        let url = resolve_url("http://backend:8000", "/uploads/food/1.jpg").unwrap();
        assert_eq!(url.as_str(), "http://backend:8000/uploads/food/1.jpg");

        let url = resolve_url("http://backend:8000", "uploads/food/1.jpg").unwrap();
        assert_eq!(url.as_str(), "http://backend:8000/uploads/food/1.jpg");
    }

    #[test]
    fn test_resolve_rejects_empty_and_garbage() {
        assert!(resolve_url("http://backend", "  ").is_err());
        assert!(resolve_url("not a base", "/x.jpg").is_err());
    }

    #[test]
    fn test_build_client_rejects_bad_token() {
        let config = ClientConfig::new("http://localhost").with_auth_token("bad\ntoken");
        assert!(matches!(build_http_client(&config), Err(FoodError::Config { .. })));
    }
}
