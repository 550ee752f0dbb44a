//! Authenticated HTTP client for the BookStack API.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::header;
use url::form_urlencoded;

use crate::config::UpstreamConfig;

/// Fixed timeout for the upstream call. A request that cannot complete
/// within this window fails as unreachable; there is no retry.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// All endpoints resolve under this path on the BookStack instance.
const API_PREFIX: &str = "/api/";

/// Client for the upstream BookStack API.
///
/// Wraps a single `reqwest::Client` built once at startup; its defaults
/// already follow redirects and verify TLS certificates, matching the
/// outbound contract. Connection reuse across requests is an optimization
/// with no observable effect.
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self { http }
    }

    /// Issue the authenticated GET and buffer the full response.
    ///
    /// Any completed exchange returns `Ok`, including upstream 4xx/5xx;
    /// only transport-level failures (connect, timeout, TLS, truncated
    /// body) surface as `Err`.
    pub async fn fetch(
        &self,
        url: &str,
        credentials: &UpstreamConfig,
    ) -> Result<(StatusCode, Bytes), reqwest::Error> {
        let response = self
            .http
            .get(url)
            .header(
                header::AUTHORIZATION,
                auth_header(&credentials.api_token_id, &credentials.api_token_secret),
            )
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body))
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the BookStack token header value from the two opaque secret halves.
/// The returned value must never reach a log field or a response body.
pub fn auth_header(token_id: &str, token_secret: &str) -> String {
    format!("Token {token_id}:{token_secret}")
}

/// Join the configured base URL, the fixed API prefix, and the endpoint
/// path, then append the re-encoded pass-through query parameters.
///
/// Trailing slashes on the base and leading slashes on the endpoint are
/// trimmed so the join never doubles a separator.
pub fn build_target_url(base: &str, endpoint: &str, passthrough: &[(String, String)]) -> String {
    let mut url = format!(
        "{}{}{}",
        base.trim_end_matches('/'),
        API_PREFIX,
        endpoint.trim_start_matches('/')
    );

    if !passthrough.is_empty() {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(passthrough.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        url.push('?');
        url.push_str(&query);
    }

    url
}
