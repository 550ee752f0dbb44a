//! CORS negotiation for browser callers.
//!
//! Allowing is advisory: a disallowed origin gets no CORS headers at all and
//! the browser blocks the response client-side. The relay never rejects a
//! request on origin grounds.

use axum::http::header::{self, HeaderMap, HeaderValue};

/// Allow-list entry matching any origin.
pub const WILDCARD_ORIGIN: &str = "*";

/// Outcome of matching a request `Origin` against the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsDecision {
    /// Emit CORS headers with this `Access-Control-Allow-Origin` value.
    Allowed(String),
    /// Emit no CORS headers.
    Denied,
}

/// Match the request's `Origin` header against the configured allow-list.
///
/// Permitted when the list contains the wildcard or the exact origin string.
/// The allowed value echoes the caller's origin, falling back to `*` when
/// the request carried no `Origin` header.
pub fn resolve_origin(allowed: &[String], origin: Option<&str>) -> CorsDecision {
    let origin = origin.unwrap_or("");
    let permitted = allowed
        .iter()
        .any(|entry| entry == WILDCARD_ORIGIN || entry == origin);

    if !permitted {
        return CorsDecision::Denied;
    }

    let value = if origin.is_empty() {
        WILDCARD_ORIGIN.to_string()
    } else {
        origin.to_string()
    };
    CorsDecision::Allowed(value)
}

/// Attach the three fixed CORS headers when the origin was permitted.
pub fn apply_cors_headers(headers: &mut HeaderMap, decision: &CorsDecision) {
    let CorsDecision::Allowed(origin) = decision else {
        return;
    };

    // An origin that is not a valid header value cannot have matched a
    // configured entry or the wildcard fallback, but don't panic on it.
    let Ok(value) = HeaderValue::from_str(origin) else {
        return;
    };

    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
}
