//! HTTP server setup and the relay handler.
//!
//! # Responsibilities
//! - Create Axum Router with the relay handler
//! - Wire up middleware (tracing, request timeout)
//! - Bind server to listener
//! - Run the validation gates over each inbound request
//! - Forward validated requests to the BookStack API
//! - Relay upstream responses verbatim

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use url::form_urlencoded;
use uuid::Uuid;

use crate::config::{validate_credentials, ConfigState, RelayConfig};
use crate::http::cors::{apply_cors_headers, resolve_origin, CorsDecision};
use crate::http::response::RelayError;
use crate::upstream::{build_target_url, UpstreamClient};

/// Bound on the whole inbound exchange. Must exceed the upstream call
/// timeout so a slow BookStack surfaces as 502, not a layer timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Query parameter naming the BookStack API path to call.
const ENDPOINT_PARAM: &str = "endpoint";

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConfigState>,
    pub upstream: Arc<UpstreamClient>,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given configuration state.
    pub fn new(config: ConfigState) -> Self {
        let state = AppState {
            config: Arc::new(config),
            upstream: Arc::new(UpstreamClient::new()),
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main relay handler.
///
/// Runs the gates in order, first failure wins: config present → credentials
/// usable → CORS computed → preflight answered → method restricted →
/// endpoint validated → upstream called → response relayed. The CORS
/// decision applies to every response produced after it is computed; the two
/// configuration gates answer before CORS exists, mirroring the contract.
async fn relay_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = Uuid::new_v4();

    let config = match state.config.as_ref() {
        ConfigState::Missing { path } => {
            tracing::warn!(request_id = %request_id, "Rejected request, configuration missing");
            return RelayError::ConfigMissing { path: path.clone() }.into_response();
        }
        ConfigState::Loaded(config) => config,
    };

    if let Err(e) = validate_credentials(config) {
        tracing::warn!(
            request_id = %request_id,
            field = e.field(),
            "Rejected request, configuration incomplete"
        );
        return RelayError::ConfigIncomplete(e).into_response();
    }

    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());
    let cors = resolve_origin(&config.allowed_origins, origin);

    if request.method() == Method::OPTIONS {
        return with_cors(StatusCode::OK.into_response(), &cors);
    }

    let response = match relay(&state, config, request, request_id).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Request not relayed");
            e.into_response()
        }
    };

    with_cors(response, &cors)
}

/// Gates 5 through 11: method restriction, endpoint validation, upstream
/// call, verbatim passthrough.
async fn relay(
    state: &AppState,
    config: &RelayConfig,
    request: Request<Body>,
    request_id: Uuid,
) -> Result<Response, RelayError> {
    if request.method() != Method::GET {
        return Err(RelayError::MethodNotAllowed);
    }

    let query = request.uri().query().unwrap_or("");
    let (endpoint, passthrough) = split_endpoint(query);

    let endpoint = match endpoint {
        Some(e) if !e.is_empty() => e,
        _ => return Err(RelayError::MissingEndpoint),
    };

    // Literal parent-directory check, not canonicalization. The framework
    // has already percent-decoded the value this sees.
    if endpoint.contains("..") {
        return Err(RelayError::InvalidEndpoint);
    }

    let target = build_target_url(&config.upstream.bookstack_url, &endpoint, &passthrough);

    tracing::debug!(
        request_id = %request_id,
        endpoint = %endpoint,
        params = passthrough.len(),
        "Forwarding to BookStack"
    );

    let (status, body) = state
        .upstream
        .fetch(&target, &config.upstream)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Upstream request failed");
            RelayError::UpstreamUnreachable(e)
        })?;

    tracing::debug!(
        request_id = %request_id,
        status = %status,
        bytes = body.len(),
        "Upstream response relayed"
    );

    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// Split the raw query string into the endpoint value and the pass-through
/// parameters. A repeated `endpoint` key keeps the last occurrence;
/// everything else is forwarded in order.
fn split_endpoint(query: &str) -> (Option<String>, Vec<(String, String)>) {
    let mut endpoint = None;
    let mut passthrough = Vec::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        if key == ENDPOINT_PARAM {
            endpoint = Some(value.into_owned());
        } else {
            passthrough.push((key.into_owned(), value.into_owned()));
        }
    }

    (endpoint, passthrough)
}

/// Attach the computed CORS headers to an outgoing response.
fn with_cors(mut response: Response, decision: &CorsDecision) -> Response {
    apply_cors_headers(response.headers_mut(), decision);
    response
}
