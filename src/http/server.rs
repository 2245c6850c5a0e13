//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the single `/proxy` handler
//! - Wire up middleware (request ID, tracing, body limit)
//! - Bind server to listener
//! - Run validate → authenticate → route → forward → relay per request

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, HeaderName},
    routing::post,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::error::RelayError;
use crate::http::request::ForwardRequest;
use crate::http::response::ForwardResponse;
use crate::upstream::{ClientFactory, Forwarder};

/// Header carrying the per-request correlation id.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub forwarder: Forwarder,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let config = Arc::new(config);
        let forwarder = Forwarder::new(ClientFactory::new(config.settings.upstream.clone()));

        let state = AppState {
            config: config.clone(),
            forwarder,
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    pub fn build_router(state: AppState) -> Router {
        let max_body_size = state.config.settings.listener.max_body_size;

        Router::new()
            .route("/proxy", post(proxy_handler))
            .with_state(state)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(max_body_size))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Get the router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
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

/// Relay one described request through its session proxy.
async fn proxy_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<ForwardResponse, RelayError> {
    let request = ForwardRequest::from_json(&body)?;
    state.config.token.authorize(&headers)?;

    let endpoint = state.config.proxy_template.resolve(&request.session_id);
    tracing::info!(
        proxy = %endpoint,
        method = request.method.as_str(),
        url = %request.url,
        "Forwarding request"
    );

    Ok(state.forwarder.forward(request, &endpoint).await?)
}
