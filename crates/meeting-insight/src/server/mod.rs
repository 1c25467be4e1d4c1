//! HTTP server for the meeting-insight service

pub mod routes;
pub mod state;

use axum::{
    extract::{DefaultBodyLimit, Request},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use crate::config::InsightConfig;
use crate::error::{Error, Result};
use state::AppState;

const ALLOW_HEADERS: &str = "Content-Type,Authorization";
const ALLOW_METHODS: &str = "GET,PUT,POST,DELETE,OPTIONS";

/// Meeting-insight HTTP server
pub struct InsightServer {
    config: InsightConfig,
    state: AppState,
}

impl InsightServer {
    /// Create a server with production clients
    pub fn new(config: InsightConfig) -> Result<Self> {
        let state = AppState::new(config.clone())?;
        Ok(Self { config, state })
    }

    /// Create a server around existing state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config().clone(),
            state,
        }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let addr: SocketAddr = self
            .address()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address: {}", e)))?;

        let router = self.build_router();

        tracing::info!("Starting meeting-insight server on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .await
            .map_err(|e| Error::Internal(format!("Server error: {}", e)))?;

        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.server.host, self.config.server.port)
    }
}

/// Router for the given state
pub fn build_router(state: AppState) -> Router {
    let max_body_size = state.config().server.max_body_size;

    Router::new()
        .nest("/api", routes::api_routes())
        .with_state(state)
        // Middleware layers (order matters - applied bottom to top)
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(cors))
}

/// Answer every preflight directly and add permissive CORS headers to every response
async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        Json(serde_json::json!({ "message": "OK" })).into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOW_HEADERS));
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOW_METHODS));

    response
}
