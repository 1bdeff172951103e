//! # Marksheet HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `POST /students` - Create a student record
//! - `PUT /students/{id}/update-marks?marks1=&marks2=&marks3=` - Replace marks
//! - `GET /status` - Record count and backend
//! - `GET /health` - Health check
//!
//! ## Configuration
//!
//! CORS, rate limiting and the body size cap come from [`HttpConfig`]
//! (see `crate::config` for the file and environment layers).

mod handlers;
mod middleware;
mod types;

pub use handlers::{
    create_student_handler, health_handler, status_for, status_handler, update_marks_handler,
};
pub use middleware::{GlobalRateLimiter, create_rate_limiter, rate_limit_middleware};
pub use types::{
    CreateStudentRequest, HealthResponse, StatusResponse, StudentJson, StudentResponse,
    UpdateMarksQuery,
};

use crate::config::HttpConfig;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post, put},
};
use marksheet_core::{MarksheetError, Registry};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the registry.
#[derive(Clone)]
pub struct AppState {
    /// The registry. Mutating handlers take the write lock for the whole
    /// fetch-validate-save sequence.
    pub registry: Arc<RwLock<Registry>>,
}

impl AppState {
    /// Create new app state with a registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::OPTIONS];

/// Build the CORS layer.
///
/// - `"*"`: allows all origins (development only)
/// - `None`: localhost only
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer(origins: Option<&str>) -> CorsLayer {
    match origins {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
            CorsLayer::permissive()
        }
        Some(list) => {
            let allowed_origins: Vec<HeaderValue> = list
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!("CORS: No valid origins configured, defaulting to localhost only");
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods(ALLOWED_METHODS)
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No origins configured, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
pub fn create_router(state: AppState, http: &HttpConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/students", post(create_student_handler))
        .route("/students/{id}/update-marks", put(update_marks_handler));

    if http.rate_limit > 0 {
        tracing::info!("Rate limiting enabled: {} requests/second", http.rate_limit);
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(http.rate_limit),
            rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(http.cors_origins.as_deref()))
                .layer(axum::extract::DefaultBodyLimit::max(http.body_limit_bytes)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(
    addr: &str,
    registry: Registry,
    http: &HttpConfig,
) -> Result<(), MarksheetError> {
    let state = AppState::new(registry);
    let router = create_router(state, http);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| MarksheetError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Marksheet HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MarksheetError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
