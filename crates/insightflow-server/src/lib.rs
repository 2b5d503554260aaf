//! InsightFlow Web Server
//!
//! Axum-based REST API for the InsightFlow review analysis tool.
//!
//! The review corpus is loaded once at startup and held as an immutable
//! resource; the provider is selected once at configuration time. Each
//! analyze request runs the full request -> validate -> render cycle
//! and returns the presentation tree plus the derived alert.

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use insightflow_core::{Error as CoreError, InsightProvider, ProviderClient, ReviewCorpus};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// Immutable review corpus, loaded once at startup
    pub corpus: Arc<ReviewCorpus>,
    /// Insight provider, selected once at configuration time
    pub provider: ProviderClient,
}

/// Create the application router
pub fn create_router(
    corpus: ReviewCorpus,
    provider: ProviderClient,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> Router {
    info!(
        backend = provider.backend(),
        model = provider.model(),
        host = provider.host(),
        "Insight provider configured"
    );

    let state = Arc::new(AppState {
        corpus: Arc::new(corpus),
        provider,
    });

    let api_routes = Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/corpus", get(handlers::get_corpus))
        .route("/health", get(handlers::health));

    let cors = build_cors_layer(&config.allowed_origins);

    let mut app = Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Serve the demo UI when a static dir is provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if !origins.is_empty() {
        cors = cors.allow_origin(AllowOrigin::list(origins));
    }

    cors
}

/// Run the server until shutdown
pub async fn serve(
    corpus: ReviewCorpus,
    provider: ProviderClient,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    // Surface provider availability early; the server still starts when
    // the provider is down so the corpus endpoints keep working
    if provider.health_check().await {
        info!(host = provider.host(), "✅ Insight provider responding");
    } else {
        warn!(host = provider.host(), "⚠️  Insight provider not responding");
    }

    let app = create_router(corpus, provider, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error to its API status
    ///
    /// Provider and contract failures are upstream problems, reported as
    /// 502 with a sanitized message; the full error goes to the log.
    pub fn from_core(err: CoreError) -> Self {
        let (status, message) = match &err {
            CoreError::EmptyInput => (StatusCode::BAD_REQUEST, err.to_string()),
            CoreError::AnalysisFailed(_) => (
                StatusCode::BAD_GATEWAY,
                "Analysis failed; please try again".to_string(),
            ),
            CoreError::ContractViolation(_) => (
                StatusCode::BAD_GATEWAY,
                "Provider returned an incomplete analysis".to_string(),
            ),
            CoreError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            ),
        };
        Self {
            status,
            message,
            internal: Some(err.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Request failed");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;
