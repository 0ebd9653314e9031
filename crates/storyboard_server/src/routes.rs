//! HTTP routes for the Storyboard server.
//!
//! Two endpoints back the browser client: `POST /api/format` runs the scene
//! formatter, `GET /api/health` reports liveness and whether a Gemini
//! credential is configured. The wire field names (`script`,
//! `formattedScript`) are part of the client contract.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use storyboard_core::ScriptText;
use storyboard_error::{ConfigError, StoryboardError, StoryboardErrorKind, StoryboardResult};
use storyboard_interface::StoryboardDriver;
use storyboard_scenes::SceneFormatter;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

use crate::ServerConfig;

/// Shared state for request handlers.
///
/// The formatter is stateless per call, so one instance serves all
/// concurrent requests. `key_configured` is captured at startup for the
/// health report; the formatter re-checks the credential on every request.
pub struct AppState<D> {
    formatter: SceneFormatter<D>,
    key_configured: bool,
    port: u16,
}

impl<D> AppState<D> {
    /// Bundle the formatter with the startup credential check and the
    /// listen port reported by the health endpoint.
    pub fn new(formatter: SceneFormatter<D>, key_configured: bool, port: u16) -> Self {
        Self {
            formatter,
            key_configured,
            port,
        }
    }
}

/// Request body for `POST /api/format`.
#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    /// The raw script text to decompose into scenes
    pub script: String,
}

/// Response body for a successful format call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatResponse {
    /// Raw JSON text of the scene map, relayed verbatim
    pub formatted_script: String,
}

/// Error payload shared by all failure responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable, user-facing summary
    pub error: String,
    /// Underlying error detail, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An HTTP-mapped failure.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody {
                error: message.into(),
                details: None,
            },
        }
    }

    fn internal(details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: "Failed to format script".to_string(),
                details: Some(details.into()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<StoryboardError> for ApiError {
    fn from(err: StoryboardError) -> Self {
        match err.kind() {
            StoryboardErrorKind::Input(e) => Self::bad_request(e.message.clone()),
            _ => Self::internal(err.to_string()),
        }
    }
}

/// Build the application router.
///
/// CORS is restricted to the configured origins with the methods and
/// headers the browser client actually uses.
///
/// # Errors
///
/// Returns [`ConfigError`] when a configured CORS origin is not a valid
/// header value.
pub fn router<D>(state: Arc<AppState<D>>, config: &ServerConfig) -> StoryboardResult<Router>
where
    D: StoryboardDriver + 'static,
{
    Ok(Router::new()
        .route("/", get(index))
        .route("/api/format", post(format_script::<D>))
        .route("/api/health", get(health::<D>))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config)?)
        .with_state(state))
}

/// Build the CORS middleware layer from server configuration.
fn cors_layer(config: &ServerConfig) -> StoryboardResult<CorsLayer> {
    let mut origins = Vec::with_capacity(config.cors_origins.len());
    for origin in &config.cors_origins {
        let value = origin.parse::<HeaderValue>().map_err(|e| {
            StoryboardError::from(ConfigError::new(format!(
                "Invalid CORS origin '{}': {}",
                origin, e
            )))
        })?;
        origins.push(value);
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]))
}

/// Root liveness probe.
async fn index() -> &'static str {
    "Storyboard backend is running"
}

/// `GET /api/health`
async fn health<D>(State(state): State<Arc<AppState<D>>>) -> Json<serde_json::Value>
where
    D: StoryboardDriver,
{
    Json(json!({
        "status": "OK",
        "port": state.port,
        "geminiKeySet": state.key_configured,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// `POST /api/format`
///
/// Rejects blank scripts with 400 before any provider call. Formatter
/// failures map to 500 with the underlying detail in the body.
#[instrument(skip_all, fields(script_len = request.script.len()))]
async fn format_script<D>(
    State(state): State<Arc<AppState<D>>>,
    Json(request): Json<FormatRequest>,
) -> Result<Json<FormatResponse>, ApiError>
where
    D: StoryboardDriver,
{
    let script = ScriptText::new(request.script)
        .map_err(|_| ApiError::bad_request("Script cannot be empty"))?;

    info!("Received format request");

    let formatted_script = state.formatter.format_script(&script).await.map_err(|e| {
        error!(error = %e, "Scene formatting failed");
        ApiError::from(e)
    })?;

    Ok(Json(FormatResponse { formatted_script }))
}
