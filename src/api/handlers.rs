use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::monitor::{CostMonitor, MonitorError};
use crate::notification::{self, EXPECTED_CONTENT_TYPE};

/// Application state shared across handlers
pub struct AppState {
    pub monitor: Arc<CostMonitor>,
}

// ============================================================================
// Health Check
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub last_cost: Option<f64>,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        last_cost: state.monitor.last_cost(),
    })
}

// ============================================================================
// Cost Notification
// ============================================================================

/// Handle one billing cost push notification.
///
/// The evaluate-execute-commit section runs on a blocking thread; the monitor
/// lock serializes it across concurrent requests.
pub async fn notify(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    if content_type != Some(EXPECTED_CONTENT_TYPE) {
        return Err(ApiError::UnsupportedMediaType);
    }

    let notification =
        notification::decode(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let monitor = Arc::clone(&state.monitor);
    tokio::task::spawn_blocking(move || {
        monitor.process(notification.cost, &notification.currency)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(StatusCode::OK)
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    UnsupportedMediaType,
    BadRequest(String),
    ActionFailed,
    Internal(String),
}

impl From<MonitorError> for ApiError {
    fn from(err: MonitorError) -> Self {
        match err {
            MonitorError::ActionFailed { .. } => ApiError::ActionFailed,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Only the 400 carries a body: the decode diagnostic.
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response(),
            ApiError::BadRequest(diagnostic) => {
                (StatusCode::BAD_REQUEST, diagnostic).into_response()
            }
            ApiError::ActionFailed => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
