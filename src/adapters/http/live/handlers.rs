//! HTTP handlers for the live dashboard.
//!
//! These handlers connect Axum routes to application layer handlers.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::application::{
    HandleUserActionHandler, OpenConnectionHandler, PublishLightUpdateHandler, SharedStateStore,
};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::lights::LightEnvelope;

use super::cookie;
use super::dto::{ErrorResponse, PublishUpdateResponse, RegistryCounts, StatusResponse};
use super::shell::render_shell;

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// API error that implements IntoResponse.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::not_found(msg)),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error.code {
            ErrorCode::LightNotFound | ErrorCode::GroupNotFound | ErrorCode::SceneNotFound => {
                ApiError::NotFound(error.message)
            }
            ErrorCode::ValidationFailed => ApiError::BadRequest(error.message),
            ErrorCode::ControllerError
            | ErrorCode::StorageError
            | ErrorCode::TransportError
            | ErrorCode::InternalError => ApiError::Internal(error.message),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for every route.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SharedStateStore>,
    pub open_connection: Arc<OpenConnectionHandler>,
    pub user_actions: Arc<HandleUserActionHandler>,
    pub publish_update: Arc<PublishLightUpdateHandler>,
    /// Outbound message buffer per WebSocket connection.
    pub outbound_buffer: usize,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /
///
/// Serves the page shell and makes sure the client holds a session cookie
/// before it opens `/live`.
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let title = state.store.settings().title;
    let (_, set_cookie) = cookie::resolve_token(&headers);

    let mut response = Html(render_shell(&title)).into_response();
    if let Some(value) = set_cookie {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// GET /api/status
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let (lights, groups, scenes, schedules) = state.store.registry_sizes();
    Json(StatusResponse {
        connected_users: state.store.connected_users(),
        registries: RegistryCounts {
            lights,
            groups,
            scenes,
            schedules,
        },
    })
}

/// POST /api/lights/updates
///
/// Ingests one update from the domain producer.
pub async fn publish_update(
    State(state): State<AppState>,
    Json(envelope): Json<LightEnvelope>,
) -> Result<Json<PublishUpdateResponse>, ApiError> {
    let result = state.publish_update.handle(envelope)?;
    Ok(Json(PublishUpdateResponse {
        delivered: result.delivered,
    }))
}
