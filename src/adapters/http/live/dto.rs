//! HTTP DTOs for the live dashboard endpoints.

use serde::Serialize;

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

/// Registry sizes reported by the status endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegistryCounts {
    pub lights: usize,
    pub groups: usize,
    pub scenes: usize,
    pub schedules: usize,
}

/// Response for `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub connected_users: usize,
    pub registries: RegistryCounts,
}

/// Response for `POST /api/lights/updates`.
#[derive(Debug, Clone, Serialize)]
pub struct PublishUpdateResponse {
    pub delivered: usize,
}
