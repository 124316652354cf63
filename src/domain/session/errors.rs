//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ViewError;

/// Errors that abort the construction of one connection's session.
///
/// None of these affect other live connections or the shared state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The client transport failed while the view was being committed.
    Transport(String),
    /// A collaborator (renderer, controller) reported a failure.
    Infrastructure(String),
}

impl SessionError {
    pub fn transport(message: impl Into<String>) -> Self {
        SessionError::Transport(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SessionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Transport(_) => ErrorCode::TransportError,
            SessionError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            SessionError::Transport(msg) => format!("Client transport failed: {}", msg),
            SessionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<ViewError> for SessionError {
    fn from(err: ViewError) -> Self {
        SessionError::Transport(err.to_string())
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        SessionError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_maps_to_transport_code() {
        let err: SessionError = ViewError::Disconnected.into();
        assert_eq!(err.code(), ErrorCode::TransportError);
        assert!(err.to_string().contains("Client transport failed"));
    }

    #[test]
    fn domain_error_becomes_infrastructure() {
        let err: SessionError = DomainError::new(ErrorCode::ControllerError, "bridge down").into();
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.message().contains("bridge down"));
    }
}
