//! Live dashboard HTTP module.
//!
//! Serves the page shell, the WebSocket endpoint, the producer ingestion
//! endpoint and a status endpoint.

pub mod cookie;
pub mod dto;
pub mod handlers;
pub mod routes;
mod shell;

pub use handlers::{ApiError, AppState};
pub use routes::app_router;
