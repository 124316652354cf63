//! HTTP adapters - REST and WebSocket endpoint exposure.

pub mod live;

// Re-export key types for convenience
pub use live::{app_router, ApiError, AppState};
