//! Application layer - Shared state and command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod state;

pub use handlers::{
    CommitPageHandler, ConnectionWorker, HandleUserActionHandler, LiveConnection,
    OpenConnectionCommand, OpenConnectionHandler, PublishLightUpdateHandler,
    PublishLightUpdateResult, ResolveSessionCommand, ResolveSessionHandler, StatePersister,
    UserActionCommand, WorkerHandle,
};
pub use state::{DashboardSettings, DashboardState, SessionOpening, SharedStateStore};
