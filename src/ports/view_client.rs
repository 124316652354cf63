//! ViewClient port - Interface to one connected client's view.
//!
//! The transport host implements this for each connection. Commit and worker
//! code only ever talk to a client through it, which keeps them testable with
//! a recording implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::view::ViewCommand;

/// Errors raised while delivering commands to a client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    /// The client has gone away; nothing more can be delivered.
    #[error("Client disconnected")]
    Disconnected,

    /// The transport rejected the command.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Port for delivering view commands to one client.
///
/// Implementations must preserve call order: commands from consecutive calls
/// reach the client in the order the calls completed.
#[async_trait]
pub trait ViewClient: Send + Sync {
    /// Deliver a single command.
    async fn send(&self, command: ViewCommand) -> Result<(), ViewError>;

    /// Deliver several commands as one transmission.
    async fn send_batch(&self, commands: Vec<ViewCommand>) -> Result<(), ViewError>;
}
