//! Application handlers.
//!
//! Command handlers that orchestrate the store, the broadcast stream and the
//! client view.

pub mod connection;
pub mod lights;
pub mod persistence;
pub mod session;
pub mod view;

pub use connection::{
    ConnectionWorker, HandleUserActionHandler, LiveConnection, OpenConnectionCommand,
    OpenConnectionHandler, UserActionCommand, WorkerHandle,
};
pub use lights::{PublishLightUpdateHandler, PublishLightUpdateResult};
pub use persistence::StatePersister;
pub use session::{ResolveSessionCommand, ResolveSessionHandler};
pub use view::CommitPageHandler;
