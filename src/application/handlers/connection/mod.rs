//! Connection handlers.
//!
//! A connection's lifetime is owned by the transport: it calls
//! [`OpenConnectionHandler::handle`], routes fired events through
//! [`HandleUserActionHandler`], and finally calls
//! [`LiveConnection::disconnect`].

mod handle_user_action;
mod open_connection;
mod worker;

pub use handle_user_action::{HandleUserActionHandler, UserActionCommand};
pub use open_connection::{LiveConnection, OpenConnectionCommand, OpenConnectionHandler};
pub use worker::{ConnectionWorker, WorkerHandle};
