//! Session handlers.

mod resolve_session;

pub use resolve_session::{ResolveSessionCommand, ResolveSessionHandler};
