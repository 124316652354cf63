//! Broadcast adapter - In-process fan-out of light updates.

mod stream;

pub use stream::{BroadcastStream, Cursor};
