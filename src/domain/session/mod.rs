//! Session domain module.
//!
//! A session is the lifetime of one connected client. Its preferences are
//! keyed by an opaque [`SessionToken`](crate::domain::foundation::SessionToken)
//! so they survive reconnects.

mod errors;
mod user_data;

pub use errors::SessionError;
pub use user_data::UserData;
