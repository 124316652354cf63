//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the lightboard domain.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ConnectionId, DeviceId, GroupId, SceneId, ScheduleId, SessionToken};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
