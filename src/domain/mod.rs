//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, percentages, errors)
//! - `lights` - Light, group, scene and schedule registries and their updates
//! - `session` - Per-client preferences and session errors
//! - `view` - Page building, element ids and view mutations

pub mod foundation;
pub mod lights;
pub mod session;
pub mod view;
