//! View module - What a connected client sees and how it changes.
//!
//! - [`builder`] walks a registry snapshot once and produces a [`Page`]
//! - [`command`] defines the operations the server sends to a client
//! - [`mutation`] maps each light update to targeted element changes

mod action;
pub mod builder;
pub mod command;
mod element;
pub mod mutation;
mod page;
mod tile;

pub use action::{DomEvent, HandlerRegistration, UserAction};
pub use builder::{build_page, BuildOptions};
pub use command::{CommandBatch, ViewCommand};
pub use element::{ElementCategory, ElementId, ElementRole};
pub use mutation::{mutations_for, StyleProperty, ViewMutation, DISABLED_OPACITY, ENABLED_OPACITY};
pub use page::{Page, ViewIndex};
pub use tile::Tile;
