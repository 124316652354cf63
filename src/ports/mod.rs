//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the core and the outside world. Adapters implement these ports.
//!
//! - `LightUpdatePublisher` - Publish point used by the domain producer
//! - `LightUpdateFeed` - Per-connection cursors over published updates
//! - `LightController` - Commands toward the lights triggered by user actions
//! - `ViewClient` - Delivery of view commands to one connected client
//! - `TileRenderer` - Markup for a single tile
//! - `ConfigStorage` - Loading and saving registries and user preferences

mod config_storage;
mod light_controller;
mod light_publisher;
mod tile_renderer;
mod view_client;

pub use config_storage::{ConfigStorage, PersistedState, StorageError};
pub use light_controller::LightController;
pub use light_publisher::{LightUpdateFeed, LightUpdatePublisher, UpdateCursor};
pub use tile_renderer::TileRenderer;
pub use view_client::{ViewClient, ViewError};
