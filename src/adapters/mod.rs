//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the core to the outside world:
//! - `broadcast` - In-process fan-out of light updates
//! - `controller` - Loopback light controller
//! - `http` - Page shell, status and producer ingestion endpoints
//! - `render` - HTML tile renderer
//! - `storage` - YAML and in-memory state persistence
//! - `websocket` - Live view transport

pub mod broadcast;
pub mod controller;
pub mod http;
pub mod render;
pub mod storage;
pub mod websocket;

pub use broadcast::{BroadcastStream, Cursor};
pub use controller::LoopbackLightController;
pub use render::HtmlTileRenderer;
pub use storage::{InMemoryConfigStorage, YamlConfigStorage};
pub use websocket::ChannelViewClient;
