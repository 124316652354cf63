//! WebSocket adapters for the live dashboard.
//!
//! # Architecture
//!
//! ```text
//! domain producer ──► BroadcastStream ──► ConnectionWorker (one per socket)
//!                                                  │
//!                                                  ▼
//!                       ChannelViewClient ──► writer task ──► socket
//!                                                  ▲
//!                       commit / rebuild ──────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`client`] - `ViewClient` over a connection's outbound channel
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod client;
pub mod handler;
pub mod messages;

pub use client::ChannelViewClient;
pub use handler::live_handler;
pub use messages::{ClientMessage, ErrorMessage, PongMessage, ServerMessage};
