//! WebSocket message types for the live dashboard.
//!
//! Defines the protocol between server and connected clients:
//! - Server → Client: Content replacement, handler registration, element
//!   mutations, readiness, errors, pongs
//! - Client → Server: Fired handler events, pings

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::view::{DomEvent, ElementId, StyleProperty, ViewCommand, ViewMutation};

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Replace the content container.
    ReplaceContent { markup: String },

    /// Several messages to apply in order, sent as one frame.
    Batch { messages: Vec<ServerMessage> },

    /// Report `event` on `element_id` back to the server.
    #[serde(rename_all = "camelCase")]
    RegisterHandler { element_id: ElementId, event: DomEvent },

    /// Animate the element's opacity.
    #[serde(rename_all = "camelCase")]
    Animate {
        element_id: ElementId,
        opacity: f64,
        duration_ms: u64,
    },

    #[serde(rename_all = "camelCase")]
    SetStyle {
        element_id: ElementId,
        property: StyleProperty,
        value: String,
    },

    #[serde(rename_all = "camelCase")]
    SetText { element_id: ElementId, text: String },

    /// The view is built; hide the loading indicator.
    Ready,

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

impl ServerMessage {
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        ServerMessage::Error(ErrorMessage {
            code: code.into(),
            message: message.into(),
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }

    pub fn pong() -> Self {
        ServerMessage::Pong(PongMessage {
            timestamp: Timestamp::now().to_rfc3339(),
        })
    }
}

impl From<ViewCommand> for ServerMessage {
    fn from(command: ViewCommand) -> Self {
        match command {
            ViewCommand::ReplaceContent { markup } => ServerMessage::ReplaceContent { markup },
            ViewCommand::RegisterHandler { element, event } => ServerMessage::RegisterHandler {
                element_id: element,
                event,
            },
            ViewCommand::Mutate(mutation) => mutation.into(),
            ViewCommand::Ready => ServerMessage::Ready,
        }
    }
}

impl From<ViewMutation> for ServerMessage {
    fn from(mutation: ViewMutation) -> Self {
        match mutation {
            ViewMutation::Animate {
                element,
                opacity,
                duration,
            } => ServerMessage::Animate {
                element_id: element,
                opacity,
                duration_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            },
            ViewMutation::SetStyle {
                element,
                property,
                value,
            } => ServerMessage::SetStyle {
                element_id: element,
                property,
                value,
            },
            ViewMutation::SetText { element, text } => ServerMessage::SetText {
                element_id: element,
                text,
            },
        }
    }
}

/// Error message sent to client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

/// Heartbeat response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A registered handler fired.
    #[serde(rename_all = "camelCase")]
    Event {
        element_id: String,
        event: DomEvent,
        /// Click position as a 0.0-1.0 fraction for position events.
        #[serde(default)]
        value: Option<f64>,
    },

    /// Heartbeat request.
    Ping,
}
