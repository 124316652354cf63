//! ViewClient implementation backed by a connection's outbound channel.
//!
//! The socket writer task drains the channel; this side only converts view
//! commands into protocol messages. Channel order is frame order, so command
//! order is preserved end to end.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::view::ViewCommand;
use crate::ports::{ViewClient, ViewError};

use super::messages::ServerMessage;

/// Sends view commands to one WebSocket through its writer task.
#[derive(Debug, Clone)]
pub struct ChannelViewClient {
    outbound: mpsc::Sender<ServerMessage>,
}

impl ChannelViewClient {
    pub fn new(outbound: mpsc::Sender<ServerMessage>) -> Self {
        Self { outbound }
    }

    /// Queues a protocol message that has no view-command equivalent.
    pub async fn send_message(&self, message: ServerMessage) -> Result<(), ViewError> {
        self.outbound
            .send(message)
            .await
            .map_err(|_| ViewError::Disconnected)
    }
}

#[async_trait]
impl ViewClient for ChannelViewClient {
    async fn send(&self, command: ViewCommand) -> Result<(), ViewError> {
        self.send_message(command.into()).await
    }

    async fn send_batch(&self, commands: Vec<ViewCommand>) -> Result<(), ViewError> {
        let messages = commands.into_iter().map(ServerMessage::from).collect();
        self.send_message(ServerMessage::Batch { messages }).await
    }
}
