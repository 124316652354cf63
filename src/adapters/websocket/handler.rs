//! WebSocket upgrade handler for live dashboard connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Resolve the session token from the cookie (or issue one)
//! 2. Upgrade to WebSocket and start the writer task
//! 3. Open the connection: build and commit the view, start its worker
//! 4. Dispatch client events until disconnect
//! 5. Disconnect exactly once

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::adapters::http::live::cookie;
use crate::adapters::http::AppState;
use crate::application::{LiveConnection, OpenConnectionCommand, UserActionCommand};
use crate::domain::foundation::SessionToken;

use super::client::ChannelViewClient;
use super::messages::{ClientMessage, ServerMessage};

/// Handle WebSocket upgrade requests for the live view.
///
/// Route: `GET /live`
pub async fn live_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let (token, set_cookie) = cookie::resolve_token(&headers);

    let mut response = ws
        .on_upgrade(move |socket| handle_socket(socket, token, state))
        .into_response();
    if let Some(value) = set_cookie {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection. Outbound messages from the
/// commit, the worker and this loop all go through one channel so the
/// writer task is the only owner of the socket sink.
async fn handle_socket(socket: WebSocket, token: SessionToken, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::channel::<ServerMessage>(state.outbound_buffer.max(1));

    let mut writer = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if let Err(e) = send_message(&mut sender, &message).await {
                tracing::debug!("Send error, closing connection: {}", e);
                break;
            }
        }
    });

    let client = Arc::new(ChannelViewClient::new(outbound_tx));
    let connection = match state
        .open_connection
        .handle(OpenConnectionCommand {
            token: token.clone(),
            client: client.clone(),
        })
        .await
    {
        Ok(connection) => connection,
        Err(e) => {
            tracing::warn!(token = %token, error = %e, "Failed to open connection");
            let _ = client
                .send_message(ServerMessage::error(e.code().to_string(), e.message()))
                .await;
            drop(client);
            let _ = writer.await;
            return;
        }
    };

    loop {
        tokio::select! {
            _ = &mut writer => {
                tracing::debug!(connection = %connection.id(), "Writer finished");
                break;
            }
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    handle_text(&state, &connection, &client, &text).await;
                }
                Some(Ok(Message::Binary(_))) => {
                    tracing::warn!(connection = %connection.id(), "Received unsupported binary message");
                }
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                    // WebSocket protocol ping/pong - handled automatically by axum
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::debug!(connection = %connection.id(), "Client closed connection");
                    break;
                }
                Some(Err(e)) => {
                    tracing::debug!(connection = %connection.id(), "Receive error: {}", e);
                    break;
                }
            }
        }
    }

    let id = connection.id();
    let remaining = connection.disconnect();
    tracing::info!(connection = %id, remaining, "Client disconnected");
    writer.abort();
}

/// Dispatch one text frame from the client.
async fn handle_text(
    state: &AppState,
    connection: &LiveConnection,
    client: &ChannelViewClient,
    text: &str,
) {
    let message = match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(connection = %connection.id(), "Ignoring malformed message: {}", e);
            return;
        }
    };

    match message {
        ClientMessage::Ping => {
            let _ = client.send_message(ServerMessage::pong()).await;
        }
        ClientMessage::Event {
            element_id,
            event,
            value,
        } => {
            let Some(action) = connection.action_for(&element_id, event) else {
                tracing::debug!(
                    connection = %connection.id(),
                    element = %element_id,
                    "Event for element without a handler ignored"
                );
                return;
            };
            let command = UserActionCommand {
                action,
                position: value,
            };
            if let Err(e) = state.user_actions.handle(connection, command).await {
                tracing::warn!(connection = %connection.id(), error = %e, "User action failed");
                let _ = client
                    .send_message(ServerMessage::error(e.code().to_string(), e.message()))
                    .await;
            }
        }
    }
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}
