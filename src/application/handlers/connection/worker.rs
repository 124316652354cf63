//! Connection worker - Drains one connection's cursor into its view.
//!
//! ```text
//! Starting ──► Running ──► Cancelled
//! ```
//!
//! Starting increments the connected-user counter and spawns the receive
//! loop. Cancelling aborts the loop and decrements the counter in the same
//! step; [`WorkerHandle`] performs that step exactly once, whether through
//! [`WorkerHandle::cancel`] or on drop.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::task::JoinHandle;

use crate::application::SharedStateStore;
use crate::domain::foundation::ConnectionId;
use crate::domain::lights::LightEnvelope;
use crate::domain::view::{mutations_for, ViewCommand, ViewIndex};
use crate::ports::{UpdateCursor, ViewClient, ViewError};

/// Spawns connection workers.
pub struct ConnectionWorker {
    store: Arc<SharedStateStore>,
    fade: Duration,
}

impl ConnectionWorker {
    pub fn new(store: Arc<SharedStateStore>, fade: Duration) -> Self {
        Self { store, fade }
    }

    /// Counts the connection in and starts draining `cursor` into `client`.
    ///
    /// `view` is consulted for every mutation so only elements the client
    /// currently shows are targeted.
    pub fn start(
        &self,
        connection: ConnectionId,
        mut cursor: Box<dyn UpdateCursor>,
        client: Arc<dyn ViewClient>,
        view: Arc<RwLock<ViewIndex>>,
    ) -> WorkerHandle {
        let connected = self.store.adjust_counter(1);
        tracing::info!(connection = %connection, connected, "Connection worker started");

        let fade = self.fade;
        let task = tokio::spawn(async move {
            while let Some(envelope) = cursor.next().await {
                match apply(&envelope, fade, client.as_ref(), &view).await {
                    Ok(()) => {}
                    Err(ViewError::Disconnected) => {
                        tracing::debug!(connection = %connection, "Client gone; worker stopping");
                        break;
                    }
                    Err(e) => {
                        tracing::warn!(connection = %connection, error = %e, "Failed to deliver mutation");
                    }
                }
            }
        });

        WorkerHandle {
            connection,
            task: Some(task),
            store: Arc::clone(&self.store),
        }
    }
}

/// Translates one envelope into mutations for the elements `view` contains.
async fn apply(
    envelope: &LightEnvelope,
    fade: Duration,
    client: &dyn ViewClient,
    view: &RwLock<ViewIndex>,
) -> Result<(), ViewError> {
    let commands: Vec<ViewCommand> = {
        let view = view.read();
        mutations_for(envelope, fade)
            .into_iter()
            .filter(|mutation| {
                let known = view.contains(mutation.target());
                if !known {
                    tracing::debug!(
                        element = %mutation.target(),
                        light = %envelope.light_id,
                        "Element not in view; mutation skipped"
                    );
                }
                known
            })
            .map(ViewCommand::Mutate)
            .collect()
    };

    match <[ViewCommand; 1]>::try_from(commands) {
        Ok([command]) => client.send(command).await,
        Err(commands) if commands.is_empty() => Ok(()),
        Err(commands) => client.send_batch(commands).await,
    }
}

/// Ties a running worker to its connection.
///
/// Abort and counter decrement always happen together, exactly once.
pub struct WorkerHandle {
    connection: ConnectionId,
    task: Option<JoinHandle<()>>,
    store: Arc<SharedStateStore>,
}

impl WorkerHandle {
    /// Stops the worker and returns how many connections remain.
    pub fn cancel(mut self) -> usize {
        self.stop().unwrap_or_else(|| self.store.connected_users())
    }

    fn stop(&mut self) -> Option<usize> {
        let task = self.task.take()?;
        task.abort();
        let remaining = self.store.adjust_counter(-1);
        tracing::info!(connection = %self.connection, remaining, "Connection worker cancelled");
        Some(remaining)
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
