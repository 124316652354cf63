//! OpenConnectionHandler - Builds and commits a new client's view.
//!
//! Opening runs subscribe → resolve → build → commit → start worker. The
//! cursor is taken before the snapshot so nothing published in between is
//! lost; an envelope the snapshot already reflects is replayed harmlessly
//! because every mutation is idempotent.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::foundation::{ConnectionId, SessionToken};
use crate::domain::session::SessionError;
use crate::domain::view::{build_page, BuildOptions, DomEvent, UserAction, ViewIndex};
use crate::ports::{LightUpdateFeed, ViewClient};

use super::super::session::{ResolveSessionCommand, ResolveSessionHandler};
use super::super::view::CommitPageHandler;
use super::worker::{ConnectionWorker, WorkerHandle};

/// Command to open a connection for a client.
#[derive(Clone)]
pub struct OpenConnectionCommand {
    pub token: SessionToken,
    pub client: Arc<dyn ViewClient>,
}

/// Handler for opening connections.
pub struct OpenConnectionHandler {
    feed: Arc<dyn LightUpdateFeed>,
    sessions: ResolveSessionHandler,
    commit: Arc<CommitPageHandler>,
    worker: ConnectionWorker,
}

impl OpenConnectionHandler {
    pub fn new(
        feed: Arc<dyn LightUpdateFeed>,
        sessions: ResolveSessionHandler,
        commit: Arc<CommitPageHandler>,
        worker: ConnectionWorker,
    ) -> Self {
        Self {
            feed,
            sessions,
            commit,
            worker,
        }
    }

    /// Opens a connection. On error nothing is left running.
    pub async fn handle(&self, cmd: OpenConnectionCommand) -> Result<LiveConnection, SessionError> {
        let id = ConnectionId::new();

        // 1. Subscribe first so the cursor covers everything after the snapshot
        let cursor = self.feed.subscribe();

        // 2. Resolve the session and snapshot the registries atomically
        let opening = self.sessions.handle(&ResolveSessionCommand {
            token: cmd.token.clone(),
        });

        // 3. Build the page
        let options = BuildOptions::for_host(&opening.settings.title, opening.settings.diagnostics);
        let page = build_page(&opening.snapshot, &opening.user_data, &options);

        // 4. Commit it; a failure drops the cursor and aborts this connection only
        let index = self
            .commit
            .handle(&page, cmd.client.as_ref())
            .await
            .map_err(|e| {
                tracing::warn!(connection = %id, token = %cmd.token, error = %e, "View commit failed");
                e
            })?;

        // 5. Start the worker
        let view = Arc::new(RwLock::new(index));
        let worker = self
            .worker
            .start(id, cursor, Arc::clone(&cmd.client), Arc::clone(&view));

        Ok(LiveConnection {
            id,
            token: cmd.token,
            is_new: opening.is_new,
            client: cmd.client,
            view,
            worker,
        })
    }
}

/// A committed view together with the worker keeping it live.
///
/// [`disconnect`](LiveConnection::disconnect) consumes the connection, so it
/// can only be called once; dropping the connection has the same effect.
pub struct LiveConnection {
    id: ConnectionId,
    token: SessionToken,
    is_new: bool,
    client: Arc<dyn ViewClient>,
    view: Arc<RwLock<ViewIndex>>,
    worker: WorkerHandle,
}

impl LiveConnection {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Whether this connection created the session's user data.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn client(&self) -> &Arc<dyn ViewClient> {
        &self.client
    }

    /// Maps a fired client event back to the action registered for it.
    ///
    /// Events for elements the view no longer shows, or with a different
    /// event kind than registered, map to nothing.
    pub fn action_for(&self, element: &str, event: DomEvent) -> Option<UserAction> {
        let view = self.view.read();
        view.handler(element)
            .filter(|registration| registration.event == event)
            .map(|registration| registration.action.clone())
    }

    /// Swaps in the index of a freshly committed view.
    pub fn replace_view(&self, index: ViewIndex) {
        *self.view.write() = index;
    }

    /// Stops the worker and returns the remaining connected-user count.
    pub fn disconnect(self) -> usize {
        self.worker.cancel()
    }
}
