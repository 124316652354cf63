//! CommitPageHandler - Materializes a built page on one client.
//!
//! The commit runs in three steps, each a single transmission:
//!
//! 1. render every fragment and replace the content container
//! 2. execute every deferred registration inside one batch
//! 3. signal that the view is ready
//!
//! Registrations are never sent before the content they attach to.

use std::sync::Arc;

use crate::domain::session::SessionError;
use crate::domain::view::{CommandBatch, Page, ViewCommand, ViewIndex};
use crate::ports::{TileRenderer, ViewClient};

/// Handler for committing pages.
pub struct CommitPageHandler {
    renderer: Arc<dyn TileRenderer>,
}

impl CommitPageHandler {
    pub fn new(renderer: Arc<dyn TileRenderer>) -> Self {
        Self { renderer }
    }

    /// Commits `page` to `client` and returns the index of what it now shows.
    ///
    /// A failure aborts this client's view construction only.
    pub async fn handle(
        &self,
        page: &Page,
        client: &dyn ViewClient,
    ) -> Result<ViewIndex, SessionError> {
        // 1. Render everything up front so a render failure sends nothing
        let markup = page
            .fragments()
            .iter()
            .map(|tile| self.renderer.render(tile))
            .collect::<Result<Vec<_>, _>>()?
            .concat();
        client.send(ViewCommand::ReplaceContent { markup }).await?;

        // 2. Deferred registrations, in traversal order, as one batch
        let mut batch = CommandBatch::new();
        for registration in page.registrations() {
            batch.register(registration);
        }
        let registered = batch.len();
        if !batch.is_empty() {
            client.send_batch(batch.into_commands()).await?;
        }

        // 3. Clear the loading indicator
        client.send(ViewCommand::Ready).await?;

        let index = page.view_index();
        tracing::debug!(
            fragments = page.fragments().len(),
            registered,
            elements = index.element_count(),
            "Page committed"
        );
        Ok(index)
    }
}
