//! ResolveSessionHandler - Resolves a client's session at connection open.

use std::sync::Arc;

use crate::application::{SessionOpening, SharedStateStore};
use crate::domain::foundation::SessionToken;

/// Command to resolve (or create) the session behind a token.
#[derive(Debug, Clone)]
pub struct ResolveSessionCommand {
    pub token: SessionToken,
}

/// Handler for session resolution.
///
/// Owns no background work; everything happens in one store transaction.
pub struct ResolveSessionHandler {
    store: Arc<SharedStateStore>,
}

impl ResolveSessionHandler {
    pub fn new(store: Arc<SharedStateStore>) -> Self {
        Self { store }
    }

    /// Resolves user data and takes the registry snapshot atomically.
    pub fn handle(&self, cmd: &ResolveSessionCommand) -> SessionOpening {
        let opening = self.store.open_session(&cmd.token);
        if opening.is_new {
            tracing::info!(token = %cmd.token, "New session created");
        } else {
            tracing::debug!(
                token = %cmd.token,
                expanded_groups = opening.user_data.expanded_groups.len(),
                "Existing session resolved"
            );
        }
        opening
    }
}
