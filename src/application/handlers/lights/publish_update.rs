//! PublishLightUpdateHandler - Entry point for the domain producer.

use std::sync::Arc;

use crate::application::SharedStateStore;
use crate::domain::foundation::DomainError;
use crate::domain::lights::LightEnvelope;
use crate::ports::LightUpdatePublisher;

/// Result of publishing one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishLightUpdateResult {
    /// Number of cursors the envelope was queued for.
    pub delivered: usize,
}

/// Handler that records an update in the registries and then fans it out.
///
/// Applying first means a connection opened after this call snapshots the
/// new state, while one already open receives the envelope. Both steps share
/// one transaction, so cursors see updates in the order the store applied them.
pub struct PublishLightUpdateHandler {
    store: Arc<SharedStateStore>,
    publisher: Arc<dyn LightUpdatePublisher>,
}

impl PublishLightUpdateHandler {
    pub fn new(store: Arc<SharedStateStore>, publisher: Arc<dyn LightUpdatePublisher>) -> Self {
        Self { store, publisher }
    }

    pub fn handle(&self, envelope: LightEnvelope) -> Result<PublishLightUpdateResult, DomainError> {
        let delivered = self
            .store
            .apply_and_publish(envelope, self.publisher.as_ref())?;
        tracing::debug!(delivered, "Light update published");
        Ok(PublishLightUpdateResult { delivered })
    }
}
