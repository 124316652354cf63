//! Light update ports - The single publish point and its subscriptions.

use async_trait::async_trait;

use crate::domain::lights::LightEnvelope;

/// Port the domain producer publishes through.
///
/// Publishing never blocks and never waits for subscribers; it returns the
/// number of cursors the envelope was queued for.
pub trait LightUpdatePublisher: Send + Sync {
    fn publish(&self, envelope: LightEnvelope) -> usize;
}

/// One subscriber's independent read position.
#[async_trait]
pub trait UpdateCursor: Send {
    /// Next envelope in publish order, or `None` once the stream is closed.
    async fn next(&mut self) -> Option<LightEnvelope>;
}

/// Port connections subscribe through.
pub trait LightUpdateFeed: Send + Sync {
    /// Opens a cursor that receives everything published afterwards.
    fn subscribe(&self) -> Box<dyn UpdateCursor>;
}
