//! Broadcast stream with one independent cursor per subscriber.
//!
//! Backed by a single `tokio::sync::broadcast` channel: every cursor keeps
//! its own read position, so a slow subscriber never holds back a fast one
//! and the producer never waits on either.

use async_trait::async_trait;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::domain::lights::LightEnvelope;
use crate::ports::{LightUpdateFeed, LightUpdatePublisher, UpdateCursor};

/// Single publish point for [`LightEnvelope`]s.
///
/// # Capacity
///
/// `capacity` bounds how far any one cursor may fall behind. A cursor that
/// lags further loses the oldest envelopes; the loss is logged when the
/// cursor next reads.
#[derive(Debug, Clone)]
pub struct BroadcastStream {
    sender: broadcast::Sender<LightEnvelope>,
}

impl BroadcastStream {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Opens a cursor that sees every envelope published from now on.
    pub fn subscribe(&self) -> Cursor {
        Cursor {
            receiver: self.sender.subscribe(),
        }
    }

    /// Fans `envelope` out to every open cursor.
    ///
    /// Returns the number of cursors it was queued for; zero is not an error.
    pub fn publish(&self, envelope: LightEnvelope) -> usize {
        match self.sender.send(envelope) {
            Ok(count) => count,
            Err(_) => {
                tracing::trace!("Published light update with no subscribers");
                0
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl LightUpdatePublisher for BroadcastStream {
    fn publish(&self, envelope: LightEnvelope) -> usize {
        BroadcastStream::publish(self, envelope)
    }
}

impl LightUpdateFeed for BroadcastStream {
    fn subscribe(&self) -> Box<dyn UpdateCursor> {
        Box::new(BroadcastStream::subscribe(self))
    }
}

/// One subscriber's read position in the stream.
///
/// Dropping the cursor unsubscribes it.
#[derive(Debug)]
pub struct Cursor {
    receiver: broadcast::Receiver<LightEnvelope>,
}

impl Cursor {
    /// Waits for the next envelope in publish order.
    ///
    /// Returns `None` once the stream itself has been dropped.
    pub async fn next(&mut self) -> Option<LightEnvelope> {
        loop {
            match self.receiver.recv().await {
                Ok(envelope) => return Some(envelope),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Cursor fell behind; oldest light updates dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns the next envelope if one is already queued.
    pub fn try_next(&mut self) -> Option<LightEnvelope> {
        use tokio::sync::broadcast::error::TryRecvError;
        loop {
            match self.receiver.try_recv() {
                Ok(envelope) => return Some(envelope),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Cursor fell behind; oldest light updates dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}

#[async_trait]
impl UpdateCursor for Cursor {
    async fn next(&mut self) -> Option<LightEnvelope> {
        Cursor::next(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::DeviceId;
    use crate::domain::lights::LightUpdate;

    fn envelope(level: u8) -> LightEnvelope {
        LightEnvelope::new(DeviceId::new("1").unwrap(), LightUpdate::Brightness(level))
    }

    fn drain(cursor: &mut Cursor) -> Vec<u8> {
        let mut levels = Vec::new();
        while let Some(envelope) = cursor.try_next() {
            if let LightUpdate::Brightness(level) = envelope.update {
                levels.push(level);
            }
        }
        levels
    }

    #[test]
    fn publish_without_subscribers_is_not_an_error() {
        let stream = BroadcastStream::new(8);
        assert_eq!(stream.publish(envelope(1)), 0);
    }

    #[test]
    fn cursors_see_only_their_suffix() {
        let stream = BroadcastStream::new(16);
        let mut early = stream.subscribe();
        stream.publish(envelope(1));
        stream.publish(envelope(2));
        let mut late = stream.subscribe();
        stream.publish(envelope(3));

        assert_eq!(drain(&mut early), vec![1, 2, 3]);
        assert_eq!(drain(&mut late), vec![3]);
    }

    #[test]
    fn slow_cursor_does_not_affect_fast_cursor() {
        let stream = BroadcastStream::new(16);
        let mut fast = stream.subscribe();
        let mut slow = stream.subscribe();

        let mut seen_fast = Vec::new();
        for level in 0..10 {
            stream.publish(envelope(level));
            seen_fast.extend(drain(&mut fast));
        }

        assert_eq!(seen_fast, (0..10).collect::<Vec<_>>());
        assert_eq!(drain(&mut slow), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn lagging_cursor_skips_oldest_and_continues() {
        let stream = BroadcastStream::new(4);
        let mut cursor = stream.subscribe();
        for level in 0..10 {
            stream.publish(envelope(level));
        }
        assert_eq!(drain(&mut cursor), vec![6, 7, 8, 9]);
    }

    #[test]
    fn dropped_cursor_unsubscribes() {
        let stream = BroadcastStream::new(4);
        let cursor = stream.subscribe();
        assert_eq!(stream.subscriber_count(), 1);
        drop(cursor);
        assert_eq!(stream.subscriber_count(), 0);
        assert_eq!(stream.publish(envelope(1)), 0);
    }

    #[tokio::test]
    async fn next_returns_none_after_stream_dropped() {
        let stream = BroadcastStream::new(4);
        let mut cursor = stream.subscribe();
        stream.publish(envelope(7));
        drop(stream);

        assert_eq!(cursor.next().await, Some(envelope(7)));
        assert_eq!(cursor.next().await, None);
    }
}
