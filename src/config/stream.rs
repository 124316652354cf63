//! Live update delivery configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for per-cursor buffering; beyond this a stalled client costs
/// more memory than a reload.
const MAX_CAPACITY: usize = 65_536;

/// Broadcast stream and per-connection delivery settings
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// Envelopes buffered per cursor before the oldest are dropped
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Commands buffered between a connection and its socket writer
    #[serde(default = "default_outbound_buffer")]
    pub outbound_buffer: usize,

    /// Duration of the on/off opacity animation in milliseconds
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

impl StreamConfig {
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.capacity == 0 || self.capacity > MAX_CAPACITY {
            return Err(ValidationError::InvalidCapacity(self.capacity));
        }
        if self.outbound_buffer == 0 {
            return Err(ValidationError::InvalidCapacity(self.outbound_buffer));
        }
        Ok(())
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            outbound_buffer: default_outbound_buffer(),
            fade_ms: default_fade_ms(),
        }
    }
}

fn default_capacity() -> usize {
    256
}

fn default_outbound_buffer() -> usize {
    64
}

fn default_fade_ms() -> u64 {
    500
}
