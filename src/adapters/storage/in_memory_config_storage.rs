//! In-Memory Config Storage Adapter
//!
//! Keeps the last saved state in memory. Useful for testing and for running
//! without a state file.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{ConfigStorage, PersistedState, StorageError};

/// In-memory storage for [`PersistedState`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStorage {
    state: Arc<RwLock<Option<PersistedState>>>,
    saves: Arc<RwLock<usize>>,
}

impl InMemoryConfigStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage that already holds `state`
    pub fn with_state(state: PersistedState) -> Self {
        Self {
            state: Arc::new(RwLock::new(Some(state))),
            saves: Arc::new(RwLock::new(0)),
        }
    }

    /// Number of completed saves (useful for tests)
    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }
}

#[async_trait]
impl ConfigStorage for InMemoryConfigStorage {
    async fn load(&self) -> Result<Option<PersistedState>, StorageError> {
        Ok(self.state.read().await.clone())
    }

    async fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
        *self.state.write().await = Some(state.clone());
        *self.saves.write().await += 1;
        Ok(())
    }
}
