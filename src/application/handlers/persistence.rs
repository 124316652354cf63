//! StatePersister - Saves store contents through the ConfigStorage port.

use std::sync::Arc;

use crate::application::SharedStateStore;
use crate::ports::{ConfigStorage, StorageError};

/// Copies persisted state out of the store and hands it to storage.
///
/// The copy is taken inside one transaction; the write happens afterwards,
/// outside the lock.
#[derive(Clone)]
pub struct StatePersister {
    store: Arc<SharedStateStore>,
    storage: Arc<dyn ConfigStorage>,
}

impl StatePersister {
    pub fn new(store: Arc<SharedStateStore>, storage: Arc<dyn ConfigStorage>) -> Self {
        Self { store, storage }
    }

    /// Saves now and reports the outcome.
    pub async fn persist(&self) -> Result<(), StorageError> {
        let state = self.store.persisted();
        self.storage.save(&state).await
    }

    /// Fire-and-forget save; failures are logged, never returned.
    pub fn persist_in_background(&self) {
        let persister = self.clone();
        tokio::spawn(async move {
            if let Err(e) = persister.persist().await {
                tracing::error!(error = %e, "Failed to persist dashboard state");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryConfigStorage;
    use crate::application::DashboardSettings;
    use crate::domain::foundation::{GroupId, SessionToken};

    #[tokio::test]
    async fn persist_saves_user_preferences() {
        let store = Arc::new(SharedStateStore::new(DashboardSettings::default()));
        let storage = Arc::new(InMemoryConfigStorage::new());
        let token = SessionToken::new("abc").unwrap();
        let group = GroupId::new("office").unwrap();
        store.toggle_group(&token, &group);

        StatePersister::new(store, storage.clone()).persist().await.unwrap();

        let saved = storage.load().await.unwrap().unwrap();
        assert!(saved.user_data[&token].is_expanded(&group));
    }

    #[tokio::test]
    async fn background_persist_eventually_saves() {
        let store = Arc::new(SharedStateStore::new(DashboardSettings::default()));
        let storage = Arc::new(InMemoryConfigStorage::new());

        StatePersister::new(store, storage.clone()).persist_in_background();
        for _ in 0..10 {
            if storage.save_count().await == 1 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(storage.save_count().await, 1);
    }
}
