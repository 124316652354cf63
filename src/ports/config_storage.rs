//! ConfigStorage port - Persistence of registries and user preferences.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::SessionToken;
use crate::domain::lights::Registries;
use crate::domain::session::UserData;

/// Errors that can occur while loading or saving state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize state: {0}")]
    Serialization(String),

    #[error("Failed to deserialize state: {0}")]
    Deserialization(String),
}

/// Everything that survives a restart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub registries: Registries,

    #[serde(default)]
    pub user_data: HashMap<SessionToken, UserData>,
}

/// Port for loading state at start-up and saving it after mutations.
///
/// Saves are fire-and-forget from the caller's perspective; implementations
/// must write atomically so a crash never leaves a torn file.
#[async_trait]
pub trait ConfigStorage: Send + Sync {
    /// Load persisted state, or `None` if nothing has been saved yet.
    async fn load(&self) -> Result<Option<PersistedState>, StorageError>;

    /// Replace the persisted state.
    async fn save(&self, state: &PersistedState) -> Result<(), StorageError>;
}
