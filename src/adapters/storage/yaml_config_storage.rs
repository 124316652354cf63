//! YAML Config Storage Adapter
//!
//! Stores registries and user preferences as a single YAML file.
//! Writes go to a sibling temp file which is then renamed over the target,
//! so a crash mid-write leaves the previous file intact.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::{ConfigStorage, PersistedState, StorageError};

/// File-based storage for [`PersistedState`]
#[derive(Debug, Clone)]
pub struct YamlConfigStorage {
    path: PathBuf,
}

impl YamlConfigStorage {
    /// Create storage backed by the file at `path`
    ///
    /// # Example
    /// ```ignore
    /// let storage = YamlConfigStorage::new("./lightboard-state.yaml");
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn ensure_parent_dir(&self) -> Result<(), StorageError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::Io(e.to_string())),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ConfigStorage for YamlConfigStorage {
    async fn load(&self) -> Result<Option<PersistedState>, StorageError> {
        let yaml = match fs::read_to_string(&self.path).await {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        let state = serde_yaml::from_str(&yaml)
            .map_err(|e| StorageError::Deserialization(e.to_string()))?;

        Ok(Some(state))
    }

    async fn save(&self, state: &PersistedState) -> Result<(), StorageError> {
        self.ensure_parent_dir().await?;

        let yaml = serde_yaml::to_string(state)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let temp_path = self.temp_path();
        let mut file = fs::File::create(&temp_path).await.map_err(|e| {
            StorageError::Io(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        file.write_all(yaml.as_bytes()).await.map_err(|e| {
            StorageError::Io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        file.sync_all().await.map_err(|e| {
            StorageError::Io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        drop(file);

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            StorageError::Io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DeviceId, GroupId, SessionToken};
    use crate::domain::lights::{Group, Light};
    use crate::domain::session::UserData;
    use tempfile::TempDir;

    fn create_storage() -> (YamlConfigStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = YamlConfigStorage::new(temp_dir.path().join("state.yaml"));
        (storage, temp_dir)
    }

    fn sample_state() -> PersistedState {
        let mut state = PersistedState::default();
        state
            .registries
            .lights
            .upsert(Light::new(DeviceId::new("1").unwrap(), "Desk"));
        state.registries.groups.upsert(Group::new(
            GroupId::new("office").unwrap(),
            "Office",
            vec![DeviceId::new("1").unwrap()],
        ));
        let mut user = UserData::new();
        user.toggle_group(&GroupId::new("office").unwrap());
        state
            .user_data
            .insert(SessionToken::new("abc").unwrap(), user);
        state
    }

    #[tokio::test]
    async fn load_missing_file_returns_none() {
        let (storage, _temp) = create_storage();
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_restores_state() {
        let (storage, _temp) = create_storage();
        storage.save(&sample_state()).await.unwrap();

        let loaded = storage.load().await.unwrap().unwrap();
        assert_eq!(loaded.registries.lights.len(), 1);
        let user = &loaded.user_data[&SessionToken::new("abc").unwrap()];
        assert!(user.is_expanded(&GroupId::new("office").unwrap()));
    }

    #[tokio::test]
    async fn save_leaves_no_temp_file() {
        let (storage, temp) = create_storage();
        storage.save(&sample_state()).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["state.yaml"]);
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let storage = YamlConfigStorage::new(temp.path().join("nested/dir/state.yaml"));
        storage.save(&PersistedState::default()).await.unwrap();
        assert!(storage.path().exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_deserialization_error() {
        let (storage, _temp) = create_storage();
        std::fs::write(storage.path(), "lights: [not, a, light").unwrap();
        assert!(matches!(
            storage.load().await,
            Err(StorageError::Deserialization(_))
        ));
    }
}
