//! Remote descriptor persistence in the local storage area.

use std::sync::Arc;

use async_trait::async_trait;

use super::storage_area::LocalStorageArea;
use crate::domain::RemoteDescriptor;
use crate::domain::ports::{RemoteSettingsError, RemoteSettingsRepository};

/// Storage key holding the serialised remote descriptor.
pub const REMOTE_ENDPOINT_KEY: &str = "remoteEndpoint";

/// Stores the active [`RemoteDescriptor`] as tagged JSON.
pub struct LocalRemoteSettingsRepository {
    area: Arc<LocalStorageArea>,
}

impl LocalRemoteSettingsRepository {
    /// Create a repository storing settings in `area`.
    pub fn new(area: Arc<LocalStorageArea>) -> Self {
        Self { area }
    }
}

#[async_trait]
impl RemoteSettingsRepository for LocalRemoteSettingsRepository {
    async fn load(&self) -> Result<Option<RemoteDescriptor>, RemoteSettingsError> {
        let raw = self
            .area
            .get(REMOTE_ENDPOINT_KEY)
            .map_err(|err| RemoteSettingsError::corrupt(err.to_string()))?;
        raw.map(|text| serde_json::from_str(&text))
            .transpose()
            .map_err(|err| RemoteSettingsError::corrupt(err.to_string()))
    }

    async fn save(&self, descriptor: &RemoteDescriptor) -> Result<(), RemoteSettingsError> {
        let raw = serde_json::to_string(descriptor)
            .map_err(|err| RemoteSettingsError::storage(err.to_string()))?;
        self.area
            .set(REMOTE_ENDPOINT_KEY, &raw)
            .map_err(|err| RemoteSettingsError::storage(err.to_string()))
    }

    async fn clear(&self) -> Result<(), RemoteSettingsError> {
        self.area
            .remove(REMOTE_ENDPOINT_KEY)
            .map_err(|err| RemoteSettingsError::storage(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use tempfile::TempDir;
    use url::Url;

    fn repository() -> (TempDir, Arc<LocalStorageArea>, LocalRemoteSettingsRepository) {
        let temp = TempDir::new().expect("create temp dir");
        let path = Utf8Path::from_path(temp.path()).expect("utf-8 temp path");
        let area = Arc::new(LocalStorageArea::open(path).expect("open area"));
        let repository = LocalRemoteSettingsRepository::new(Arc::clone(&area));
        (temp, area, repository)
    }

    #[tokio::test]
    async fn nothing_is_stored_initially() {
        let (_temp, _area, repository) = repository();
        assert_eq!(repository.load().await.expect("load"), None);
    }

    #[tokio::test]
    async fn saved_descriptor_loads_back_and_clears() {
        let (_temp, _area, repository) = repository();
        let descriptor = RemoteDescriptor::webhook_script(
            Url::parse("https://script.example.test/exec").expect("valid url"),
        );

        repository.save(&descriptor).await.expect("save");
        assert_eq!(repository.load().await.expect("load"), Some(descriptor));

        repository.clear().await.expect("clear");
        assert_eq!(repository.load().await.expect("load"), None);
    }

    #[tokio::test]
    async fn untagged_legacy_values_are_corrupt() {
        let (_temp, area, repository) = repository();
        area.set(REMOTE_ENDPOINT_KEY, r#""https://script.example.test/exec""#)
            .expect("seed legacy value");

        let err = repository.load().await.expect_err("untagged value rejected");
        assert!(matches!(err, RemoteSettingsError::Corrupt { .. }));
    }
}
