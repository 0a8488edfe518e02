//! Chooses between local and remote record backends.
//!
//! The coordinator starts in [`SyncState::LocalOnly`] and only changes state
//! through [`SyncCoordinator::connect`] and [`SyncCoordinator::disconnect`].
//! While a remote is active, an unreachable remote never changes state: the
//! call is served from local storage and a [`FallbackWarning`] is returned.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::domain::ports::{
    RecordBackend, RecordBackendError, RemoteConnector, RemoteSettingsError,
    RemoteSettingsRepository,
};
use crate::domain::{
    BackendOperation, CompanyRecord, DomainError, FallbackWarning, RecordId, RemoteDescriptor,
    StoreOutcome,
};

/// Which backend currently serves requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyncState {
    /// Only local storage is used.
    LocalOnly,
    /// The remote is authoritative, with local storage as fallback.
    RemoteActive,
}

/// Tunables for [`SyncCoordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorOptions {
    /// Apply successful remote writes to local storage as well.
    pub mirror_to_local: bool,
}

impl Default for CoordinatorOptions {
    fn default() -> Self {
        Self {
            mirror_to_local: true,
        }
    }
}

struct ActiveRemote {
    descriptor: RemoteDescriptor,
    backend: Arc<dyn RecordBackend>,
}

pub(crate) fn map_backend_error(error: RecordBackendError) -> DomainError {
    match error {
        RecordBackendError::Unavailable { message } => DomainError::remote_unavailable(message),
        RecordBackendError::Misconfigured { message } => DomainError::remote_misconfigured(message),
        RecordBackendError::NotFound { id } => DomainError::not_found(format!("record {id} not found")),
        RecordBackendError::StorageExhausted { message } => DomainError::storage_exhausted(message),
        RecordBackendError::Corrupt { message } => {
            DomainError::internal(format!("stored records are corrupt: {message}"))
        }
    }
}

fn map_settings_error(error: RemoteSettingsError) -> DomainError {
    match error {
        RemoteSettingsError::Storage { message } => DomainError::storage_exhausted(format!(
            "remote settings could not be saved: {message}"
        )),
        RemoteSettingsError::Corrupt { message } => {
            DomainError::internal(format!("remote settings are corrupt: {message}"))
        }
    }
}

fn poisoned() -> DomainError {
    DomainError::internal("sync coordinator state poisoned")
}

/// Routes record operations to the active backend.
pub struct SyncCoordinator {
    local: Arc<dyn RecordBackend>,
    settings: Arc<dyn RemoteSettingsRepository>,
    connector: Arc<dyn RemoteConnector>,
    options: CoordinatorOptions,
    remote: RwLock<Option<ActiveRemote>>,
}

impl SyncCoordinator {
    /// Create a coordinator in [`SyncState::LocalOnly`].
    pub fn new(
        local: Arc<dyn RecordBackend>,
        settings: Arc<dyn RemoteSettingsRepository>,
        connector: Arc<dyn RemoteConnector>,
        options: CoordinatorOptions,
    ) -> Self {
        Self {
            local,
            settings,
            connector,
            options,
            remote: RwLock::new(None),
        }
    }

    /// Reactivate the remote remembered from a previous session.
    ///
    /// No network call is made. A missing, unreadable, or unusable descriptor
    /// leaves the coordinator in [`SyncState::LocalOnly`].
    pub async fn restore(&self) -> Result<SyncState, DomainError> {
        let descriptor = match self.settings.load().await {
            Ok(Some(descriptor)) => descriptor,
            Ok(None) => return self.sync_state(),
            Err(error) => {
                warn!(%error, "ignoring unreadable remote settings");
                return self.sync_state();
            }
        };

        if let Err(error) = descriptor.validate() {
            warn!(%error, "ignoring invalid stored remote descriptor");
            return self.sync_state();
        }

        match self.connector.connect(&descriptor) {
            Ok(backend) if backend.is_configured() => {
                info!(
                    protocol = descriptor.protocol().as_str(),
                    "restored remote backend"
                );
                self.activate(descriptor, backend)?;
            }
            Ok(_) => warn!(
                protocol = descriptor.protocol().as_str(),
                "stored remote backend is not configured"
            ),
            Err(error) => warn!(%error, "stored remote backend could not be built"),
        }
        self.sync_state()
    }

    /// Switch to a new remote after checking it answers a full read.
    ///
    /// On failure the previous state is kept and the error returned.
    pub async fn connect(&self, descriptor: RemoteDescriptor) -> Result<SyncState, DomainError> {
        descriptor
            .validate()
            .map_err(|err| DomainError::remote_misconfigured(err.to_string()))?;

        let backend = self
            .connector
            .connect(&descriptor)
            .map_err(map_backend_error)?;
        if !backend.is_configured() {
            return Err(DomainError::remote_misconfigured(
                "remote backend is missing required settings",
            ));
        }

        let records = backend.get_all().await.map_err(map_backend_error)?;
        debug!(
            protocol = descriptor.protocol().as_str(),
            records = records.len(),
            "remote backend reachable"
        );

        self.settings
            .save(&descriptor)
            .await
            .map_err(map_settings_error)?;

        if let Err(error) = backend.initialize().await {
            warn!(%error, "remote initialisation failed; continuing");
        }

        info!(
            protocol = descriptor.protocol().as_str(),
            "remote backend connected"
        );
        self.activate(descriptor, backend)?;
        self.sync_state()
    }

    /// Forget the remote and return to local-only operation.
    pub async fn disconnect(&self) -> Result<SyncState, DomainError> {
        self.settings.clear().await.map_err(map_settings_error)?;
        let previous = self.remote.write().map_err(|_| poisoned())?.take();
        if let Some(active) = previous {
            info!(
                protocol = active.descriptor.protocol().as_str(),
                "remote backend disconnected"
            );
        }
        Ok(SyncState::LocalOnly)
    }

    /// Current state.
    pub fn sync_state(&self) -> Result<SyncState, DomainError> {
        let guard = self.remote.read().map_err(|_| poisoned())?;
        Ok(if guard.is_some() {
            SyncState::RemoteActive
        } else {
            SyncState::LocalOnly
        })
    }

    /// Descriptor of the active remote, if any.
    pub fn active_descriptor(&self) -> Result<Option<RemoteDescriptor>, DomainError> {
        let guard = self.remote.read().map_err(|_| poisoned())?;
        Ok(guard.as_ref().map(|active| active.descriptor.clone()))
    }

    /// Read every record from the active backend.
    pub async fn get_all(&self) -> Result<StoreOutcome<Vec<CompanyRecord>>, DomainError> {
        let Some(remote) = self.active_backend()? else {
            return self.local_get_all().await.map(StoreOutcome::new);
        };

        match remote.get_all().await {
            Ok(records) => Ok(StoreOutcome::new(records)),
            Err(error) if error.is_fallback_eligible() => {
                let warning = fallback_warning(BackendOperation::GetAll, &error);
                let records = self.local_get_all().await?;
                Ok(StoreOutcome::with_warning(records, warning))
            }
            Err(error) => Err(map_backend_error(error)),
        }
    }

    /// Persist a new record.
    pub async fn add(&self, record: &CompanyRecord) -> Result<StoreOutcome<()>, DomainError> {
        let Some(remote) = self.active_backend()? else {
            self.local.add(record).await.map_err(map_backend_error)?;
            return Ok(StoreOutcome::new(()));
        };

        match remote.add(record).await {
            Ok(()) => {
                if self.options.mirror_to_local {
                    log_mirror_failure(BackendOperation::Add, self.local_upsert(record).await);
                }
                Ok(StoreOutcome::new(()))
            }
            Err(error) if error.is_fallback_eligible() => {
                let warning = fallback_warning(BackendOperation::Add, &error);
                self.local_upsert(record).await.map_err(map_backend_error)?;
                Ok(StoreOutcome::with_warning((), warning))
            }
            Err(error) => Err(map_backend_error(error)),
        }
    }

    /// Replace an existing record.
    pub async fn update(&self, record: &CompanyRecord) -> Result<StoreOutcome<()>, DomainError> {
        let Some(remote) = self.active_backend()? else {
            self.local.update(record).await.map_err(map_backend_error)?;
            return Ok(StoreOutcome::new(()));
        };

        match remote.update(record).await {
            Ok(()) => {
                if self.options.mirror_to_local {
                    log_mirror_failure(BackendOperation::Update, self.local_upsert(record).await);
                }
                Ok(StoreOutcome::new(()))
            }
            Err(error) if error.is_fallback_eligible() => {
                let warning = fallback_warning(BackendOperation::Update, &error);
                self.local_upsert(record).await.map_err(map_backend_error)?;
                Ok(StoreOutcome::with_warning((), warning))
            }
            Err(error) => Err(map_backend_error(error)),
        }
    }

    /// Remove a record. Removing an unknown id succeeds.
    pub async fn delete(&self, id: &RecordId) -> Result<StoreOutcome<()>, DomainError> {
        let Some(remote) = self.active_backend()? else {
            self.local_delete(id).await.map_err(map_backend_error)?;
            return Ok(StoreOutcome::new(()));
        };

        match remote.delete(id).await {
            Ok(()) | Err(RecordBackendError::NotFound { .. }) => {
                if self.options.mirror_to_local {
                    log_mirror_failure(BackendOperation::Delete, self.local_delete(id).await);
                }
                Ok(StoreOutcome::new(()))
            }
            Err(error) if error.is_fallback_eligible() => {
                let warning = fallback_warning(BackendOperation::Delete, &error);
                self.local_delete(id).await.map_err(map_backend_error)?;
                Ok(StoreOutcome::with_warning((), warning))
            }
            Err(error) => Err(map_backend_error(error)),
        }
    }

    fn activate(
        &self,
        descriptor: RemoteDescriptor,
        backend: Arc<dyn RecordBackend>,
    ) -> Result<(), DomainError> {
        let mut guard = self.remote.write().map_err(|_| poisoned())?;
        *guard = Some(ActiveRemote {
            descriptor,
            backend,
        });
        Ok(())
    }

    fn active_backend(&self) -> Result<Option<Arc<dyn RecordBackend>>, DomainError> {
        let guard = self.remote.read().map_err(|_| poisoned())?;
        Ok(guard.as_ref().map(|active| Arc::clone(&active.backend)))
    }

    async fn local_get_all(&self) -> Result<Vec<CompanyRecord>, DomainError> {
        self.local.get_all().await.map_err(map_backend_error)
    }

    async fn local_upsert(&self, record: &CompanyRecord) -> Result<(), RecordBackendError> {
        match self.local.update(record).await {
            Err(RecordBackendError::NotFound { .. }) => self.local.add(record).await,
            other => other,
        }
    }

    async fn local_delete(&self, id: &RecordId) -> Result<(), RecordBackendError> {
        match self.local.delete(id).await {
            Err(RecordBackendError::NotFound { .. }) => Ok(()),
            other => other,
        }
    }
}

fn log_mirror_failure(operation: BackendOperation, result: Result<(), RecordBackendError>) {
    if let Err(error) = result {
        warn!(operation = operation.as_str(), %error, "local mirror write failed");
    }
}

fn fallback_warning(operation: BackendOperation, error: &RecordBackendError) -> FallbackWarning {
    warn!(
        operation = operation.as_str(),
        %error,
        "remote backend unavailable; falling back to local storage"
    );
    FallbackWarning {
        operation,
        message: error.to_string(),
    }
}

#[cfg(test)]
#[path = "sync_coordinator_tests.rs"]
mod tests;
