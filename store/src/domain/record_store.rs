//! In-memory view of company records backed by the sync coordinator.
//!
//! The store owns the canonical record list and hands out clones. Every
//! mutation goes through the [`SyncCoordinator`] and is followed by a full
//! reload from whichever backend is active.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use credential_codec::{UserModel, derive_credentials};
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::record::sort_newest_first;
use crate::domain::{
    CompanyRecord, DomainError, RecordId, RemoteDescriptor, StoreOutcome, SyncCoordinator,
    SyncState,
};

fn poisoned() -> DomainError {
    DomainError::internal("record cache poisoned")
}

/// Record list with credential derivation and name de-duplication.
pub struct RecordStore {
    coordinator: Arc<SyncCoordinator>,
    clock: Arc<dyn Clock>,
    records: RwLock<Vec<CompanyRecord>>,
}

impl RecordStore {
    /// Build the store and load the current record list.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// use credential_codec::UserModel;
    /// use credential_store::domain::RecordStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = RecordStore::load(coordinator, Arc::new(DefaultClock)).await?;
    /// let created = store.create("Acme Corp", UserModel::Standard).await?;
    /// assert_eq!(created.value.username, "ACME.CORP");
    /// ```
    pub async fn load(
        coordinator: Arc<SyncCoordinator>,
        clock: Arc<dyn Clock>,
    ) -> Result<StoreOutcome<Self>, DomainError> {
        let store = Self {
            coordinator,
            clock,
            records: RwLock::new(Vec::new()),
        };
        let loaded = store.reload().await?;
        Ok(loaded.map(|_| store))
    }

    /// Records, newest first.
    pub fn list(&self) -> Result<Vec<CompanyRecord>, DomainError> {
        Ok(self.records.read().map_err(|_| poisoned())?.clone())
    }

    /// Record whose name matches case-insensitively after trimming.
    pub fn find_by_name(&self, name: &str) -> Result<Option<CompanyRecord>, DomainError> {
        let guard = self.records.read().map_err(|_| poisoned())?;
        Ok(guard.iter().find(|record| record.matches_name(name)).cloned())
    }

    /// Records whose name contains `term`, in list order.
    pub fn search(&self, term: &str) -> Result<Vec<CompanyRecord>, DomainError> {
        let guard = self.records.read().map_err(|_| poisoned())?;
        Ok(guard
            .iter()
            .filter(|record| record.name_contains(term))
            .cloned()
            .collect())
    }

    /// Record with the given id.
    pub fn get(&self, id: &RecordId) -> Result<Option<CompanyRecord>, DomainError> {
        let guard = self.records.read().map_err(|_| poisoned())?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    /// Replace the cached list with the active backend's contents.
    pub async fn reload(&self) -> Result<StoreOutcome<Vec<CompanyRecord>>, DomainError> {
        let mut outcome = self.coordinator.get_all().await?;
        sort_newest_first(&mut outcome.value);
        debug!(records = outcome.value.len(), "record list reloaded");
        let mut guard = self.records.write().map_err(|_| poisoned())?;
        guard.clone_from(&outcome.value);
        Ok(outcome)
    }

    /// Clock reading at the millisecond precision records are stored with.
    fn now(&self) -> DateTime<Utc> {
        let now = self.clock.utc();
        now.duration_trunc(TimeDelta::milliseconds(1)).unwrap_or(now)
    }

    /// Create credentials for a company, reusing an existing record by name.
    ///
    /// The name is trimmed before lookup and storage. When a record with the
    /// same name exists it is returned unchanged and no backend call is made.
    pub async fn create(
        &self,
        company_name: &str,
        model: UserModel,
    ) -> Result<StoreOutcome<CompanyRecord>, DomainError> {
        let name = company_name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("company name must not be empty"));
        }

        if let Some(existing) = self.find_by_name(name)? {
            debug!(id = %existing.id, "company already has credentials");
            return Ok(StoreOutcome::new(existing));
        }

        let record = CompanyRecord::new(
            RecordId::random(),
            name,
            derive_credentials(name, model),
            model,
            self.now(),
        );
        let written = self.coordinator.add(&record).await?;
        info!(id = %record.id, "company record created");

        let reloaded = self.reload().await?;
        Ok(written.map(|()| record).absorb(reloaded))
    }

    /// Overwrite name and credentials of an existing record.
    ///
    /// `id`, `createdAt` and `userModel` come from the stored record;
    /// `updatedAt` is stamped from the clock and never moves backwards.
    pub async fn update(
        &self,
        record: CompanyRecord,
    ) -> Result<StoreOutcome<CompanyRecord>, DomainError> {
        let name = record.company_name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("company name must not be empty"));
        }

        let mut warnings = Vec::new();
        let stored = match self.get(&record.id)? {
            Some(stored) => stored,
            None => {
                warnings.extend(self.reload().await?.warnings);
                self.get(&record.id)?.ok_or_else(|| {
                    DomainError::not_found(format!("record {} not found", record.id))
                })?
            }
        };

        let previous = stored.updated_at.unwrap_or(stored.created_at);
        let stamp = self.now().max(previous).max(stored.created_at);
        let merged = CompanyRecord {
            id: stored.id,
            company_name: name.to_owned(),
            username: record.username,
            password: record.password,
            created_at: stored.created_at,
            updated_at: Some(stamp),
            user_model: stored.user_model,
        };

        let written = self.coordinator.update(&merged).await?;
        info!(id = %merged.id, "company record updated");

        let reloaded = self.reload().await?;
        let mut outcome = written.map(|()| merged).absorb(reloaded);
        warnings.append(&mut outcome.warnings);
        outcome.warnings = warnings;
        Ok(outcome)
    }

    /// Remove a record; unknown ids succeed without effect.
    pub async fn delete(&self, id: &RecordId) -> Result<StoreOutcome<()>, DomainError> {
        let written = self.coordinator.delete(id).await?;
        info!(%id, "company record deleted");
        let reloaded = self.reload().await?;
        Ok(written.absorb(reloaded))
    }

    /// Connect a remote backend and reload from it.
    pub async fn connect(
        &self,
        descriptor: RemoteDescriptor,
    ) -> Result<StoreOutcome<SyncState>, DomainError> {
        let state = self.coordinator.connect(descriptor).await?;
        let reloaded = self.reload().await?;
        Ok(StoreOutcome::new(state).absorb(reloaded))
    }

    /// Disconnect the remote backend and reload from local storage.
    pub async fn disconnect(&self) -> Result<StoreOutcome<SyncState>, DomainError> {
        let state = self.coordinator.disconnect().await?;
        let reloaded = self.reload().await?;
        Ok(StoreOutcome::new(state).absorb(reloaded))
    }

    /// Current backend state.
    pub fn sync_state(&self) -> Result<SyncState, DomainError> {
        self.coordinator.sync_state()
    }
}

#[cfg(test)]
#[path = "record_store_tests.rs"]
mod tests;
