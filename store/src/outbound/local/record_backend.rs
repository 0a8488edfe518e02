//! Record backend persisted as one JSON array in the local storage area.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::storage_area::{LocalStorageArea, StorageAreaError};
use crate::domain::ports::{RecordBackend, RecordBackendError};
use crate::domain::{CompanyRecord, RecordId};

/// Storage key holding the record list.
pub const HISTORY_KEY: &str = "companyHistory";

fn map_read_error(error: StorageAreaError) -> RecordBackendError {
    RecordBackendError::corrupt(error.to_string())
}

fn map_write_error(error: StorageAreaError) -> RecordBackendError {
    RecordBackendError::storage_exhausted(error.to_string())
}

/// Always-available backend over [`LocalStorageArea`].
///
/// New records are prepended. Updates and deletes rewrite the whole list.
/// Unreadable entries are skipped on read and dropped by the next write; a
/// history that is not a JSON array reads as empty.
pub struct LocalRecordBackend {
    area: Arc<LocalStorageArea>,
    write_lock: Mutex<()>,
}

impl LocalRecordBackend {
    /// Create a backend storing records in `area`.
    pub fn new(area: Arc<LocalStorageArea>) -> Self {
        Self {
            area,
            write_lock: Mutex::new(()),
        }
    }

    fn read_records(&self) -> Result<Vec<CompanyRecord>, RecordBackendError> {
        let Some(raw) = self.area.get(HISTORY_KEY).map_err(map_read_error)? else {
            return Ok(Vec::new());
        };
        let entries: Vec<Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(error) => {
                warn!(%error, "ignoring unreadable local record history");
                return Ok(Vec::new());
            }
        };
        let records = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(error) => {
                    warn!(index, %error, "skipping unreadable local record");
                    None
                }
            })
            .collect();
        Ok(records)
    }

    fn write_records(&self, records: &[CompanyRecord]) -> Result<(), RecordBackendError> {
        let raw = serde_json::to_string(records)
            .map_err(|err| RecordBackendError::storage_exhausted(err.to_string()))?;
        self.area.set(HISTORY_KEY, &raw).map_err(map_write_error)?;
        debug!(records = records.len(), "local record list written");
        Ok(())
    }
}

#[async_trait]
impl RecordBackend for LocalRecordBackend {
    fn is_configured(&self) -> bool {
        true
    }

    async fn get_all(&self) -> Result<Vec<CompanyRecord>, RecordBackendError> {
        self.read_records()
    }

    async fn add(&self, record: &CompanyRecord) -> Result<(), RecordBackendError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records()?;
        records.insert(0, record.clone());
        self.write_records(&records)
    }

    async fn update(&self, record: &CompanyRecord) -> Result<(), RecordBackendError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records()?;
        let slot = records
            .iter_mut()
            .find(|stored| stored.id == record.id)
            .ok_or_else(|| RecordBackendError::not_found(record.id.to_string()))?;
        *slot = record.clone();
        self.write_records(&records)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RecordBackendError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|stored| &stored.id != id);
        if records.len() == before {
            return Ok(());
        }
        self.write_records(&records)
    }

    async fn initialize(&self) -> Result<(), RecordBackendError> {
        Ok(())
    }
}
