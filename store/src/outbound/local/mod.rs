//! Local persistence adapters.

mod atomic_io;
mod record_backend;
mod settings_repository;
mod storage_area;

pub use record_backend::{HISTORY_KEY, LocalRecordBackend};
pub use settings_repository::{LocalRemoteSettingsRepository, REMOTE_ENDPOINT_KEY};
pub use storage_area::{LocalStorageArea, StorageAreaError};
