//! Driven port for reading and writing company records.
//!
//! Local storage and both remote protocols implement this trait, so the
//! coordinator can swap them without knowing where records live.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{CompanyRecord, RecordId};

define_port_error! {
    /// Errors surfaced by record backends.
    pub enum RecordBackendError {
        /// The backend could not be reached or rejected the call.
        Unavailable { message: String } =>
            "record backend unavailable: {message}",
        /// The backend lacks the configuration it needs.
        Misconfigured { message: String } =>
            "record backend misconfigured: {message}",
        /// No record carries the requested id.
        NotFound { id: String } =>
            "record {id} not found",
        /// Local persistence refused the write.
        StorageExhausted { message: String } =>
            "record storage exhausted: {message}",
        /// Stored data could not be decoded.
        Corrupt { message: String } =>
            "stored records are corrupt: {message}",
    }
}

impl RecordBackendError {
    /// Return whether the coordinator should fall back to local storage.
    pub fn is_fallback_eligible(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

/// Capability set shared by every record backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordBackend: Send + Sync {
    /// Whether the backend has everything it needs to serve requests.
    fn is_configured(&self) -> bool;

    /// Fetch every stored record in backend order.
    async fn get_all(&self) -> Result<Vec<CompanyRecord>, RecordBackendError>;

    /// Persist a new record.
    async fn add(&self, record: &CompanyRecord) -> Result<(), RecordBackendError>;

    /// Replace the stored record carrying the same id.
    ///
    /// Returns [`RecordBackendError::NotFound`] when no such record exists.
    async fn update(&self, record: &CompanyRecord) -> Result<(), RecordBackendError>;

    /// Remove the record with the given id.
    async fn delete(&self, id: &RecordId) -> Result<(), RecordBackendError>;

    /// Prepare the backend for first use.
    async fn initialize(&self) -> Result<(), RecordBackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RecordBackendError::unavailable("503"), true)]
    #[case(RecordBackendError::misconfigured("missing key"), false)]
    #[case(RecordBackendError::not_found("42"), false)]
    #[case(RecordBackendError::storage_exhausted("disk full"), false)]
    #[case(RecordBackendError::corrupt("bad json"), false)]
    fn only_unavailable_triggers_fallback(
        #[case] error: RecordBackendError,
        #[case] expected: bool,
    ) {
        assert_eq!(error.is_fallback_eligible(), expected);
    }
}
