//! Driven port that turns a descriptor into a live remote backend.

use std::sync::Arc;

use super::{RecordBackend, RecordBackendError};
use crate::domain::RemoteDescriptor;

/// Factory for remote record backends.
///
/// Construction performs no network traffic; reachability is checked by the
/// caller.
#[cfg_attr(test, mockall::automock)]
pub trait RemoteConnector: Send + Sync {
    /// Build the backend selected by `descriptor`.
    fn connect(
        &self,
        descriptor: &RemoteDescriptor,
    ) -> Result<Arc<dyn RecordBackend>, RecordBackendError>;
}
