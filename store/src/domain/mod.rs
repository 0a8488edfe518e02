//! Domain primitives and services.
//!
//! Public surface:
//! - DomainError / ErrorCode: transport-agnostic failure payload.
//! - CompanyRecord / RecordId: persisted record shape.
//! - RemoteDescriptor: tagged remote endpoint configuration.
//! - SyncCoordinator: picks the active backend and absorbs remote outages.
//! - RecordStore: record list with credential derivation and de-duplication.

pub mod error;
pub mod outcome;
pub mod ports;
pub mod record;
pub mod record_store;
pub mod remote_descriptor;
pub mod sync_coordinator;

pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::outcome::{BackendOperation, FallbackWarning, StoreOutcome};
pub use self::record::{CompanyRecord, RecordId, RecordValidationError};
pub use self::record_store::RecordStore;
pub use self::remote_descriptor::{RemoteDescriptor, RemoteDescriptorError, RemoteProtocol};
pub use self::sync_coordinator::{CoordinatorOptions, SyncCoordinator, SyncState};
