//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod record_backend;
mod remote_connector;
mod remote_settings_repository;

#[cfg(test)]
pub use record_backend::MockRecordBackend;
pub use record_backend::{RecordBackend, RecordBackendError};
#[cfg(test)]
pub use remote_connector::MockRemoteConnector;
pub use remote_connector::RemoteConnector;
#[cfg(test)]
pub use remote_settings_repository::MockRemoteSettingsRepository;
pub use remote_settings_repository::{RemoteSettingsError, RemoteSettingsRepository};
