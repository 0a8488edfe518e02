//! Driven port for persisting the active remote descriptor.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::RemoteDescriptor;

define_port_error! {
    /// Errors surfaced while reading or writing remote settings.
    pub enum RemoteSettingsError {
        /// The settings could not be written or removed.
        Storage { message: String } =>
            "remote settings storage failed: {message}",
        /// The stored descriptor could not be decoded.
        Corrupt { message: String } =>
            "stored remote settings are corrupt: {message}",
    }
}

/// Port for remembering which remote backend is active between sessions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteSettingsRepository: Send + Sync {
    /// Load the persisted descriptor, if any.
    async fn load(&self) -> Result<Option<RemoteDescriptor>, RemoteSettingsError>;

    /// Persist the descriptor, replacing any previous one.
    async fn save(&self, descriptor: &RemoteDescriptor) -> Result<(), RemoteSettingsError>;

    /// Forget the persisted descriptor.
    async fn clear(&self) -> Result<(), RemoteSettingsError>;
}
