//! Wires adapters, coordinator, and store from [`StoreSettings`].

use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;
use mockable::Clock;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::config::StoreSettings;
use crate::domain::ports::{RecordBackend, RemoteConnector, RemoteSettingsRepository};
use crate::domain::{
    CoordinatorOptions, DomainError, RecordStore, StoreOutcome, SyncCoordinator,
};
use crate::outbound::local::{
    LocalRecordBackend, LocalRemoteSettingsRepository, LocalStorageArea, StorageAreaError,
};
use crate::outbound::remote::HttpRemoteConnector;

/// Failures while assembling a [`RecordStore`].
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The data directory path is not valid UTF-8.
    #[error("data directory {path:?} is not valid UTF-8")]
    NonUtf8DataDir {
        /// Offending path.
        path: PathBuf,
    },
    /// The local storage area could not be opened.
    #[error(transparent)]
    Storage(#[from] StorageAreaError),
    /// The spreadsheet API base URL does not parse.
    #[error("invalid sheets base url {url:?}: {source}")]
    InvalidSheetsUrl {
        /// Configured value.
        url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
    /// The HTTP client could not be built.
    #[error("failed to build http client: {0}")]
    HttpClient(#[from] reqwest::Error),
    /// The initial load failed.
    #[error("initial record load failed: {0}")]
    Load(#[from] DomainError),
}

/// Open the store described by `settings`.
///
/// Restores the remote remembered from a previous session, then loads the
/// record list from the active backend.
///
/// ```rust,ignore
/// use std::sync::Arc;
///
/// use credential_store::bootstrap::open_store;
/// use credential_store::config::StoreSettings;
/// use mockable::DefaultClock;
///
/// let settings = StoreSettings::load()?;
/// let store = open_store(&settings, Arc::new(DefaultClock)).await?.value;
/// println!("{} records", store.list()?.len());
/// ```
pub async fn open_store(
    settings: &StoreSettings,
    clock: Arc<dyn Clock>,
) -> Result<StoreOutcome<RecordStore>, BootstrapError> {
    let data_dir = settings.data_dir();
    let data_dir = Utf8PathBuf::from_path_buf(data_dir)
        .map_err(|path| BootstrapError::NonUtf8DataDir { path })?;
    let area = Arc::new(LocalStorageArea::open(&data_dir)?);

    let sheets_base_url =
        Url::parse(settings.sheets_base_url()).map_err(|source| BootstrapError::InvalidSheetsUrl {
            url: settings.sheets_base_url().to_owned(),
            source,
        })?;
    let connector: Arc<dyn RemoteConnector> = Arc::new(HttpRemoteConnector::new(
        settings.http_timeout(),
        sheets_base_url,
        settings.sheet_range(),
        Arc::clone(&clock),
    )?);

    let local: Arc<dyn RecordBackend> = Arc::new(LocalRecordBackend::new(Arc::clone(&area)));
    let remote_settings: Arc<dyn RemoteSettingsRepository> =
        Arc::new(LocalRemoteSettingsRepository::new(area));
    let coordinator = Arc::new(SyncCoordinator::new(
        local,
        remote_settings,
        connector,
        CoordinatorOptions {
            mirror_to_local: settings.mirror_to_local(),
        },
    ));

    let state = coordinator.restore().await?;
    info!(data_dir = %data_dir, ?state, "credential store opened");
    Ok(RecordStore::load(coordinator, clock).await?)
}
