//! Store configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::remote::{DEFAULT_SHEET_RANGE, DEFAULT_SHEETS_BASE_URL};

const DEFAULT_DATA_DIR: &str = ".credential-store";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Settings controlling where records live and how remotes are reached.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CREDENTIAL_STORE")]
pub struct StoreSettings {
    /// Directory holding the local storage area.
    pub data_dir: Option<PathBuf>,
    /// Timeout applied to every remote request, in seconds.
    pub http_timeout_secs: Option<u64>,
    /// Base URL of the spreadsheet values API.
    pub sheets_base_url: Option<String>,
    /// A1 range holding the record table.
    pub sheet_range: Option<String>,
    /// Copy successful remote writes into local storage.
    pub mirror_to_local: Option<bool>,
}

impl StoreSettings {
    /// Return the configured data directory, falling back to the default.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Return the remote request timeout, falling back to 30 seconds.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(
            self.http_timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        )
    }

    /// Return the spreadsheet API base URL, falling back to the public endpoint.
    pub fn sheets_base_url(&self) -> &str {
        self.sheets_base_url
            .as_deref()
            .unwrap_or(DEFAULT_SHEETS_BASE_URL)
    }

    /// Return the record table range, falling back to `Sheet1!A:F`.
    pub fn sheet_range(&self) -> &str {
        self.sheet_range.as_deref().unwrap_or(DEFAULT_SHEET_RANGE)
    }

    /// Return whether remote writes are mirrored locally, defaulting to `true`.
    pub fn mirror_to_local(&self) -> bool {
        self.mirror_to_local.unwrap_or(true)
    }
}
