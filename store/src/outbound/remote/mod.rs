//! Remote record backends reached over HTTP.

mod connector;
mod dto;
mod http_errors;
mod sheets_api;
mod webhook;

pub use connector::HttpRemoteConnector;
pub use sheets_api::{DEFAULT_SHEET_RANGE, DEFAULT_SHEETS_BASE_URL, SheetsApiBackend};
pub use webhook::WebhookBackend;
