//! Builds remote backends from descriptors.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use reqwest::{Client, Url};

use super::sheets_api::SheetsApiBackend;
use super::webhook::WebhookBackend;
use crate::domain::RemoteDescriptor;
use crate::domain::ports::{RecordBackend, RecordBackendError, RemoteConnector};

/// Connector sharing one HTTP client across every backend it builds.
pub struct HttpRemoteConnector {
    client: Client,
    sheets_base_url: Url,
    sheet_range: String,
    clock: Arc<dyn Clock>,
}

impl HttpRemoteConnector {
    /// Build a connector whose requests time out after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        timeout: Duration,
        sheets_base_url: Url,
        sheet_range: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            sheets_base_url,
            sheet_range: sheet_range.into(),
            clock,
        })
    }
}

impl RemoteConnector for HttpRemoteConnector {
    fn connect(
        &self,
        descriptor: &RemoteDescriptor,
    ) -> Result<Arc<dyn RecordBackend>, RecordBackendError> {
        descriptor
            .validate()
            .map_err(|err| RecordBackendError::misconfigured(err.to_string()))?;

        let backend: Arc<dyn RecordBackend> = match descriptor {
            RemoteDescriptor::DirectApi {
                spreadsheet_id,
                api_key,
            } => Arc::new(SheetsApiBackend::new(
                self.client.clone(),
                self.sheets_base_url.clone(),
                spreadsheet_id.as_str(),
                api_key.as_str(),
                self.sheet_range.as_str(),
            )),
            RemoteDescriptor::WebhookScript { url } => Arc::new(WebhookBackend::new(
                self.client.clone(),
                url.clone(),
                Arc::clone(&self.clock),
            )),
        };
        Ok(backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::DefaultClock;

    use crate::outbound::remote::{DEFAULT_SHEET_RANGE, DEFAULT_SHEETS_BASE_URL};

    fn connector() -> HttpRemoteConnector {
        HttpRemoteConnector::new(
            Duration::from_secs(5),
            Url::parse(DEFAULT_SHEETS_BASE_URL).expect("valid url"),
            DEFAULT_SHEET_RANGE,
            Arc::new(DefaultClock),
        )
        .expect("client builds")
    }

    #[test]
    fn builds_configured_backends_for_both_protocols() {
        let connector = connector();
        let sheets = connector
            .connect(&RemoteDescriptor::direct_api("sheet-1", "key-1"))
            .expect("sheets backend");
        let webhook = connector
            .connect(&RemoteDescriptor::webhook_script(
                Url::parse("https://script.example.test/exec").expect("valid url"),
            ))
            .expect("webhook backend");

        assert!(sheets.is_configured());
        assert!(webhook.is_configured());
    }

    #[test]
    fn rejects_invalid_descriptors() {
        let error = connector()
            .connect(&RemoteDescriptor::direct_api("sheet-1", " "))
            .err()
            .expect("blank key rejected");
        assert!(matches!(error, RecordBackendError::Misconfigured { .. }));
    }
}
