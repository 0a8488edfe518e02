//! Script endpoint backend exchanging JSON actions.
//!
//! Reads use `GET ?action=getRecords`; every write is a `POST` carrying an
//! action name and answered with a `{success, error?}` acknowledgement.
//! Records that do not decode are skipped with a warning.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::dto::{
    WebhookAckDto, WebhookAction, WebhookRecordsDto, WebhookRequestDto, record_from_value,
};
use super::http_errors::{decode_json, execute};
use crate::domain::ports::{RecordBackend, RecordBackendError};
use crate::domain::record::format_timestamp;
use crate::domain::{CompanyRecord, RecordId};

/// Record backend speaking the script endpoint protocol.
pub struct WebhookBackend {
    client: Client,
    url: Url,
    clock: Arc<dyn Clock>,
}

impl WebhookBackend {
    /// Create a backend posting to `url`.
    pub fn new(client: Client, url: Url, clock: Arc<dyn Clock>) -> Self {
        Self { client, url, clock }
    }

    async fn post(
        &self,
        action: WebhookAction,
        record: Option<&CompanyRecord>,
        id: Option<&RecordId>,
    ) -> Result<(), RecordBackendError> {
        let request = WebhookRequestDto {
            action,
            record,
            id,
            timestamp: format_timestamp(&self.clock.utc()),
        };
        let body = execute(self.client.post(self.url.clone()).json(&request)).await?;
        let ack: WebhookAckDto = decode_json(&body)?;
        if !ack.success {
            return Err(RecordBackendError::unavailable(ack.error.unwrap_or_else(
                || "script reported failure without a message".to_owned(),
            )));
        }
        debug!(?action, "script action acknowledged");
        Ok(())
    }
}

#[async_trait]
impl RecordBackend for WebhookBackend {
    fn is_configured(&self) -> bool {
        true
    }

    async fn get_all(&self) -> Result<Vec<CompanyRecord>, RecordBackendError> {
        let mut url = self.url.clone();
        url.query_pairs_mut().append_pair("action", "getRecords");
        let body = execute(self.client.get(url)).await?;
        let payload: WebhookRecordsDto = decode_json(&body)?;
        if payload.success == Some(false) {
            return Err(RecordBackendError::unavailable(payload.error.unwrap_or_else(
                || "script reported failure without a message".to_owned(),
            )));
        }
        let fetched = payload.records.len();
        let records: Vec<CompanyRecord> = payload
            .records
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match record_from_value(value) {
                Ok(record) => Some(record),
                Err(reason) => {
                    warn!(index, %reason, "skipping unreadable script record");
                    None
                }
            })
            .collect();
        debug!(fetched, kept = records.len(), "script records fetched");
        Ok(records)
    }

    async fn add(&self, record: &CompanyRecord) -> Result<(), RecordBackendError> {
        self.post(WebhookAction::AddRecord, Some(record), None).await
    }

    async fn update(&self, record: &CompanyRecord) -> Result<(), RecordBackendError> {
        self.post(WebhookAction::UpdateRecord, Some(record), None)
            .await
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RecordBackendError> {
        self.post(WebhookAction::DeleteRecord, None, Some(id)).await
    }

    async fn initialize(&self) -> Result<(), RecordBackendError> {
        self.post(WebhookAction::Initialize, None, None).await
    }
}
