//! Remote endpoint descriptors.
//!
//! A descriptor names the protocol explicitly, so a persisted value can be
//! read back without guessing which backend it belongs to.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Validation failures for [`RemoteDescriptor::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteDescriptorError {
    /// The spreadsheet identifier was blank.
    #[error("spreadsheet id must not be empty")]
    EmptySpreadsheetId,
    /// The API key was blank.
    #[error("api key must not be empty")]
    EmptyApiKey,
    /// The webhook URL does not use HTTP or HTTPS.
    #[error("webhook url must use http or https, got {scheme}")]
    UnsupportedScheme {
        /// Scheme found on the supplied URL.
        scheme: String,
    },
}

/// Wire protocol spoken by a remote backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteProtocol {
    /// Spreadsheet values API addressed by id and API key.
    DirectApi,
    /// Script endpoint exchanging JSON actions.
    WebhookScript,
}

impl RemoteProtocol {
    /// Stable label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DirectApi => "direct_api",
            Self::WebhookScript => "webhook_script",
        }
    }
}

/// Connection details for a remote record backend.
///
/// Serialised with a `protocol` tag:
///
/// ```
/// use credential_store::domain::RemoteDescriptor;
///
/// let json = r#"{"protocol":"webhookScript","url":"https://script.example.test/exec"}"#;
/// let descriptor: RemoteDescriptor = serde_json::from_str(json).expect("valid descriptor");
/// assert!(descriptor.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "protocol", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RemoteDescriptor {
    /// Spreadsheet values API.
    DirectApi {
        /// Spreadsheet identifier taken from the sheet URL.
        spreadsheet_id: String,
        /// API key sent as the `key` query parameter.
        api_key: String,
    },
    /// Script endpoint.
    WebhookScript {
        /// Deployed script URL.
        url: Url,
    },
}

impl RemoteDescriptor {
    /// Build a trimmed [`RemoteDescriptor::DirectApi`].
    pub fn direct_api(spreadsheet_id: impl AsRef<str>, api_key: impl AsRef<str>) -> Self {
        Self::DirectApi {
            spreadsheet_id: spreadsheet_id.as_ref().trim().to_owned(),
            api_key: api_key.as_ref().trim().to_owned(),
        }
    }

    /// Build a [`RemoteDescriptor::WebhookScript`].
    pub fn webhook_script(url: Url) -> Self {
        Self::WebhookScript { url }
    }

    /// Protocol this descriptor selects.
    pub fn protocol(&self) -> RemoteProtocol {
        match self {
            Self::DirectApi { .. } => RemoteProtocol::DirectApi,
            Self::WebhookScript { .. } => RemoteProtocol::WebhookScript,
        }
    }

    /// Check the descriptor shape without touching the network.
    pub fn validate(&self) -> Result<(), RemoteDescriptorError> {
        match self {
            Self::DirectApi {
                spreadsheet_id,
                api_key,
            } => {
                if spreadsheet_id.trim().is_empty() {
                    return Err(RemoteDescriptorError::EmptySpreadsheetId);
                }
                if api_key.trim().is_empty() {
                    return Err(RemoteDescriptorError::EmptyApiKey);
                }
                Ok(())
            }
            Self::WebhookScript { url } => match url.scheme() {
                "http" | "https" => Ok(()),
                other => Err(RemoteDescriptorError::UnsupportedScheme {
                    scheme: other.to_owned(),
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn direct_api_serializes_with_protocol_tag() {
        let descriptor = RemoteDescriptor::direct_api(" sheet-1 ", "key-1");
        let value = serde_json::to_value(&descriptor).expect("serialize descriptor");
        assert_eq!(
            value,
            json!({
                "protocol": "directApi",
                "spreadsheetId": "sheet-1",
                "apiKey": "key-1",
            })
        );
    }

    #[test]
    fn webhook_round_trips_through_json() {
        let url = Url::parse("https://script.example.test/exec").expect("valid url");
        let descriptor = RemoteDescriptor::webhook_script(url);
        let text = serde_json::to_string(&descriptor).expect("serialize descriptor");
        let parsed: RemoteDescriptor = serde_json::from_str(&text).expect("parse descriptor");
        assert_eq!(parsed, descriptor);
        assert_eq!(parsed.protocol(), RemoteProtocol::WebhookScript);
    }

    #[rstest]
    #[case(
        RemoteDescriptor::direct_api("  ", "key"),
        RemoteDescriptorError::EmptySpreadsheetId
    )]
    #[case(RemoteDescriptor::direct_api("sheet", ""), RemoteDescriptorError::EmptyApiKey)]
    fn validate_rejects_blank_direct_api_fields(
        #[case] descriptor: RemoteDescriptor,
        #[case] expected: RemoteDescriptorError,
    ) {
        assert_eq!(descriptor.validate(), Err(expected));
    }

    #[test]
    fn validate_rejects_non_http_webhooks() {
        let url = Url::parse("ftp://files.example.test/exec").expect("valid url");
        let err = RemoteDescriptor::webhook_script(url)
            .validate()
            .expect_err("ftp is rejected");
        assert_eq!(
            err,
            RemoteDescriptorError::UnsupportedScheme {
                scheme: "ftp".to_owned()
            }
        );
    }

    #[test]
    fn unknown_protocols_fail_to_parse() {
        let result = serde_json::from_value::<RemoteDescriptor>(json!({
            "protocol": "carrierPigeon",
            "url": "https://example.test",
        }));
        assert!(result.is_err());
    }
}
