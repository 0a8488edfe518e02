//! Shared request execution and HTTP failure mapping for remote adapters.
//!
//! Every transport, status, and decoding failure maps to
//! [`RecordBackendError::Unavailable`] so the coordinator can fall back.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::ports::RecordBackendError;

/// Send `request` and return the body of a successful response.
pub(super) async fn execute(request: RequestBuilder) -> Result<Vec<u8>, RecordBackendError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

/// Decode a JSON body.
pub(super) fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, RecordBackendError> {
    serde_json::from_slice(body).map_err(|error| {
        RecordBackendError::unavailable(format!(
            "undecodable response ({error}): {}",
            body_preview(body)
        ))
    })
}

pub(super) fn map_transport_error(error: reqwest::Error) -> RecordBackendError {
    if error.is_timeout() {
        RecordBackendError::unavailable(format!("request timed out: {error}"))
    } else {
        RecordBackendError::unavailable(format!("transport failed: {error}"))
    }
}

pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> RecordBackendError {
    let preview = body_preview(body);
    let kind = match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => "rejected credentials",
        StatusCode::NOT_FOUND => "unknown endpoint",
        StatusCode::TOO_MANY_REQUESTS => "rate limited",
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => "timed out",
        _ if status.is_client_error() => "rejected request",
        _ => "server error",
    };
    let message = if preview.is_empty() {
        format!("{kind} (status {})", status.as_u16())
    } else {
        format!("{kind} (status {}): {preview}", status.as_u16())
    };
    RecordBackendError::unavailable(message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
