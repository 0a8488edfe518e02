//! Wire payloads for the remote protocols.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{CompanyRecord, RecordId};

/// Header row written by `initialize`.
pub(super) const SHEET_HEADER: [&str; 6] = [
    "ID",
    "Nome da Empresa",
    "Usuário",
    "Senha",
    "Data de Criação",
    "Última Alteração",
];

/// Number of columns in a record row.
pub(super) const SHEET_COLUMNS: usize = SHEET_HEADER.len();

/// `GET .../values/{range}` response.
#[derive(Debug, Deserialize)]
pub(super) struct SheetValuesDto {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl SheetValuesDto {
    /// Rows as text cells, including the header row.
    pub(super) fn into_rows(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Body for append and update writes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ValueRangeDto {
    pub range: String,
    pub major_dimension: &'static str,
    pub values: Vec<Vec<String>>,
    pub value_input_option: &'static str,
}

impl ValueRangeDto {
    pub(super) fn rows(range: String, values: Vec<Vec<String>>) -> Self {
        Self {
            range,
            major_dimension: "ROWS",
            values,
            value_input_option: "RAW",
        }
    }
}

/// `GET ?action=getRecords` response.
#[derive(Debug, Deserialize)]
pub(super) struct WebhookRecordsDto {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub records: Vec<Value>,
}

/// Decode one script record, reading a numeric `id` as text.
pub(super) fn record_from_value(mut value: Value) -> Result<CompanyRecord, serde_json::Error> {
    if let Some(id) = value.get_mut("id").filter(|id| !id.is_string()) {
        *id = Value::String(cell_text(id.take()));
    }
    serde_json::from_value(value)
}

/// Action names understood by the script endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) enum WebhookAction {
    AddRecord,
    UpdateRecord,
    DeleteRecord,
    Initialize,
}

/// `POST` body sent to the script endpoint.
#[derive(Debug, Serialize)]
pub(super) struct WebhookRequestDto<'a> {
    pub action: WebhookAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<&'a CompanyRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a RecordId>,
    pub timestamp: String,
}

/// Acknowledgement returned for every `POST`.
#[derive(Debug, Deserialize)]
pub(super) struct WebhookAckDto {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}
