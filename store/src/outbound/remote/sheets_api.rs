//! Spreadsheet values API backend.
//!
//! Records live one per row under a header row, in the column order of
//! [`SHEET_HEADER`]. Deleted rows are blanked rather than removed, so row
//! positions are always counted over the raw rows.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::dto::{SHEET_COLUMNS, SHEET_HEADER, SheetValuesDto, ValueRangeDto};
use super::http_errors::{decode_json, execute};
use crate::domain::ports::{RecordBackend, RecordBackendError};
use crate::domain::record::{format_timestamp, parse_timestamp};
use crate::domain::{CompanyRecord, RecordId};

/// Default endpoint of the spreadsheet values API.
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Default A1 range holding the record table.
pub const DEFAULT_SHEET_RANGE: &str = "Sheet1!A:F";

/// Record backend speaking the spreadsheet values API.
pub struct SheetsApiBackend {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    api_key: String,
    range: String,
    sheet: String,
}

impl SheetsApiBackend {
    /// Create a backend for one spreadsheet.
    ///
    /// `range` is an A1 range such as `Sheet1!A:F`; the part before `!` names
    /// the sheet used for single-row writes.
    pub fn new(
        client: Client,
        base_url: Url,
        spreadsheet_id: impl Into<String>,
        api_key: impl Into<String>,
        range: impl Into<String>,
    ) -> Self {
        let range = range.into();
        let sheet = range
            .split_once('!')
            .map_or("Sheet1", |(sheet, _)| sheet)
            .to_owned();
        Self {
            client,
            base_url,
            spreadsheet_id: spreadsheet_id.into(),
            api_key: api_key.into(),
            range,
            sheet,
        }
    }

    fn values_url(&self, range: &str, suffix: &str) -> Result<Url, RecordBackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RecordBackendError::misconfigured(format!(
                    "base url {} cannot hold a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&format!("{range}{suffix}"));
        url.query_pairs_mut().append_pair("key", &self.api_key);
        Ok(url)
    }

    fn row_range(&self, row: usize) -> String {
        format!("{}!A{row}:F{row}", self.sheet)
    }

    async fn read_rows(&self) -> Result<Vec<Vec<String>>, RecordBackendError> {
        let url = self.values_url(&self.range, "")?;
        let body = execute(self.client.get(url)).await?;
        let rows = decode_json::<SheetValuesDto>(&body)?.into_rows();
        debug!(rows = rows.len(), "sheet rows fetched");
        Ok(rows)
    }

    /// 1-based sheet row holding `id`, skipping the header.
    async fn locate(&self, id: &RecordId) -> Result<usize, RecordBackendError> {
        let rows = self.read_rows().await?;
        rows.iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.first().is_some_and(|cell| cell.trim() == id.as_ref()))
            .map(|(index, _)| index + 1)
            .ok_or_else(|| RecordBackendError::not_found(id.to_string()))
    }

    async fn write_range(
        &self,
        range: String,
        values: Vec<Vec<String>>,
    ) -> Result<(), RecordBackendError> {
        let mut url = self.values_url(&range, "")?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = ValueRangeDto::rows(range, values);
        execute(self.client.put(url).json(&body)).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordBackend for SheetsApiBackend {
    fn is_configured(&self) -> bool {
        !self.spreadsheet_id.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    async fn get_all(&self) -> Result<Vec<CompanyRecord>, RecordBackendError> {
        let rows = self.read_rows().await?;
        let records = rows
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(index, row)| match row_to_record(row) {
                Ok(record) => record,
                Err(reason) => {
                    warn!(row = index + 1, %reason, "skipping unreadable sheet row");
                    None
                }
            })
            .collect();
        Ok(records)
    }

    async fn add(&self, record: &CompanyRecord) -> Result<(), RecordBackendError> {
        let mut url = self.values_url(&self.range, ":append")?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = ValueRangeDto::rows(self.range.clone(), vec![record_to_row(record)]);
        execute(self.client.post(url).json(&body)).await?;
        debug!(id = %record.id, "sheet row appended");
        Ok(())
    }

    async fn update(&self, record: &CompanyRecord) -> Result<(), RecordBackendError> {
        let row = self.locate(&record.id).await?;
        self.write_range(self.row_range(row), vec![record_to_row(record)])
            .await?;
        debug!(id = %record.id, row, "sheet row updated");
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> Result<(), RecordBackendError> {
        let row = self.locate(id).await?;
        self.write_range(self.row_range(row), vec![vec![String::new(); SHEET_COLUMNS]])
            .await?;
        debug!(%id, row, "sheet row blanked");
        Ok(())
    }

    async fn initialize(&self) -> Result<(), RecordBackendError> {
        let header = SHEET_HEADER.iter().map(|&cell| cell.to_owned()).collect();
        self.write_range(format!("{}!A1:F1", self.sheet), vec![header])
            .await
    }
}

fn record_to_row(record: &CompanyRecord) -> Vec<String> {
    vec![
        record.id.to_string(),
        record.company_name.clone(),
        record.username.clone(),
        record.password.clone(),
        format_timestamp(&record.created_at),
        record
            .updated_at
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default(),
    ]
}

/// `Ok(None)` for blank rows, `Err` for rows that cannot be decoded.
fn row_to_record(row: &[String]) -> Result<Option<CompanyRecord>, String> {
    let cell = |index: usize| row.get(index).map_or("", String::as_str);
    let id = cell(0).trim();
    if id.is_empty() {
        return Ok(None);
    }

    let id = RecordId::new(id).map_err(|err| err.to_string())?;
    let created_at = parse_timestamp(cell(4))
        .map_err(|err| format!("invalid creation time: {err}"))?
        .ok_or_else(|| "missing creation time".to_owned())?;
    let updated_at =
        parse_timestamp(cell(5)).map_err(|err| format!("invalid update time: {err}"))?;

    Ok(Some(CompanyRecord {
        id,
        company_name: cell(1).to_owned(),
        username: cell(2).to_owned(),
        password: cell(3).to_owned(),
        created_at,
        updated_at,
        user_model: None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn text_row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|&cell| cell.to_owned()).collect()
    }

    #[test]
    fn rows_decode_into_records_without_user_model() {
        let record = row_to_record(&text_row(&[
            "r-1",
            "Acme Corp",
            "ACME.CORP",
            "Acme@123",
            "2025-01-10T09:00:00.000Z",
            "",
        ]))
        .expect("row decodes")
        .expect("row is not blank");

        assert_eq!(record.id.as_ref(), "r-1");
        assert_eq!(record.company_name, "Acme Corp");
        assert_eq!(record.updated_at, None);
        assert_eq!(record.user_model, None);
    }

    #[rstest]
    #[case::empty(&[])]
    #[case::blanked(&["", "", "", "", "", ""])]
    #[case::whitespace_id(&["  ", "Orphan"])]
    fn blank_rows_are_skipped(#[case] cells: &[&str]) {
        assert_eq!(row_to_record(&text_row(cells)), Ok(None));
    }

    #[rstest]
    #[case::missing_created(&["r-1", "Acme", "ACME", "Acme@123"])]
    #[case::garbage_created(&["r-1", "Acme", "ACME", "Acme@123", "yesterday"])]
    #[case::garbage_updated(&["r-1", "Acme", "ACME", "Acme@123", "2025-01-10T09:00:00Z", "later"])]
    fn undecodable_rows_are_rejected(#[case] cells: &[&str]) {
        assert!(row_to_record(&text_row(cells)).is_err());
    }

    #[test]
    fn records_encode_in_header_order() {
        let record = row_to_record(&text_row(&[
            "r-1",
            "Acme Corp",
            "ACME.CORP",
            "Acme@123",
            "2025-01-10T09:00:00Z",
            "2025-01-11T10:30:00Z",
        ]))
        .expect("row decodes")
        .expect("row is not blank");

        assert_eq!(
            record_to_row(&record),
            text_row(&[
                "r-1",
                "Acme Corp",
                "ACME.CORP",
                "Acme@123",
                "2025-01-10T09:00:00.000Z",
                "2025-01-11T10:30:00.000Z",
            ])
        );
    }

    #[test]
    fn single_row_ranges_use_the_configured_sheet() {
        let backend = SheetsApiBackend::new(
            Client::new(),
            Url::parse(DEFAULT_SHEETS_BASE_URL).expect("valid url"),
            "sheet-1",
            "key-1",
            "Clientes!A:F",
        );
        assert_eq!(backend.row_range(7), "Clientes!A7:F7");
    }

    #[test]
    fn values_url_nests_under_the_spreadsheet() {
        let backend = SheetsApiBackend::new(
            Client::new(),
            Url::parse(DEFAULT_SHEETS_BASE_URL).expect("valid url"),
            "sheet-1",
            "key-1",
            DEFAULT_SHEET_RANGE,
        );
        let url = backend
            .values_url(DEFAULT_SHEET_RANGE, ":append")
            .expect("url builds");
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-1/values/Sheet1!A:F:append?key=key-1"
        );
    }
}
