//! Company record data model.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use credential_codec::{Credentials, UserModel};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`RecordId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier carried leading or trailing whitespace.
    PaddedId,
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "record id must not be empty"),
            Self::PaddedId => write!(f, "record id must not have surrounding whitespace"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Opaque record identifier.
///
/// New records get a UUID v4, but any non-empty string read back from storage
/// is accepted so rows written by older clients stay addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Validate and construct a [`RecordId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, RecordValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    fn from_owned(id: String) -> Result<Self, RecordValidationError> {
        if id.is_empty() {
            return Err(RecordValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(RecordValidationError::PaddedId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// A company and the credentials derived for it.
///
/// Serialised with camelCase keys; `updatedAt` and `userModel` are omitted
/// until set. Incoming blank `updatedAt` strings read as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRecord {
    /// Immutable identifier, the only key for update and delete.
    pub id: RecordId,
    /// Company name as submitted.
    pub company_name: String,
    /// Derived login name.
    pub username: String,
    /// Derived password, stored as plain text.
    pub password: String,
    /// Creation time, never changed afterwards.
    #[serde(with = "millis_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Time of the latest update.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "lenient_timestamp"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    /// Derivation rule that produced the credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_model: Option<UserModel>,
}

impl CompanyRecord {
    /// Build a freshly created record from derived credentials.
    pub fn new(
        id: RecordId,
        company_name: impl Into<String>,
        credentials: Credentials,
        model: UserModel,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            company_name: company_name.into(),
            username: credentials.username,
            password: credentials.password,
            created_at,
            updated_at: None,
            user_model: Some(model),
        }
    }

    /// Derivation rule, defaulting to [`UserModel::Standard`] when absent.
    pub fn user_model_or_default(&self) -> UserModel {
        self.user_model.unwrap_or_default()
    }

    /// Case-insensitive exact comparison against a company name.
    pub fn matches_name(&self, name: &str) -> bool {
        normalize_name(&self.company_name) == normalize_name(name)
    }

    /// Case-insensitive substring comparison against a search term.
    pub fn name_contains(&self, term: &str) -> bool {
        normalize_name(&self.company_name).contains(&normalize_name(term))
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Orders records newest first, breaking ties by id.
pub(crate) fn sort_newest_first(records: &mut [CompanyRecord]) {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// ISO-8601 text with millisecond precision and a `Z` suffix.
pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses ISO-8601 text, returning `None` for blank input.
pub(crate) fn parse_timestamp(raw: &str) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(trimmed).map(|parsed| Some(parsed.with_timezone(&Utc)))
}

mod millis_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .map_err(serde::de::Error::custom)?
            .ok_or_else(|| serde::de::Error::custom("missing creation time"))
    }
}

mod lenient_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(timestamp) => serializer.serialize_str(&super::format_timestamp(timestamp)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(text) => super::parse_timestamp(&text).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}
