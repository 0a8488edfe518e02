//! Domain-level error types.
//!
//! These errors are transport agnostic. A UI maps them to toasts, dialogs, or
//! any other presentation it likes.

use serde::{Deserialize, Serialize};

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Caller input failed validation before reaching storage.
    ValidationError,
    /// The record targeted by an update does not exist.
    NotFound,
    /// The remote backend could not be reached or rejected the call.
    RemoteUnavailable,
    /// A remote operation was attempted without a usable endpoint descriptor.
    RemoteMisconfigured,
    /// Local persistence could not be written.
    StorageExhausted,
    /// An unexpected error occurred inside the store.
    InternalError,
}

impl ErrorCode {
    const fn fallback_message(self) -> &'static str {
        match self {
            Self::ValidationError => "invalid input",
            Self::NotFound => "record not found",
            Self::RemoteUnavailable => "remote backend unavailable",
            Self::RemoteMisconfigured => "remote backend not configured",
            Self::StorageExhausted => "local storage write failed",
            Self::InternalError => "internal error",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is never empty; blank messages are replaced with a generic
///   description of the code.
///
/// # Examples
/// ```
/// use credential_store::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::not_found("record 42 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "record 42 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
}

/// Validation errors emitted by [`DomainError::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainErrorValidationError {
    /// The message was empty once trimmed.
    EmptyMessage,
}

impl std::fmt::Display for DomainErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for DomainErrorValidationError {}

impl DomainError {
    /// Create a new error, substituting a generic message when `message` is
    /// blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(DomainErrorValidationError::EmptyMessage) => Self {
                code,
                message: code.fallback_message().to_owned(),
            },
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainErrorValidationError::EmptyMessage);
        }
        Ok(Self { code, message })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::ValidationError`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::RemoteUnavailable`].
    pub fn remote_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RemoteUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::RemoteMisconfigured`].
    pub fn remote_misconfigured(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RemoteMisconfigured, message)
    }

    /// Convenience constructor for [`ErrorCode::StorageExhausted`].
    pub fn storage_exhausted(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageExhausted, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}
