//! Results that carry recoverable fallback warnings.

use std::fmt;

/// Backend operation that triggered a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOperation {
    /// Listing every record.
    GetAll,
    /// Inserting a record.
    Add,
    /// Replacing a record.
    Update,
    /// Removing a record.
    Delete,
}

impl BackendOperation {
    /// Stable label for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetAll => "get_all",
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for BackendOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when the remote failed and local storage served the call instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackWarning {
    /// Operation that fell back.
    pub operation: BackendOperation,
    /// Remote failure description.
    pub message: String,
}

impl fmt::Display for FallbackWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fell back to local storage: {}",
            self.operation, self.message
        )
    }
}

/// A successful value plus any fallback warnings raised producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOutcome<T> {
    /// Operation result.
    pub value: T,
    /// Remote failures absorbed by local fallback.
    pub warnings: Vec<FallbackWarning>,
}

impl<T> StoreOutcome<T> {
    /// Outcome without warnings.
    pub fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Outcome carrying a single warning.
    pub fn with_warning(value: T, warning: FallbackWarning) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }

    /// Whether any fallback happened.
    pub fn fell_back(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Replace the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> StoreOutcome<U> {
        StoreOutcome {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Append warnings from a follow-up step and drop its value.
    pub fn absorb<U>(mut self, other: StoreOutcome<U>) -> Self {
        self.warnings.extend(other.warnings);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warning(operation: BackendOperation) -> FallbackWarning {
        FallbackWarning {
            operation,
            message: "remote offline".to_owned(),
        }
    }

    #[test]
    fn absorb_keeps_value_and_collects_warnings() {
        let first = StoreOutcome::with_warning(7, warning(BackendOperation::Add));
        let second = StoreOutcome::with_warning("ignored", warning(BackendOperation::GetAll));

        let combined = first.absorb(second);
        assert_eq!(combined.value, 7);
        assert_eq!(
            combined.warnings,
            vec![
                warning(BackendOperation::Add),
                warning(BackendOperation::GetAll)
            ]
        );
    }

    #[test]
    fn map_preserves_warnings() {
        let outcome = StoreOutcome::with_warning(2, warning(BackendOperation::Delete)).map(|v| v * 2);
        assert_eq!(outcome.value, 4);
        assert!(outcome.fell_back());
    }

    #[test]
    fn warnings_render_operation_and_cause() {
        assert_eq!(
            warning(BackendOperation::Update).to_string(),
            "update fell back to local storage: remote offline"
        );
    }
}
