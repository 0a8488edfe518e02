//! Error types for the credential-codec crate.

use thiserror::Error;

/// Errors raised when decoding a stored user model discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserModelError {
    /// The discriminator is neither `1` nor `2`.
    #[error("unsupported user model {value}: expected 1 or 2")]
    Unsupported {
        /// The rejected discriminator.
        value: u8,
    },
}
