//! Deterministic login credential derivation from company names.
//!
//! This crate turns a free-text company name into a `{username, password}`
//! pair. Derivation is pure: no I/O, no clock, no randomness. The same name
//! and [`UserModel`] always yield the same [`Credentials`], and every input,
//! including empty or punctuation-only strings, produces a usable pair.
//!
//! # Overview
//!
//! - Usernames are the cleaned words of the name joined with `.`, uppercased
//!   and truncated to [`USERNAME_MAX`] characters. [`UserModel::Suffixed`]
//!   reserves the tail of that budget for [`USERNAME_SUFFIX`].
//! - Passwords are the title-cased first word, truncated and padded to fit
//!   [`PASSWORD_MAX`] characters including [`PASSWORD_SUFFIX`].
//!
//! # Example
//!
//! ```
//! use credential_codec::{UserModel, derive_credentials};
//!
//! let credentials = derive_credentials("Acme Corp", UserModel::Standard);
//! assert_eq!(credentials.username, "ACME.CORP");
//! assert_eq!(credentials.password, "Acme@123");
//!
//! let suffixed = derive_credentials("Acme Corp", UserModel::Suffixed);
//! assert_eq!(suffixed.username, "ACME.CORP3288");
//! ```

mod derive;
mod error;
mod model;
mod normalize;

pub use derive::{derive_credentials, derive_password, derive_username};
pub use error::UserModelError;
pub use model::{Credentials, UserModel};

/// Maximum username length, in characters, for every user model.
pub const USERNAME_MAX: usize = 15;

/// Literal appended to usernames derived with [`UserModel::Suffixed`].
pub const USERNAME_SUFFIX: &str = "3288";

/// Username used when the company name has no letters or digits.
pub const USERNAME_PLACEHOLDER: &str = "USER.NAME";

/// Character joining the words of a username.
pub const USERNAME_SEPARATOR: char = '.';

/// Maximum password length, in characters, including the suffix.
pub const PASSWORD_MAX: usize = 12;

/// Literal appended to every password.
pub const PASSWORD_SUFFIX: &str = "@123";

/// Minimum length of the word part of a password before the suffix.
pub const PASSWORD_WORD_MIN: usize = 4;

/// Character used to pad short password words.
pub const PASSWORD_FILLER: char = 'x';
