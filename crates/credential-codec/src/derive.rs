//! Username and password derivation rules.

use crate::model::{Credentials, UserModel};
use crate::normalize::{clean, pad_chars, title_case, truncate_at_separator, truncate_chars};
use crate::{
    PASSWORD_FILLER, PASSWORD_MAX, PASSWORD_SUFFIX, PASSWORD_WORD_MIN, USERNAME_MAX,
    USERNAME_PLACEHOLDER, USERNAME_SEPARATOR, USERNAME_SUFFIX,
};

/// Derives both credentials for a company name.
///
/// The function is total: empty, whitespace-only, and punctuation-only names
/// fall back to [`USERNAME_PLACEHOLDER`] and a filler-padded password.
///
/// # Example
///
/// ```
/// use credential_codec::{UserModel, derive_credentials};
///
/// let credentials = derive_credentials("A. V. B. Pinheiro Refeições", UserModel::Standard);
/// assert_eq!(credentials.username, "A.V.B.PINHEIRO");
/// assert_eq!(credentials.password, "Axxx@123");
/// ```
#[must_use]
pub fn derive_credentials(company_name: &str, model: UserModel) -> Credentials {
    Credentials {
        username: derive_username(company_name, model),
        password: derive_password(company_name),
    }
}

/// Derives the uppercase username for a company name.
///
/// Words are joined with [`USERNAME_SEPARATOR`] and the result is cut to
/// [`USERNAME_MAX`] characters. [`UserModel::Suffixed`] cuts the words
/// shorter so [`USERNAME_SUFFIX`] still fits inside the same budget.
#[must_use]
pub fn derive_username(company_name: &str, model: UserModel) -> String {
    let cleaned = clean(company_name);
    let joined = cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(&USERNAME_SEPARATOR.to_string())
        .to_uppercase();
    let base = if joined.is_empty() {
        USERNAME_PLACEHOLDER.to_owned()
    } else {
        joined
    };

    match model {
        UserModel::Standard => truncate_at_separator(&base, USERNAME_MAX, USERNAME_SEPARATOR),
        UserModel::Suffixed => {
            let budget = USERNAME_MAX - USERNAME_SUFFIX.chars().count();
            let mut prefix = truncate_at_separator(&base, budget, USERNAME_SEPARATOR);
            prefix.push_str(USERNAME_SUFFIX);
            prefix
        }
    }
}

/// Derives the password for a company name.
///
/// Only the first word contributes. It is title-cased, cut so the whole
/// password fits in [`PASSWORD_MAX`] characters, padded with
/// [`PASSWORD_FILLER`] when shorter than [`PASSWORD_WORD_MIN`], and finished
/// with [`PASSWORD_SUFFIX`].
#[must_use]
pub fn derive_password(company_name: &str) -> String {
    let budget = PASSWORD_MAX - PASSWORD_SUFFIX.chars().count();
    let cleaned = clean(company_name);
    let first_word = cleaned.split_whitespace().next().unwrap_or_default();

    let mut word = truncate_chars(&title_case(first_word), budget);
    if word.chars().count() < PASSWORD_WORD_MIN {
        let padded = pad_chars(&word, PASSWORD_WORD_MIN, PASSWORD_FILLER);
        word = truncate_chars(&title_case(&padded), budget);
    }

    word.push_str(PASSWORD_SUFFIX);
    word
}
