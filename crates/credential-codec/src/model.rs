//! Credential value types.

use serde::{Deserialize, Serialize};

use crate::error::UserModelError;

/// Selects which username rule produced a set of credentials.
///
/// Serialises as the integer discriminator stored alongside records, so a
/// record written as `"userModel": 2` reads back as [`UserModel::Suffixed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UserModel {
    /// Plain username with no suffix.
    #[default]
    Standard,
    /// Username ending in the fixed `3288` suffix.
    Suffixed,
}

impl UserModel {
    /// Numeric discriminator used in persisted records.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Standard => 1,
            Self::Suffixed => 2,
        }
    }
}

impl From<UserModel> for u8 {
    fn from(value: UserModel) -> Self {
        value.as_u8()
    }
}

impl TryFrom<u8> for UserModel {
    type Error = UserModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Standard),
            2 => Ok(Self::Suffixed),
            other => Err(UserModelError::Unsupported { value: other }),
        }
    }
}

/// A derived username and password pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credentials {
    /// Uppercase login identifier.
    pub username: String,
    /// Title-cased password ending in the fixed suffix.
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn user_model_defaults_to_standard() {
        assert_eq!(UserModel::default(), UserModel::Standard);
    }

    #[rstest]
    #[case(1, UserModel::Standard)]
    #[case(2, UserModel::Suffixed)]
    fn user_model_decodes_known_discriminators(#[case] raw: u8, #[case] expected: UserModel) {
        assert_eq!(UserModel::try_from(raw), Ok(expected));
        assert_eq!(u8::from(expected), raw);
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    fn user_model_rejects_unknown_discriminators(#[case] raw: u8) {
        assert_eq!(
            UserModel::try_from(raw),
            Err(UserModelError::Unsupported { value: raw })
        );
    }

    #[test]
    fn user_model_serializes_as_integer() {
        let json = serde_json::to_string(&UserModel::Suffixed).map_err(|err| err.to_string());
        assert_eq!(json, Ok("2".to_owned()));

        let parsed: Result<UserModel, _> = serde_json::from_str("5");
        assert!(parsed.is_err(), "unknown discriminators must not deserialize");
    }
}
