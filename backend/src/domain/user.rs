//! User directory records.
//!
//! A [`UserRecord`] is what the user directory stores and what the profile
//! and admin endpoints return. [`UserStats`] summarises a set of records.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameValidationError {
    /// Username is empty once trimmed.
    #[error("username must not be empty")]
    Empty,
    /// Username carries leading or trailing whitespace.
    #[error("username must not contain surrounding whitespace")]
    SurroundingWhitespace,
}

/// Login name identifying a user in the directory.
///
/// ## Invariants
/// - Non-empty and free of surrounding whitespace.
///
/// # Examples
/// ```
/// use di_demo::domain::Username;
///
/// let name = Username::new("admin").expect("valid username");
/// assert_eq!(name.as_str(), "admin");
/// assert!(Username::new(" admin").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, UsernameValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(UsernameValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(UsernameValidationError::SurroundingWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Kind of account held by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Administrative account.
    Admin,
    /// Regular account.
    Standard,
}

impl AccountType {
    /// Wire name of the account type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Standard => "standard",
        }
    }
}

/// Whether an account may currently be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account is in good standing.
    Active,
    /// Account has been disabled by an administrator.
    Suspended,
}

/// Directory entry for a single user.
///
/// Serialised as `{"username": "admin", "account_type": "admin", "status": "active"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRecord {
    /// Login name, unique within the directory.
    #[schema(value_type = String, example = "admin")]
    pub username: Username,
    /// Account kind.
    pub account_type: AccountType,
    /// Account state.
    pub status: AccountStatus,
}

impl UserRecord {
    /// Build an active record.
    #[must_use]
    pub const fn active(username: Username, account_type: AccountType) -> Self {
        Self {
            username,
            account_type,
            status: AccountStatus::Active,
        }
    }
}

/// Per-account-type user counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct AccountTypeCounts {
    /// Number of admin accounts.
    pub admin: usize,
    /// Number of standard accounts.
    pub standard: usize,
}

/// Summary statistics over the user directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserStats {
    /// Total number of users.
    pub total_users: usize,
    /// Users grouped by account type.
    pub user_types: AccountTypeCounts,
}

impl UserStats {
    /// Count users in total and per account type.
    ///
    /// # Examples
    /// ```
    /// use di_demo::domain::{AccountType, UserRecord, UserStats, Username};
    ///
    /// let records = [
    ///     UserRecord::active(Username::new("admin").unwrap(), AccountType::Admin),
    ///     UserRecord::active(Username::new("ada").unwrap(), AccountType::Standard),
    /// ];
    /// let stats = UserStats::from_records(&records);
    /// assert_eq!(stats.total_users, 2);
    /// assert_eq!(stats.user_types.admin, 1);
    /// ```
    #[must_use]
    pub fn from_records(records: &[UserRecord]) -> Self {
        let user_types = records
            .iter()
            .fold(AccountTypeCounts::default(), |mut counts, record| {
                match record.account_type {
                    AccountType::Admin => counts.admin += 1,
                    AccountType::Standard => counts.standard += 1,
                }
                counts
            });
        Self {
            total_users: records.len(),
            user_types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn record(name: &str, account_type: AccountType) -> UserRecord {
        UserRecord::active(Username::new(name).expect("fixture username"), account_type)
    }

    #[rstest]
    #[case("", UsernameValidationError::Empty)]
    #[case("   ", UsernameValidationError::Empty)]
    #[case(" admin", UsernameValidationError::SurroundingWhitespace)]
    #[case("admin\n", UsernameValidationError::SurroundingWhitespace)]
    fn username_rejects_invalid_input(
        #[case] raw: &str,
        #[case] expected: UsernameValidationError,
    ) {
        assert_eq!(Username::new(raw), Err(expected));
    }

    #[test]
    fn record_serialises_snake_case_fields() {
        let value = serde_json::to_value(record("admin", AccountType::Admin)).expect("json");
        assert_eq!(
            value,
            json!({ "username": "admin", "account_type": "admin", "status": "active" })
        );
    }

    #[test]
    fn record_deserialisation_validates_username() {
        let raw = json!({ "username": "", "account_type": "standard", "status": "active" });
        assert!(serde_json::from_value::<UserRecord>(raw).is_err());
    }

    #[test]
    fn stats_count_each_account_type() {
        let records = [
            record("admin", AccountType::Admin),
            record("standard", AccountType::Standard),
            record("test-user", AccountType::Standard),
        ];
        let stats = UserStats::from_records(&records);
        assert_eq!(stats.total_users, 3);
        assert_eq!(
            stats.user_types,
            AccountTypeCounts {
                admin: 1,
                standard: 2
            }
        );
    }

    #[test]
    fn stats_of_empty_directory_are_zero() {
        assert_eq!(UserStats::from_records(&[]), UserStats::default());
    }
}
