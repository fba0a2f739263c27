//! Driving port for user directory reads.
//!
//! The in-memory adapter doubles as the demo's "database"; tests extend it
//! with extra users rather than mocking every call.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{AccountType, Error, UserRecord, Username};

/// Domain use-case port for looking up users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a single user by name.
    async fn find_user(&self, username: &Username) -> Result<Option<UserRecord>, Error>;

    /// List every user, ordered by username.
    async fn list_users(&self) -> Result<Vec<UserRecord>, Error>;
}

/// Immutable in-memory user directory.
///
/// # Examples
/// ```
/// use di_demo::domain::ports::InMemoryUserDirectory;
/// use di_demo::domain::{AccountType, UserRecord, Username};
///
/// let directory = InMemoryUserDirectory::seeded().with_user(UserRecord::active(
///     Username::new("test-user").expect("valid username"),
///     AccountType::Standard,
/// ));
/// assert_eq!(directory.len(), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserDirectory {
    users: BTreeMap<Username, UserRecord>,
}

impl InMemoryUserDirectory {
    /// Directory holding the two demo accounts, `admin` and `standard`.
    #[must_use]
    pub fn seeded() -> Self {
        [AccountType::Admin, AccountType::Standard]
            .into_iter()
            .filter_map(|account_type| {
                Username::new(account_type.as_str())
                    .ok()
                    .map(|username| UserRecord::active(username, account_type))
            })
            .fold(Self::default(), Self::with_user)
    }

    /// Add a user, replacing any existing entry with the same name.
    #[must_use]
    pub fn with_user(mut self, record: UserRecord) -> Self {
        self.users.insert(record.username.clone(), record);
        self
    }

    /// Number of users held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, username: &Username) -> Result<Option<UserRecord>, Error> {
        Ok(self.users.get(username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        Ok(self.users.values().cloned().collect())
    }
}
