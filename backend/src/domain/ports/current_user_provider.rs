//! Driving port resolving the user behind the current request.
//!
//! Handlers receive the user through the `CurrentUser` extractor, which calls
//! this port. A real deployment would derive the user from a session or
//! token; the demo ships a randomised provider so both account types show up.

use async_trait::async_trait;
use rand::Rng;

use crate::domain::{AccountType, Error, UserRecord, Username};

/// Domain use-case port returning the current user's directory record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CurrentUserProvider: Send + Sync {
    /// Resolve the user for the request in flight.
    async fn current_user(&self) -> Result<UserRecord, Error>;
}

/// Simulated provider that picks `admin` or `standard` at random.
///
/// The returned username equals the account type, so the record always
/// matches an entry of the seeded directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCurrentUser;

fn pick_account_type() -> AccountType {
    if rand::thread_rng().gen_bool(0.5) {
        AccountType::Admin
    } else {
        AccountType::Standard
    }
}

#[async_trait]
impl CurrentUserProvider for RandomCurrentUser {
    async fn current_user(&self) -> Result<UserRecord, Error> {
        let account_type = pick_account_type();
        let username = Username::new(account_type.as_str())
            .map_err(|err| Error::internal(format!("invalid simulated username: {err}")))?;
        Ok(UserRecord::active(username, account_type))
    }
}

/// Provider that always returns the same record.
///
/// Useful for wiring a known identity, e.g. in tests that replace the
/// random provider.
#[derive(Debug, Clone)]
pub struct FixedCurrentUser(UserRecord);

impl FixedCurrentUser {
    /// Wrap the record to return on every call.
    #[must_use]
    pub const fn new(record: UserRecord) -> Self {
        Self(record)
    }
}

#[async_trait]
impl CurrentUserProvider for FixedCurrentUser {
    async fn current_user(&self) -> Result<UserRecord, Error> {
        Ok(self.0.clone())
    }
}
