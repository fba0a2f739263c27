//! Driving port for access-token verification.
//!
//! The HTTP adapter extracts the token from the `Authorization` header and
//! hands it here. Keeping verification behind a port lets tests substitute an
//! authenticator that admits a chosen principal without any header at all.

use async_trait::async_trait;

use crate::domain::{AccessToken, Error, Principal, Role, Username};

/// Fixture token granting the `admin` role.
pub const ADMIN_TOKEN: &str = "admin-token-123";
/// Fixture token granting the `user` role.
pub const USER_TOKEN: &str = "user-token-456";

const INVALID_TOKEN_MESSAGE: &str = "Invalid or missing authentication token";

/// Domain use-case port verifying access tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Verify the token, if any, and return the principal it identifies.
    ///
    /// A missing or unknown token yields an `Unauthorized` error.
    async fn verify_token(&self, token: Option<AccessToken>) -> Result<Principal, Error>;
}

/// Authenticator backed by the two fixture tokens.
///
/// - [`ADMIN_TOKEN`] identifies `admin` with [`Role::Admin`].
/// - [`USER_TOKEN`] identifies `john_doe` with [`Role::User`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthenticator;

fn principal(username: &str, role: Role) -> Result<Principal, Error> {
    let username = Username::new(username)
        .map_err(|err| Error::internal(format!("invalid fixture username: {err}")))?;
    Ok(Principal::new(username, role))
}

#[async_trait]
impl Authenticator for FixtureAuthenticator {
    async fn verify_token(&self, token: Option<AccessToken>) -> Result<Principal, Error> {
        match token.as_ref().map(AccessToken::as_str) {
            Some(ADMIN_TOKEN) => principal("admin", Role::Admin),
            Some(USER_TOKEN) => principal("john_doe", Role::User),
            Some(_) => {
                tracing::debug!("rejected unknown access token");
                Err(Error::unauthorized(INVALID_TOKEN_MESSAGE))
            }
            None => Err(Error::unauthorized(INVALID_TOKEN_MESSAGE)),
        }
    }
}

/// Authenticator that admits every request as the same principal.
///
/// Replaces token verification wholesale, so requests need no
/// `Authorization` header.
#[derive(Debug, Clone)]
pub struct StaticAuthenticator(Principal);

impl StaticAuthenticator {
    /// Admit every request as `principal`.
    #[must_use]
    pub const fn new(principal: Principal) -> Self {
        Self(principal)
    }
}

#[async_trait]
impl Authenticator for StaticAuthenticator {
    async fn verify_token(&self, _token: Option<AccessToken>) -> Result<Principal, Error> {
        Ok(self.0.clone())
    }
}
