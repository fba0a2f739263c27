//! Token-based identity and the admin privilege rule.
//!
//! Token verification itself sits behind the
//! [`Authenticator`](crate::domain::ports::Authenticator) port. This module
//! owns the types that flow through it and the role check that the admin
//! endpoints layer on top.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::{Error, Username};

/// Role granted to a verified principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access.
    Admin,
    /// Ordinary authenticated user.
    User,
}

/// Identity produced by verifying an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Name of the authenticated user.
    pub username: Username,
    /// Granted role.
    pub role: Role,
}

impl Principal {
    /// Construct a principal.
    #[must_use]
    pub const fn new(username: Username, role: Role) -> Self {
        Self { username, role }
    }

    /// Whether the principal holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Errors raised when parsing an `Authorization` header value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessTokenError {
    /// The header carried no token.
    #[error("access token must not be empty")]
    Empty,
}

/// Opaque access token taken from the `Authorization` header.
///
/// # Examples
/// ```
/// use di_demo::domain::AccessToken;
///
/// let token = AccessToken::from_header("admin-token-123").expect("token");
/// assert_eq!(token.as_str(), "admin-token-123");
///
/// // The value is taken verbatim; no scheme prefix is stripped.
/// let prefixed = AccessToken::from_header("Bearer admin-token-123").expect("token");
/// assert_ne!(prefixed, token);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Take a raw header value as the token.
    ///
    /// The value must match a known token exactly, so it is neither trimmed
    /// nor stripped of a scheme prefix. An empty value counts as no token.
    pub fn from_header(value: &str) -> Result<Self, AccessTokenError> {
        if value.is_empty() {
            return Err(AccessTokenError::Empty);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Require the admin role.
///
/// Returns the principal unchanged when it is an admin and a
/// `403 Forbidden` error otherwise.
pub fn require_admin(principal: Principal) -> Result<Principal, Error> {
    if principal.is_admin() {
        Ok(principal)
    } else {
        tracing::debug!(username = %principal.username, "admin privileges denied");
        Err(Error::forbidden("Admin privileges required"))
    }
}
