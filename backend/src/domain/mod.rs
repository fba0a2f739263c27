//! Domain primitives, rules, and ports.
//!
//! Purpose: define the types that flow between providers and handlers
//! without coupling them to actix-web. Inbound adapters translate these into
//! HTTP responses.
//!
//! Public surface:
//! - Error / ErrorCode: error payload and stable error identifier.
//! - UserRecord / UserStats: directory entries and their summary.
//! - Principal / AccessToken / Role: token-derived identity.
//! - Settings: application name and version.
//! - TraceId: request-scoped correlation identifier.

pub mod auth;
pub mod error;
pub mod ports;
pub mod settings;
pub mod trace_id;
pub mod user;

pub use self::auth::{AccessToken, AccessTokenError, Principal, Role, require_admin};
pub use self::error::{Error, ErrorCode};
pub use self::settings::Settings;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AccountStatus, AccountType, AccountTypeCounts, UserRecord, UserStats, Username,
    UsernameValidationError,
};
