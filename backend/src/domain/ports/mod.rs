//! Domain ports: the providers handlers depend on.
//!
//! Each port is an object-safe async trait held as `Arc<dyn Port>` in the
//! HTTP state. Production wiring uses the fixture adapters defined next to
//! each trait; tests swap in their own implementations.

mod authenticator;
mod current_user_provider;
mod user_directory;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::{
    ADMIN_TOKEN, Authenticator, FixtureAuthenticator, StaticAuthenticator, USER_TOKEN,
};
#[cfg(test)]
pub use current_user_provider::MockCurrentUserProvider;
pub use current_user_provider::{CurrentUserProvider, FixedCurrentUser, RandomCurrentUser};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{InMemoryUserDirectory, UserDirectory};
