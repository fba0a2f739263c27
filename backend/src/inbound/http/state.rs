//! Shared HTTP adapter state.
//!
//! Handlers and extractors receive this state via `actix_web::web::Data` so
//! they depend only on domain ports. Swapping a port here is how a test
//! overrides a dependency: build the state with a double and hand it to the
//! app, with no global override table to reset afterwards.

use std::sync::Arc;

use crate::domain::Settings;
use crate::domain::ports::{
    Authenticator, CurrentUserProvider, FixtureAuthenticator, InMemoryUserDirectory,
    RandomCurrentUser, UserDirectory,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    /// Resolves the user behind a request.
    pub current_user: Arc<dyn CurrentUserProvider>,
    /// Verifies access tokens.
    pub authenticator: Arc<dyn Authenticator>,
    /// User lookup and listing.
    pub users: Arc<dyn UserDirectory>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            current_user: Arc::new(RandomCurrentUser),
            authenticator: Arc::new(FixtureAuthenticator),
            users: Arc::new(InMemoryUserDirectory::seeded()),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Application name and version.
    pub settings: Settings,
    /// Resolves the user behind a request.
    pub current_user: Arc<dyn CurrentUserProvider>,
    /// Verifies access tokens.
    pub authenticator: Arc<dyn Authenticator>,
    /// User lookup and listing.
    pub users: Arc<dyn UserDirectory>,
}

impl HttpState {
    /// Construct state from settings and a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use di_demo::domain::Settings;
    /// use di_demo::domain::ports::{
    ///     FixtureAuthenticator, InMemoryUserDirectory, RandomCurrentUser,
    /// };
    /// use di_demo::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let ports = HttpStatePorts {
    ///     current_user: Arc::new(RandomCurrentUser),
    ///     authenticator: Arc::new(FixtureAuthenticator),
    ///     users: Arc::new(InMemoryUserDirectory::seeded()),
    /// };
    /// let state = HttpState::new(Settings::default(), ports);
    /// assert_eq!(state.settings.app_name, "DI Demo App");
    /// ```
    #[must_use]
    pub fn new(settings: Settings, ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            current_user,
            authenticator,
            users,
        } = ports;
        Self {
            settings,
            current_user,
            authenticator,
            users,
        }
    }

    /// Construct state wired to the fixture adapters.
    #[must_use]
    pub fn with_fixtures(settings: Settings) -> Self {
        Self::new(settings, HttpStatePorts::default())
    }

    /// Replace the current-user provider.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use di_demo::domain::ports::FixedCurrentUser;
    /// use di_demo::domain::{AccountType, Settings, UserRecord, Username};
    /// use di_demo::inbound::http::state::HttpState;
    ///
    /// let user = UserRecord::active(Username::new("test-user").unwrap(), AccountType::Standard);
    /// let state = HttpState::with_fixtures(Settings::default())
    ///     .with_current_user(Arc::new(FixedCurrentUser::new(user)));
    /// # let _ = state;
    /// ```
    #[must_use]
    pub fn with_current_user(mut self, provider: Arc<dyn CurrentUserProvider>) -> Self {
        self.current_user = provider;
        self
    }

    /// Replace the token authenticator.
    #[must_use]
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = authenticator;
        self
    }

    /// Replace the user directory.
    #[must_use]
    pub fn with_users(mut self, users: Arc<dyn UserDirectory>) -> Self {
        self.users = users;
        self
    }
}
