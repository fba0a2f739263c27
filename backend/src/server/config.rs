//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use crate::domain::Settings;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) settings: Settings,
    pub(crate) docs_enabled: bool,
}

impl ServerConfig {
    /// Construct a server configuration with default settings and docs enabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            settings: Settings::default(),
            docs_enabled: true,
        }
    }

    /// Replace the application metadata handed to handlers.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Toggle the Swagger UI under `/docs/`.
    #[must_use]
    pub fn with_docs(mut self, enabled: bool) -> Self {
        self.docs_enabled = enabled;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
