//! Application configuration loaded via OrthoConfig.
//!
//! Values come from `DI_DEMO_*` environment variables, configuration files,
//! or command-line flags. Every field is optional; accessors supply the
//! defaults.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::Settings;
use crate::domain::settings::{DEFAULT_APP_NAME, DEFAULT_VERSION};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Errors raised while interpreting loaded configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        /// The rejected value.
        value: String,
        /// Parser error.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration values controlling the demo server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DI_DEMO")]
pub struct AppSettings {
    /// Application name reported to clients.
    pub app_name: Option<String>,
    /// Application version reported to clients.
    #[ortho_config(cli_long = "app-version")]
    pub version: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Serve Swagger UI under `/docs/`.
    pub docs_enabled: Option<bool>,
}

impl AppSettings {
    /// Return the configured application name, falling back to the default.
    #[must_use]
    pub fn app_name(&self) -> &str {
        self.app_name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    /// Return the configured version, falling back to the default.
    #[must_use]
    pub fn version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    /// Parse the configured bind address, falling back to `127.0.0.1:8000`.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Whether Swagger UI is served. Defaults to `true`.
    #[must_use]
    pub fn docs_enabled(&self) -> bool {
        self.docs_enabled.unwrap_or(true)
    }

    /// Application metadata handed to handlers.
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings::new(self.app_name(), self.version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("di-demo")]).expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("DI_DEMO_APP_NAME", None::<String>),
            ("DI_DEMO_VERSION", None::<String>),
            ("DI_DEMO_BIND_ADDR", None::<String>),
            ("DI_DEMO_DOCS_ENABLED", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.settings(), Settings::default());
        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::from(([127, 0, 0, 1], 8000))
        );
        assert!(settings.docs_enabled());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DI_DEMO_APP_NAME", Some("Override App".to_owned())),
            ("DI_DEMO_VERSION", Some("2.0.0".to_owned())),
            ("DI_DEMO_BIND_ADDR", Some("0.0.0.0:9090".to_owned())),
            ("DI_DEMO_DOCS_ENABLED", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.settings(), Settings::new("Override App", "2.0.0"));
        assert_eq!(
            settings.bind_addr().expect("configured address"),
            SocketAddr::from(([0, 0, 0, 0], 9090))
        );
        assert!(!settings.docs_enabled());
    }

    #[rstest]
    fn invalid_bind_address_is_reported() {
        let settings = AppSettings {
            app_name: None,
            version: None,
            bind_addr: Some("localhost".to_owned()),
            docs_enabled: None,
        };
        let error = settings.bind_addr().expect_err("should not parse");
        assert!(error.to_string().contains("localhost"));
    }
}
