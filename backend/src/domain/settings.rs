//! Application metadata handed to handlers.

use serde::Serialize;

/// Default application name reported by the profile endpoint.
pub const DEFAULT_APP_NAME: &str = "DI Demo App";
/// Default application version reported by the profile endpoint.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Application name and version.
///
/// Loaded once at startup from [`AppSettings`](crate::config::AppSettings)
/// and shared with every request through the HTTP state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Human-readable application name.
    pub app_name: String,
    /// Application version string.
    pub version: String,
}

impl Settings {
    /// Construct settings from explicit values.
    pub fn new(app_name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            version: version.into(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_APP_NAME, DEFAULT_VERSION)
    }
}
