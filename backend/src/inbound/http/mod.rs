//! HTTP inbound adapter exposing REST endpoints.

pub mod admin;
pub mod dependencies;
pub mod error;
pub mod health;
pub mod root;
pub mod state;
pub mod users;

pub use error::ApiResult;
