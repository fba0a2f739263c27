//! Dependency injection demo service.
//!
//! Handlers receive their collaborators through actix-web rather than
//! constructing them: request extractors resolve per-request dependencies,
//! shared state carries swappable ports, a scope middleware guards `/admin`,
//! and a global middleware tags every request with a trace identifier.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
