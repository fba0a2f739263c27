//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the domain schemas they return,
//! and the `Authorization` header security scheme. The document is served by
//! Swagger UI under `/docs/` and printed by the `openapi-dump` binary.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    AccountStatus, AccountType, AccountTypeCounts, Error, ErrorCode, Role, UserRecord, UserStats,
};
use crate::inbound::http::admin::UserListResponse;
use crate::inbound::http::health::{Probe, ProbeReport, ProbeStatus};
use crate::inbound::http::root::HomeResponse;
use crate::inbound::http::users::{DashboardResponse, ProfileResponse};

/// Name of the security scheme guarding admin endpoints.
pub const AUTHORIZATION_SCHEME: &str = "AuthorizationHeader";

/// Enrich the generated document with the `Authorization` header scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            AUTHORIZATION_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "Access token sent verbatim, without a scheme prefix. \
                 Try admin-token-123 or user-token-456.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "DI Demo API",
        description = "Dependency injection patterns expressed as extractors, \
                       shared state, and middleware.",
        version = "1.0.0"
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::root::home,
        crate::inbound::http::users::user_profile,
        crate::inbound::http::users::user_dashboard,
        crate::inbound::http::admin::system_stats,
        crate::inbound::http::admin::list_all_users,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        UserRecord,
        AccountType,
        AccountStatus,
        Role,
        UserStats,
        AccountTypeCounts,
        HomeResponse,
        ProfileResponse,
        DashboardResponse,
        UserListResponse,
        ProbeReport,
        Probe,
        ProbeStatus,
    )),
    tags(
        (name = "root", description = "Service index"),
        (name = "users", description = "Per-request user dependencies"),
        (name = "admin", description = "Routes guarded by scope-level admin checks"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case("UserRecord", &["username", "account_type", "status"])]
    #[case("UserStats", &["total_users", "user_types"])]
    fn schemas_have_expected_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    fn every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/users/profile",
            "/users/dashboard",
            "/admin/stats",
            "/admin/users/list",
            "/health/ready",
            "/health/live",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[rstest]
    fn authorization_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(AUTHORIZATION_SCHEME));
    }
}
