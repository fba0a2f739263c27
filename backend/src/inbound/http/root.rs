//! Service index.
//!
//! ```text
//! GET /
//! ```

use std::collections::BTreeMap;

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Response payload for `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HomeResponse {
    /// Service banner.
    pub message: String,
    /// Injection style mapped to the providers demonstrating it.
    pub features: BTreeMap<String, String>,
    /// Endpoint kind mapped to a usage hint.
    pub endpoints: BTreeMap<String, String>,
}

fn entries(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

/// Describe the demo and the endpoints to try.
///
/// Only the global middleware runs for this route.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service index", body = HomeResponse)),
    tags = ["root"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> web::Json<HomeResponse> {
    web::Json(HomeResponse {
        message: "actix-web Dependency Injection Demo".to_owned(),
        features: entries(&[
            ("function_based", "CurrentUser, HttpState::settings"),
            ("class_based", "Settings, UserDirectory"),
            ("nested", "AdminUser -> AuthenticatedPrincipal -> Authorization header"),
            ("router_level", "/admin routes require admin auth"),
            ("global", "Trace runs on all routes"),
        ]),
        endpoints: entries(&[
            ("basic", "/users/profile"),
            (
                "nested_dependency",
                "/users/dashboard (Header: Authorization: admin-token-123)",
            ),
            (
                "router_level",
                "/admin/stats (Header: Authorization: admin-token-123)",
            ),
            ("docs", "/docs/"),
        ]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn home_lists_features_and_endpoints() {
        let app = test::init_service(App::new().service(home)).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert!(response.status().is_success());

        let body: Value = test::read_body_json(response).await;
        assert!(body.get("message").and_then(Value::as_str).is_some());
        assert_eq!(
            body.pointer("/endpoints/basic").and_then(Value::as_str),
            Some("/users/profile")
        );
        let feature_keys: Vec<&str> = body
            .pointer("/features")
            .and_then(Value::as_object)
            .map(|features| features.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(
            feature_keys,
            ["class_based", "function_based", "global", "nested", "router_level"]
        );
        let endpoint_keys: Vec<&str> = body
            .pointer("/endpoints")
            .and_then(Value::as_object)
            .map(|endpoints| endpoints.keys().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(
            endpoint_keys,
            ["basic", "docs", "nested_dependency", "router_level"]
        );
    }
}
