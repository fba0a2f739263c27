//! Request extractors resolving handler dependencies.
//!
//! Each extractor pulls its provider out of [`HttpState`] and resolves it
//! once per request before the handler body runs. Extractors compose:
//! [`AdminUser`] awaits [`AuthenticatedPrincipal`], which reads the
//! `Authorization` header, so a handler asking for an admin gets the whole
//! chain resolved for it.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::{error, warn};

use crate::domain::{AccessToken, Error, Principal, UserRecord, require_admin};

use super::state::HttpState;

fn http_state(req: &HttpRequest) -> Option<web::Data<HttpState>> {
    req.app_data::<web::Data<HttpState>>().cloned()
}

fn missing_state() -> Error {
    error!("HTTP state is not registered with the application");
    Error::internal("HTTP state is not configured")
}

/// Read the access token from the `Authorization` header.
///
/// Headers that are absent, not visible ASCII, or empty all count as no
/// token; the authenticator decides how to treat that. Anything else is
/// passed on verbatim.
fn access_token(req: &HttpRequest) -> Option<AccessToken> {
    let value = req.headers().get(header::AUTHORIZATION)?;
    let raw = match value.to_str() {
        Ok(raw) => raw,
        Err(err) => {
            warn!(error = %err, "ignoring non-ASCII authorization header");
            return None;
        }
    };
    AccessToken::from_header(raw).ok()
}

/// The user behind the current request, as reported by the
/// [`CurrentUserProvider`](crate::domain::ports::CurrentUserProvider).
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = http_state(req);
        Box::pin(async move {
            let state = state.ok_or_else(missing_state)?;
            let user = state.current_user.current_user().await?;
            Ok(Self(user))
        })
    }
}

/// A principal whose access token has been verified.
///
/// Rejects with `401 Unauthorized` when the token is missing or unknown.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

impl FromRequest for AuthenticatedPrincipal {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = http_state(req);
        let token = access_token(req);
        Box::pin(async move {
            let state = state.ok_or_else(missing_state)?;
            let principal = state.authenticator.verify_token(token).await?;
            Ok(Self(principal))
        })
    }
}

/// A verified principal holding the admin role.
///
/// Resolves [`AuthenticatedPrincipal`] first, so a missing token yields
/// `401 Unauthorized` and a non-admin yields `403 Forbidden`.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Principal);

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let principal = AuthenticatedPrincipal::from_request(req, payload);
        Box::pin(async move {
            let AuthenticatedPrincipal(principal) = principal.await?;
            require_admin(principal).map(Self)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        ADMIN_TOKEN, MockAuthenticator, MockCurrentUserProvider, USER_TOKEN,
    };
    use crate::domain::{AccountType, ErrorCode, Role, Settings, Username};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;

    fn state() -> HttpState {
        HttpState::with_fixtures(Settings::default())
    }

    fn principal(name: &str, role: Role) -> Principal {
        Principal::new(Username::new(name).expect("fixture username"), role)
    }

    fn extractor_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .route(
                "/current",
                web::get().to(|CurrentUser(user): CurrentUser| async move {
                    HttpResponse::Ok().body(user.username.to_string())
                }),
            )
            .route(
                "/principal",
                web::get().to(|AuthenticatedPrincipal(p): AuthenticatedPrincipal| async move {
                    HttpResponse::Ok().body(p.username.to_string())
                }),
            )
            .route(
                "/admin",
                web::get().to(|AdminUser(p): AdminUser| async move {
                    HttpResponse::Ok().body(p.username.to_string())
                }),
            )
    }

    async fn get(state: HttpState, uri: &str, token: Option<&str>) -> (StatusCode, String) {
        let app = test::init_service(extractor_app(state)).await;
        let mut request = test::TestRequest::get().uri(uri);
        if let Some(token) = token {
            request = request.insert_header((header::AUTHORIZATION, token));
        }
        let response = test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn current_user_resolves_provider() {
        let mut provider = MockCurrentUserProvider::new();
        provider.expect_current_user().times(1).returning(|| {
            Ok(UserRecord::active(
                Username::new("test-user").expect("fixture username"),
                AccountType::Standard,
            ))
        });
        let state = state().with_current_user(Arc::new(provider));

        let (status, body) = get(state, "/current", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "test-user");
    }

    #[rstest]
    #[case(Some(ADMIN_TOKEN), StatusCode::OK, "admin")]
    #[case(Some("Bearer admin-token-123"), StatusCode::UNAUTHORIZED, "")]
    #[case(Some(" admin-token-123"), StatusCode::UNAUTHORIZED, "")]
    #[case(Some(USER_TOKEN), StatusCode::OK, "john_doe")]
    #[case(None, StatusCode::UNAUTHORIZED, "")]
    #[case(Some("nope"), StatusCode::UNAUTHORIZED, "")]
    #[actix_web::test]
    async fn principal_follows_fixture_tokens(
        #[case] token: Option<&str>,
        #[case] expected_status: StatusCode,
        #[case] expected_name: &str,
    ) {
        let (status, body) = get(state(), "/principal", token).await;
        assert_eq!(status, expected_status);
        if status.is_success() {
            assert_eq!(body, expected_name);
        }
    }

    #[rstest]
    #[case(Some(ADMIN_TOKEN), StatusCode::OK)]
    #[case(Some(USER_TOKEN), StatusCode::FORBIDDEN)]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[actix_web::test]
    async fn admin_chain_checks_token_then_role(
        #[case] token: Option<&str>,
        #[case] expected: StatusCode,
    ) {
        let (status, _) = get(state(), "/admin", token).await;
        assert_eq!(status, expected);
    }

    #[actix_web::test]
    async fn admin_chain_uses_replaced_authenticator() {
        let mut authenticator = MockAuthenticator::new();
        authenticator
            .expect_verify_token()
            .withf(Option::is_none)
            .times(1)
            .returning(|_| Ok(principal("test-admin", Role::Admin)));
        let state = state().with_authenticator(Arc::new(authenticator));

        let (status, body) = get(state, "/admin", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "test-admin");
    }

    #[actix_web::test]
    async fn missing_state_is_an_internal_error() {
        let app = test::init_service(App::new().route(
            "/current",
            web::get().to(|_: CurrentUser| async { HttpResponse::Ok().finish() }),
        ))
        .await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/current").to_request()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Error = test::read_body_json(response).await;
        assert_eq!(body.code, ErrorCode::InternalError);
    }
}
