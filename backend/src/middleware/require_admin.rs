//! Scope-level admin gate.
//!
//! Wrapping a scope in [`RequireAdmin`] applies the admin dependency to every
//! route inside it: the [`AdminUser`] extractor is resolved before the inner
//! service runs, and a failure short-circuits with the error response.
//! Paths the scope has no route for skip the gate and get the usual 404.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::FromRequest;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, info};

use crate::inbound::http::dependencies::AdminUser;

/// Middleware requiring an admin principal for every wrapped route.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use di_demo::middleware::RequireAdmin;
///
/// let _scope = web::scope("/admin").wrap(RequireAdmin);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAdminMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`RequireAdmin`].
pub struct RequireAdminMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            // Unrouted paths fall through to the scope's 404 without the gate.
            if !req.resource_map().has_resource(req.path()) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let admin = AdminUser::extract(req.request()).await;
            match admin {
                Ok(AdminUser(admin)) => {
                    debug!(username = %admin.username, path = %req.path(), "admin gate passed");
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(error) => {
                    info!(code = ?error.code, path = %req.path(), "admin gate rejected request");
                    Ok(req.error_response(error).map_into_right_body())
                }
            }
        })
    }
}
