//! Server construction and middleware wiring.
//!
//! Three layers of injection meet here: the global [`Trace`] middleware wraps
//! every route, [`RequireAdmin`] wraps the `/admin` scope, and the shared
//! [`HttpState`] carries the ports that per-handler extractors resolve.

mod config;

pub use config::ServerConfig;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;
use crate::inbound::http::admin::{list_all_users, system_stats};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::root::home;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{user_dashboard, user_profile};
use crate::middleware::{RequireAdmin, Trace};

/// State and switches shared by every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    /// Probe flags served by `/health/*`.
    pub health_state: web::Data<HealthState>,
    /// Settings and ports resolved by extractors and handlers.
    pub http_state: web::Data<HttpState>,
    /// Mount Swagger UI and the OpenAPI document.
    pub docs_enabled: bool,
}

/// Assemble the application with all routes and middleware.
///
/// Tests call this with an [`HttpState`] built from doubles to override any
/// dependency for the duration of one app instance.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        docs_enabled,
    } = deps;

    let users = web::scope("/users")
        .service(user_profile)
        .service(user_dashboard);

    let admin = web::scope("/admin")
        .wrap(RequireAdmin)
        .service(system_stats)
        .service(list_all_users);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(home)
        .service(users)
        .service(admin)
        .service(ready)
        .service(live)
        .configure(|cfg| {
            if docs_enabled {
                cfg.service(
                    SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
                );
            }
        })
}

/// A running server together with the address it actually bound.
pub struct BoundServer {
    /// Server future; await it to drive the listener.
    pub server: Server,
    /// Address the listener bound, with the OS-assigned port resolved.
    pub local_addr: SocketAddr,
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Ports are wired to the fixture adapters. Readiness is flagged once the
/// listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<BoundServer> {
    let ServerConfig {
        bind_addr,
        settings,
        docs_enabled,
    } = config;

    let http_state = web::Data::new(HttpState::with_fixtures(settings));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            docs_enabled,
        })
    })
    .bind(bind_addr)?;

    let local_addr = server.addrs().first().copied().unwrap_or(bind_addr);
    let server = server.run();

    health_state.mark_ready();
    info!(%local_addr, docs_enabled, "server bound");
    Ok(BoundServer { server, local_addr })
}
