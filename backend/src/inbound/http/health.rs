//! Orchestration probes.
//!
//! ```text
//! GET /health/ready
//! GET /health/live
//! ```
//!
//! Both answer with a small JSON report and `Cache-Control: no-store`.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Which probe is being answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Probe {
    /// The server is bound and can take traffic.
    Readiness,
    /// The process should keep running.
    Liveness,
}

/// Outcome of a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// The probe passed.
    Ok,
    /// The probe failed.
    Unavailable,
}

/// Body returned by both probes, e.g. `{"probe": "readiness", "status": "ok"}`.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct ProbeReport {
    /// Probe answered.
    pub probe: Probe,
    /// Probe outcome.
    pub status: ProbeStatus,
}

/// Readiness and liveness flags shared by every worker.
///
/// Starts not ready and alive. The server marks it ready once the listener
/// is bound.
#[derive(Debug)]
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Create state that is not yet ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness from now on, e.g. while draining.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    /// Evaluate a probe against the current flags.
    #[must_use]
    pub fn check(&self, probe: Probe) -> ProbeStatus {
        let flag = match probe {
            Probe::Readiness => &self.ready,
            Probe::Liveness => &self.live,
        };
        if flag.load(Ordering::Acquire) {
            ProbeStatus::Ok
        } else {
            ProbeStatus::Unavailable
        }
    }

    fn respond(&self, probe: Probe) -> HttpResponse {
        let status = self.check(probe);
        let code = match status {
            ProbeStatus::Ok => StatusCode::OK,
            ProbeStatus::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        };
        HttpResponse::build(code)
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(ProbeReport { probe, status })
    }
}

/// Readiness probe. 200 once the server is bound; 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = ProbeReport),
        (status = 503, description = "Server is not ready", body = ProbeReport)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(Probe::Readiness)
}

/// Liveness probe. 200 while alive; 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive", body = ProbeReport),
        (status = 503, description = "Server is shutting down", body = ProbeReport)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(Probe::Liveness)
}
