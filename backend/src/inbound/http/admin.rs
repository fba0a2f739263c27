//! Admin API handlers.
//!
//! ```text
//! GET /admin/stats        (Authorization: admin-token-123)
//! GET /admin/users/list   (Authorization: admin-token-123)
//! ```
//!
//! None of these handlers ask for an admin themselves: the `/admin` scope is
//! wrapped in [`RequireAdmin`](crate::middleware::RequireAdmin), which
//! resolves the admin check before any of them run.

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, UserRecord, UserStats};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Response payload for `GET /admin/users/list`.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    /// Every user in the directory, ordered by username.
    pub users: Vec<UserRecord>,
    /// Number of users returned.
    pub count: usize,
}

/// System statistics.
#[utoipa::path(
    get,
    path = "/admin/stats",
    responses(
        (status = 200, description = "User counts", body = UserStats),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Admin privileges required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "systemStats",
    security(("AuthorizationHeader" = []))
)]
#[get("/stats")]
pub async fn system_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<UserStats>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(UserStats::from_records(&users)))
}

/// List every user in the directory.
#[utoipa::path(
    get,
    path = "/admin/users/list",
    responses(
        (status = 200, description = "All users", body = UserListResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Admin privileges required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listAllUsers",
    security(("AuthorizationHeader" = []))
)]
#[get("/users/list")]
pub async fn list_all_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UserListResponse>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(UserListResponse {
        count: users.len(),
        users,
    }))
}
