//! Users API handlers.
//!
//! ```text
//! GET /users/profile
//! GET /users/dashboard   (Authorization: admin-token-123)
//! ```

use actix_web::{get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, Role, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dependencies::{AdminUser, CurrentUser};
use crate::inbound::http::state::HttpState;

/// Response payload for `GET /users/profile`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// Application name from settings.
    #[schema(example = "DI Demo App")]
    pub app: String,
    /// Application version from settings.
    #[schema(example = "1.0.0")]
    pub version: String,
    /// Directory entry for the current user, `null` when the directory has
    /// no such user.
    pub profile: Option<UserRecord>,
}

/// Response payload for `GET /users/dashboard`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    /// Greeting addressed to the admin.
    #[schema(example = "Welcome to admin dashboard, admin!")]
    pub message: String,
    /// Role of the caller.
    pub role: Role,
    /// Number of users in the directory.
    pub total_users: usize,
    /// Usernames of every user in the directory.
    pub all_users: Vec<String>,
}

/// Current user's profile.
///
/// Resolves three dependencies: the current user, the application settings,
/// and the user directory.
#[utoipa::path(
    get,
    path = "/users/profile",
    responses(
        (status = 200, description = "Profile of the current user", body = ProfileResponse),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "userProfile"
)]
#[get("/profile")]
pub async fn user_profile(
    CurrentUser(user): CurrentUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let profile = state.users.find_user(&user.username).await?;
    Ok(web::Json(ProfileResponse {
        app: state.settings.app_name.clone(),
        version: state.settings.version.clone(),
        profile,
    }))
}

/// Admin dashboard.
///
/// Requires an admin token; the admin check depends on token verification,
/// which depends on the `Authorization` header.
#[utoipa::path(
    get,
    path = "/users/dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardResponse),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Admin privileges required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "userDashboard",
    security(("AuthorizationHeader" = []))
)]
#[get("/dashboard")]
pub async fn user_dashboard(
    AdminUser(admin): AdminUser,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<DashboardResponse>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(DashboardResponse {
        message: format!("Welcome to admin dashboard, {}!", admin.username),
        role: admin.role,
        total_users: users.len(),
        all_users: users
            .into_iter()
            .map(|record| record.username.into())
            .collect(),
    }))
}
