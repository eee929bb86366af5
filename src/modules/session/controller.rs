//! Session endpoints shared by all three roles.
//!
//! Sign-out and is-login behave identically regardless of who calls them, so
//! each role router mounts these two handlers instead of carrying its own.

use axum::Json;
use axum::http::{HeaderValue, header};
use axum::response::IntoResponse;
use serde_json::json;

use crate::middleware::auth::AuthUser;
use crate::modules::session::model::MessageResponse;

/// Clears the client-visible `Authorization` header. Tokens are not revoked
/// server-side; a token the client keeps remains valid until it expires.
#[utoipa::path(
    post,
    path = "/api/{role}/sign-out",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Session"
)]
pub async fn sign_out(_auth_user: AuthUser) -> impl IntoResponse {
    (
        [(header::AUTHORIZATION, HeaderValue::from_static(""))],
        Json(MessageResponse::ok("Signed out successfully")),
    )
}

/// Echoes the decoded session claims so the SPA can restore its state.
#[utoipa::path(
    get,
    path = "/api/{role}/is-login",
    responses(
        (status = 200, description = "Decoded session claims"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Session"
)]
pub async fn is_login(auth_user: AuthUser) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "message": "Logged in",
        "data": auth_user.0,
    }))
}
