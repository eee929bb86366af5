//! Role-gating middleware.
//!
//! There is exactly one implementation of the role check ([`require_roles`]);
//! the named wrappers below are the only way routes attach it, so every route
//! registration states its allowed role set explicitly. An empty set means
//! "any authenticated principal" and is used by sign-out and is-login.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// The three principal roles. Serialized in the wire format the SPA expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    #[serde(rename = "SCHOOL")]
    School,
    #[serde(rename = "TEACHER")]
    Teacher,
    #[serde(rename = "STUDENT")]
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::School => "SCHOOL",
            UserRole::Teacher => "TEACHER",
            UserRole::Student => "STUDENT",
        }
    }
}

/// Whether `role` is admitted by `allowed`. An empty slice admits every role.
pub fn role_allowed(role: UserRole, allowed: &[UserRole]) -> bool {
    allowed.is_empty() || allowed.contains(&role)
}

/// Verifies the token, checks the principal's role against `allowed_roles`,
/// and forwards the request. 401 when authentication fails, 403 when the
/// role is not in a non-empty set.
pub async fn require_roles(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    allowed_roles: Vec<UserRole>,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;

    if !role_allowed(auth_user.role(), &allowed_roles) {
        return Err(AppError::forbidden("Access denied"));
    }

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

pub async fn require_school(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::School]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Teacher]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_student(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_roles(State(state), req, next, vec![UserRole::Student]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_school_or_teacher(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_roles(
        State(state),
        req,
        next,
        vec![UserRole::School, UserRole::Teacher],
    )
    .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_school_or_student(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_roles(
        State(state),
        req,
        next,
        vec![UserRole::School, UserRole::Student],
    )
    .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

pub async fn require_any_school_role(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_roles(
        State(state),
        req,
        next,
        vec![UserRole::School, UserRole::Teacher, UserRole::Student],
    )
    .await
    {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Any authenticated principal, regardless of role.
pub async fn require_authenticated(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    match require_roles(State(state), req, next, vec![]).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_allowed_exact_match() {
        assert!(role_allowed(UserRole::School, &[UserRole::School]));
        assert!(role_allowed(
            UserRole::Teacher,
            &[UserRole::School, UserRole::Teacher]
        ));
    }

    #[test]
    fn role_allowed_rejects_other_roles() {
        assert!(!role_allowed(UserRole::Student, &[UserRole::School]));
        assert!(!role_allowed(
            UserRole::Student,
            &[UserRole::School, UserRole::Teacher]
        ));
    }

    #[test]
    fn empty_set_admits_any_role() {
        assert!(role_allowed(UserRole::School, &[]));
        assert!(role_allowed(UserRole::Teacher, &[]));
        assert!(role_allowed(UserRole::Student, &[]));
    }

    #[test]
    fn wire_format_round_trip() {
        for (role, tag) in [
            (UserRole::School, "\"SCHOOL\""),
            (UserRole::Teacher, "\"TEACHER\""),
            (UserRole::Student, "\"STUDENT\""),
        ] {
            assert_eq!(serde_json::to_string(&role).unwrap(), tag);
            let parsed: UserRole = serde_json::from_str(tag).unwrap();
            assert_eq!(parsed, role);
        }
    }
}
