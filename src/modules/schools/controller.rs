use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::modules::session::model::{LoginRequest, LoginResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{RegisterSchoolDto, School, SchoolPublic, UpdateSchoolDto};
use super::service::SchoolService;

/// Builds a login response with the token in the `Authorization` response
/// header, the shape the SPA expects from every role's login endpoint.
pub(crate) fn login_response(
    token: String,
    user: crate::modules::session::model::LoginUser,
) -> Result<Response, AppError> {
    let header_value = token
        .parse()
        .map_err(|_| AppError::internal(anyhow::anyhow!("token is not a valid header value")))?;

    let body = LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user,
    };

    let mut response = (StatusCode::OK, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::AUTHORIZATION, header_value);
    Ok(response)
}

#[utoipa::path(
    post,
    path = "/api/school/register",
    request_body = RegisterSchoolDto,
    responses(
        (status = 201, description = "School registered", body = School),
        (status = 409, description = "Email already exists"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Schools"
)]
#[instrument(skip(state, dto))]
pub async fn register_school(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterSchoolDto>,
) -> Result<(StatusCode, Json<School>), AppError> {
    let school = SchoolService::register(&state.db, dto).await?;
    Ok((StatusCode::CREATED, Json(school)))
}

#[utoipa::path(
    post,
    path = "/api/school/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token in Authorization header", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Schools"
)]
#[instrument(skip(state, dto))]
pub async fn login_school(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let (token, user) = SchoolService::login(&state.db, dto, &state.jwt_config).await?;
    login_response(token, user)
}

#[utoipa::path(
    get,
    path = "/api/school/gallery",
    responses((status = 200, description = "Public school listing", body = [SchoolPublic])),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn school_gallery(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let schools = SchoolService::gallery(&state.db).await?;
    Ok(Json(json!({ "success": true, "data": schools })))
}

#[utoipa::path(
    get,
    path = "/api/school/fetch-own",
    responses(
        (status = 200, description = "Own school record", body = School),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
#[instrument(skip(state))]
pub async fn fetch_own_school(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let school = SchoolService::get_own(&state.db, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": school })))
}

#[utoipa::path(
    patch,
    path = "/api/school/update",
    request_body = UpdateSchoolDto,
    responses(
        (status = 200, description = "School updated", body = School),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Schools"
)]
#[instrument(skip(state, dto))]
pub async fn update_school(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateSchoolDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let school = SchoolService::update(&state.db, auth_user.school_id(), dto).await?;
    Ok(Json(json!({
        "success": true,
        "message": "School updated successfully",
        "data": school,
    })))
}
