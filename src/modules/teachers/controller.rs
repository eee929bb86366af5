use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::modules::schools::controller::login_response;
use crate::modules::session::model::{LoginRequest, LoginResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{RegisterTeacherDto, Teacher, TeacherQueryParams, UpdateTeacherDto};
use super::service::TeacherService;

#[utoipa::path(
    post,
    path = "/api/teacher/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token in Authorization header", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn login_teacher(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let (token, user) = TeacherService::login(&state.db, dto, &state.jwt_config).await?;
    login_response(token, user)
}

#[utoipa::path(
    post,
    path = "/api/teacher/register",
    request_body = RegisterTeacherDto,
    responses(
        (status = 201, description = "Teacher registered", body = Teacher),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn register_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<RegisterTeacherDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let teacher = TeacherService::register(&state.db, dto, auth_user.school_id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Teacher registered successfully",
            "data": teacher,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/teacher/fetch-with-query",
    params(TeacherQueryParams),
    responses(
        (status = 200, description = "Teachers in the caller's school", body = [Teacher]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn fetch_teachers_with_query(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<TeacherQueryParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let teachers =
        TeacherService::get_with_query(&state.db, auth_user.school_id(), &params).await?;
    Ok(Json(json!({ "success": true, "data": teachers })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/fetch-own",
    responses(
        (status = 200, description = "Own record", body = Teacher),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn fetch_own_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let teacher =
        TeacherService::get_by_id(&state.db, auth_user.principal_id()?, auth_user.school_id())
            .await?;
    Ok(Json(json!({ "success": true, "data": teacher })))
}

#[utoipa::path(
    get,
    path = "/api/teacher/fetch-single/{id}",
    params(("id" = Uuid, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Teacher record", body = Teacher),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn fetch_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let teacher = TeacherService::get_by_id(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": teacher })))
}

#[utoipa::path(
    patch,
    path = "/api/teacher/update/{id}",
    params(("id" = Uuid, Path, description = "Teacher id")),
    request_body = UpdateTeacherDto,
    responses(
        (status = 200, description = "Teacher updated", body = Teacher),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email already in use")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state, dto))]
pub async fn update_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateTeacherDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let teacher = TeacherService::update(&state.db, id, auth_user.school_id(), dto).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Teacher updated successfully",
        "data": teacher,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/teacher/delete/{id}",
    params(("id" = Uuid, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Teacher deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Teacher still assigned to classes or periods")
    ),
    security(("bearer_auth" = [])),
    tag = "Teachers"
)]
#[instrument(skip(state))]
pub async fn delete_teacher(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    TeacherService::delete(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Teacher deleted successfully",
    })))
}
