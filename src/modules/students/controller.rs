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

use super::model::{RegisterStudentDto, Student, StudentQueryParams, UpdateStudentDto};
use super::service::StudentService;

#[utoipa::path(
    post,
    path = "/api/student/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, token in Authorization header", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn login_student(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let (token, user) = StudentService::login(&state.db, dto, &state.jwt_config).await?;
    login_response(token, user)
}

#[utoipa::path(
    post,
    path = "/api/student/register",
    request_body = RegisterStudentDto,
    responses(
        (status = 201, description = "Student registered", body = Student),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 409, description = "Email already exists")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn register_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<RegisterStudentDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let student = StudentService::register(&state.db, dto, auth_user.school_id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Student registered successfully",
            "data": student,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/student/fetch-with-query",
    params(StudentQueryParams),
    responses(
        (status = 200, description = "Students in the caller's school", body = [Student]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn fetch_students_with_query(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<StudentQueryParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let students =
        StudentService::get_with_query(&state.db, auth_user.school_id(), &params).await?;
    Ok(Json(json!({ "success": true, "data": students })))
}

#[utoipa::path(
    get,
    path = "/api/student/fetch-own",
    responses(
        (status = 200, description = "Own record", body = Student),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn fetch_own_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let student =
        StudentService::get_by_id(&state.db, auth_user.principal_id()?, auth_user.school_id())
            .await?;
    Ok(Json(json!({ "success": true, "data": student })))
}

#[utoipa::path(
    get,
    path = "/api/student/fetch-single/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student record", body = Student),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn fetch_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let student = StudentService::get_by_id(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": student })))
}

#[utoipa::path(
    patch,
    path = "/api/student/update/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, dto))]
pub async fn update_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let student = StudentService::update(&state.db, id, auth_user.school_id(), dto).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Student updated successfully",
        "data": student,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/student/delete/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    StudentService::delete(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Student deleted successfully",
    })))
}
