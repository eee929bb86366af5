use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateExaminationDto, Examination, UpdateExaminationDto};
use super::service::ExaminationService;

#[utoipa::path(
    post,
    path = "/api/examination/create",
    request_body = CreateExaminationDto,
    responses(
        (status = 201, description = "Examination scheduled", body = Examination),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class or subject not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Examinations"
)]
#[instrument(skip(state, dto))]
pub async fn create_examination(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateExaminationDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let exam = ExaminationService::create(&state.db, dto, auth_user.school_id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Examination created successfully",
            "data": exam,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/examination/fetch-all",
    responses(
        (status = 200, description = "Examinations in the caller's school", body = [Examination]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Examinations"
)]
#[instrument(skip(state))]
pub async fn fetch_examinations(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let exams = ExaminationService::get_all(&state.db, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": exams })))
}

#[utoipa::path(
    get,
    path = "/api/examination/fetch-class/{class_id}",
    params(("class_id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Examinations scheduled for the class", body = [Examination]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Examinations"
)]
#[instrument(skip(state))]
pub async fn fetch_class_examinations(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let exams =
        ExaminationService::get_by_class(&state.db, class_id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": exams })))
}

#[utoipa::path(
    get,
    path = "/api/examination/fetch-single/{id}",
    params(("id" = Uuid, Path, description = "Examination id")),
    responses(
        (status = 200, description = "Examination record", body = Examination),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Examinations"
)]
#[instrument(skip(state))]
pub async fn fetch_examination(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let exam = ExaminationService::get_by_id(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": exam })))
}

#[utoipa::path(
    patch,
    path = "/api/examination/update/{id}",
    params(("id" = Uuid, Path, description = "Examination id")),
    request_body = UpdateExaminationDto,
    responses(
        (status = 200, description = "Examination updated", body = Examination),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Examinations"
)]
#[instrument(skip(state, dto))]
pub async fn update_examination(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateExaminationDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let exam = ExaminationService::update(&state.db, id, auth_user.school_id(), dto).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Examination updated successfully",
        "data": exam,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/examination/delete/{id}",
    params(("id" = Uuid, Path, description = "Examination id")),
    responses(
        (status = 200, description = "Examination deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Examinations"
)]
#[instrument(skip(state))]
pub async fn delete_examination(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    ExaminationService::delete(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Examination deleted successfully",
    })))
}
