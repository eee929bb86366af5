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

use super::model::{CreateSubjectDto, Subject, UpdateSubjectDto};
use super::service::SubjectService;

#[utoipa::path(
    post,
    path = "/api/subject/create",
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = Subject),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, dto))]
pub async fn create_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let subject = SubjectService::create(&state.db, dto, auth_user.school_id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Subject created successfully",
            "data": subject,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/subject/fetch-all",
    responses(
        (status = 200, description = "Subjects in the caller's school", body = [Subject]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn fetch_subjects(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let subjects = SubjectService::get_all(&state.db, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": subjects })))
}

#[utoipa::path(
    get,
    path = "/api/subject/fetch-single/{id}",
    params(("id" = Uuid, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Subject record", body = Subject),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn fetch_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let subject = SubjectService::get_by_id(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": subject })))
}

#[utoipa::path(
    patch,
    path = "/api/subject/update/{id}",
    params(("id" = Uuid, Path, description = "Subject id")),
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated", body = Subject),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state, dto))]
pub async fn update_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let subject = SubjectService::update(&state.db, id, auth_user.school_id(), dto).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Subject updated successfully",
        "data": subject,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/subject/delete/{id}",
    params(("id" = Uuid, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Subject deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Examinations, periods or assignments still reference the subject")
    ),
    security(("bearer_auth" = [])),
    tag = "Subjects"
)]
#[instrument(skip(state))]
pub async fn delete_subject(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    SubjectService::delete(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Subject deleted successfully",
    })))
}
