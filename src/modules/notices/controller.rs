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

use super::model::{CreateNoticeDto, Notice, UpdateNoticeDto};
use super::service::NoticeService;

#[utoipa::path(
    post,
    path = "/api/notices/add",
    request_body = CreateNoticeDto,
    responses(
        (status = 201, description = "Notice published", body = Notice),
        (status = 400, description = "Unknown audience"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state, dto))]
pub async fn add_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateNoticeDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let notice = NoticeService::create(&state.db, dto, auth_user.school_id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Notice added successfully",
            "data": notice,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/notices/fetch-all",
    responses(
        (status = 200, description = "All notices for the caller's school", body = [Notice]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state))]
pub async fn fetch_notices(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices = NoticeService::get_all(&state.db, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": notices })))
}

#[utoipa::path(
    get,
    path = "/api/notices/fetch/{audience}",
    params(("audience" = String, Path, description = "student or teacher")),
    responses(
        (status = 200, description = "Notices addressed to the audience", body = [Notice]),
        (status = 400, description = "Unknown audience"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state))]
pub async fn fetch_audience_notices(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(audience): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notices =
        NoticeService::get_for_audience(&state.db, &audience, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": notices })))
}

#[utoipa::path(
    patch,
    path = "/api/notices/update/{id}",
    params(("id" = Uuid, Path, description = "Notice id")),
    request_body = UpdateNoticeDto,
    responses(
        (status = 200, description = "Notice updated", body = Notice),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state, dto))]
pub async fn update_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateNoticeDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let notice = NoticeService::update(&state.db, id, auth_user.school_id(), dto).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Notice updated successfully",
        "data": notice,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/notices/delete/{id}",
    params(("id" = Uuid, Path, description = "Notice id")),
    responses(
        (status = 200, description = "Notice deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Notices"
)]
#[instrument(skip(state))]
pub async fn delete_notice(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    NoticeService::delete(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Notice deleted successfully",
    })))
}
