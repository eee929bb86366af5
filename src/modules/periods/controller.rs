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

use super::model::{CreatePeriodDto, Period, UpdatePeriodDto};
use super::service::PeriodService;

#[utoipa::path(
    post,
    path = "/api/period/create",
    request_body = CreatePeriodDto,
    responses(
        (status = 201, description = "Period scheduled", body = Period),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class, subject or teacher not found"),
        (status = 409, description = "Teacher already booked in the window")
    ),
    security(("bearer_auth" = [])),
    tag = "Periods"
)]
#[instrument(skip(state, dto))]
pub async fn create_period(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreatePeriodDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let period = PeriodService::create(&state.db, dto, auth_user.school_id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Period created successfully",
            "data": period,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/period/fetch-all",
    responses(
        (status = 200, description = "Periods in the caller's school", body = [Period]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Periods"
)]
#[instrument(skip(state))]
pub async fn fetch_periods(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let periods = PeriodService::get_all(&state.db, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": periods })))
}

#[utoipa::path(
    get,
    path = "/api/period/fetch-teacher/{teacher_id}",
    params(("teacher_id" = Uuid, Path, description = "Teacher id")),
    responses(
        (status = 200, description = "Periods taught by the teacher", body = [Period]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Periods"
)]
#[instrument(skip(state))]
pub async fn fetch_teacher_periods(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(teacher_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let periods =
        PeriodService::get_by_teacher(&state.db, teacher_id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": periods })))
}

#[utoipa::path(
    get,
    path = "/api/period/fetch-class/{class_id}",
    params(("class_id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Periods scheduled for the class", body = [Period]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Periods"
)]
#[instrument(skip(state))]
pub async fn fetch_class_periods(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let periods = PeriodService::get_by_class(&state.db, class_id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": periods })))
}

#[utoipa::path(
    get,
    path = "/api/period/fetch-single/{id}",
    params(("id" = Uuid, Path, description = "Period id")),
    responses(
        (status = 200, description = "Period record", body = Period),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Periods"
)]
#[instrument(skip(state))]
pub async fn fetch_period(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let period = PeriodService::get_by_id(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": period })))
}

#[utoipa::path(
    patch,
    path = "/api/period/update/{id}",
    params(("id" = Uuid, Path, description = "Period id")),
    request_body = UpdatePeriodDto,
    responses(
        (status = 200, description = "Period updated", body = Period),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Periods"
)]
#[instrument(skip(state, dto))]
pub async fn update_period(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdatePeriodDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let period = PeriodService::update(&state.db, id, auth_user.school_id(), dto).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Period updated successfully",
        "data": period,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/period/delete/{id}",
    params(("id" = Uuid, Path, description = "Period id")),
    responses(
        (status = 200, description = "Period deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Periods"
)]
#[instrument(skip(state))]
pub async fn delete_period(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    PeriodService::delete(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Period deleted successfully",
    })))
}
