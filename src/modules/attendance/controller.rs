use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{AttendanceRecord, AttendanceSummary, MarkAttendanceDto};
use super::service::AttendanceService;

#[utoipa::path(
    post,
    path = "/api/attendance/mark",
    request_body = MarkAttendanceDto,
    responses(
        (status = 201, description = "Attendance recorded"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Class not found"),
        (status = 409, description = "Attendance already taken for this class and date")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state, dto))]
pub async fn mark_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<MarkAttendanceDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let recorded = AttendanceService::mark(&state.db, dto, auth_user.school_id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Attendance marked successfully",
            "data": { "recorded": recorded },
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/attendance/fetch/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Attendance history for the student", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn fetch_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let records =
        AttendanceService::get_for_student(&state.db, student_id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": records })))
}

#[utoipa::path(
    get,
    path = "/api/attendance/check/{class_id}",
    params(("class_id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Whether attendance was taken today"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn check_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(class_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let today = Utc::now().date_naive();
    let taken =
        AttendanceService::is_taken(&state.db, class_id, auth_user.school_id(), today).await?;
    Ok(Json(json!({ "success": true, "data": { "attendance_taken": taken } })))
}

#[utoipa::path(
    get,
    path = "/api/attendance/summary/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Present/total counts and percentage", body = AttendanceSummary),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
#[instrument(skip(state))]
pub async fn attendance_summary(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(student_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let summary =
        AttendanceService::summary(&state.db, student_id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": summary })))
}
