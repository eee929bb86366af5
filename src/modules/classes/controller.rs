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

use super::model::{AssignmentDto, Class, ClassWithAssignments, CreateClassDto, UpdateClassDto};
use super::service::ClassService;

#[utoipa::path(
    post,
    path = "/api/class/create",
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = Class),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn create_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let class = ClassService::create(&state.db, dto, auth_user.school_id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Class created successfully",
            "data": class,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/class/fetch-all",
    responses(
        (status = 200, description = "Classes in the caller's school", body = [Class]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn fetch_classes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let classes = ClassService::get_all(&state.db, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": classes })))
}

#[utoipa::path(
    get,
    path = "/api/class/fetch-single/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class with its subject/teacher assignments", body = ClassWithAssignments),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn fetch_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let class = ClassService::get_by_id(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({ "success": true, "data": class })))
}

#[utoipa::path(
    get,
    path = "/api/class/attendee",
    responses(
        (status = 200, description = "Classes the calling teacher takes attendance for", body = [Class]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn fetch_attendee_classes(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<serde_json::Value>, AppError> {
    let classes = ClassService::get_attendee_classes(
        &state.db,
        auth_user.principal_id()?,
        auth_user.school_id(),
    )
    .await?;
    Ok(Json(json!({ "success": true, "data": classes })))
}

#[utoipa::path(
    patch,
    path = "/api/class/update/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated", body = Class),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn update_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let class = ClassService::update(&state.db, id, auth_user.school_id(), dto).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Class updated successfully",
        "data": class,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/class/delete/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Students, examinations or periods still reference the class")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    ClassService::delete(&state.db, id, auth_user.school_id()).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Class deleted successfully",
    })))
}

#[utoipa::path(
    post,
    path = "/api/class/sub-teach/new/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    request_body = AssignmentDto,
    responses(
        (status = 201, description = "Subject/teacher assigned to the class"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Class, subject or teacher not found"),
        (status = 409, description = "Pair already assigned")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn add_class_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignmentDto>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let assignment =
        ClassService::add_assignment(&state.db, id, auth_user.school_id(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Subject and teacher assigned successfully",
            "data": assignment,
        })),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/class/sub-teach/update/{class_id}/{assignment_id}",
    params(
        ("class_id" = Uuid, Path, description = "Class id"),
        ("assignment_id" = Uuid, Path, description = "Assignment id")
    ),
    request_body = AssignmentDto,
    responses(
        (status = 200, description = "Assignment updated"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, dto))]
pub async fn update_class_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((class_id, assignment_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<AssignmentDto>,
) -> Result<Json<serde_json::Value>, AppError> {
    let assignment = ClassService::update_assignment(
        &state.db,
        class_id,
        assignment_id,
        auth_user.school_id(),
        dto,
    )
    .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Assignment updated successfully",
        "data": assignment,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/class/sub-teach/delete/{class_id}/{assignment_id}",
    params(
        ("class_id" = Uuid, Path, description = "Class id"),
        ("assignment_id" = Uuid, Path, description = "Assignment id")
    ),
    responses(
        (status = 200, description = "Assignment removed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state))]
pub async fn delete_class_assignment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((class_id, assignment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    ClassService::delete_assignment(&state.db, class_id, assignment_id, auth_user.school_id())
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Assignment removed successfully",
    })))
}
