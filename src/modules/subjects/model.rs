use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Subject {
    pub id: Uuid,
    pub school_id: Uuid,
    pub subject_name: String,
    pub subject_codename: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSubjectDto {
    #[validate(length(min = 1, message = "subject_name is required"))]
    pub subject_name: String,
    #[validate(length(min = 1, message = "subject_codename is required"))]
    pub subject_codename: String,
}

/// Allow-list of updatable fields.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSubjectDto {
    #[validate(length(min = 1, message = "subject_name cannot be empty"))]
    pub subject_name: Option<String>,
    #[validate(length(min = 1, message = "subject_codename cannot be empty"))]
    pub subject_codename: Option<String>,
}
