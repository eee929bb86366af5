use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Notice {
    pub id: Uuid,
    pub school_id: Uuid,
    pub title: String,
    pub message: String,
    /// Lowercase role names the notice is addressed to.
    pub audience: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNoticeDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
    /// "student", "teacher", or "all".
    #[validate(length(min = 1, message = "audience is required"))]
    pub audience: String,
}

/// Allow-list of updatable fields.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateNoticeDto {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "message cannot be empty"))]
    pub message: Option<String>,
    pub audience: Option<String>,
}
