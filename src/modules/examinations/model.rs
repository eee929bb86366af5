use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Examination {
    pub id: Uuid,
    pub school_id: Uuid,
    pub class_id: Uuid,
    pub subject_id: Uuid,
    pub exam_date: NaiveDate,
    pub exam_type: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateExaminationDto {
    pub class_id: Uuid,
    pub subject_id: Uuid,
    pub exam_date: NaiveDate,
    #[validate(length(min = 1, message = "exam_type is required"))]
    pub exam_type: String,
}

/// Allow-list of updatable fields.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateExaminationDto {
    pub subject_id: Option<Uuid>,
    pub exam_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "exam_type cannot be empty"))]
    pub exam_type: Option<String>,
}
