use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub school_id: Uuid,
    pub class_text: String,
    pub class_num: Option<i32>,
    /// Teacher responsible for taking attendance in this class.
    pub attendee: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A subject/teacher pairing attached to a class.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct ClassAssignment {
    pub id: Uuid,
    pub school_id: Uuid,
    pub class_id: Uuid,
    pub subject_id: Uuid,
    pub teacher_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassWithAssignments {
    #[serde(flatten)]
    pub class: Class,
    pub sub_teach: Vec<ClassAssignment>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClassDto {
    #[validate(length(min = 1, message = "class_text is required"))]
    pub class_text: String,
    pub class_num: Option<i32>,
}

/// Allow-list of updatable fields.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateClassDto {
    #[validate(length(min = 1, message = "class_text cannot be empty"))]
    pub class_text: Option<String>,
    pub class_num: Option<i32>,
    pub attendee: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignmentDto {
    pub subject_id: Uuid,
    pub teacher_id: Uuid,
}
