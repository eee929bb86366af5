use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub school_id: Uuid,
    pub class_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub guardian: Option<String>,
    pub guardian_phone: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterStudentDto {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub class_id: Option<Uuid>,
    pub guardian: Option<String>,
    pub guardian_phone: Option<String>,
    #[validate(range(min = 3, max = 100, message = "age is out of range"))]
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub image_url: Option<String>,
}

/// Allow-list of updatable fields; anything not named here cannot be written
/// through the update endpoint.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,
    pub class_id: Option<Uuid>,
    pub guardian: Option<String>,
    pub guardian_phone: Option<String>,
    #[validate(range(min = 3, max = 100, message = "age is out of range"))]
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentQueryParams {
    /// Case-insensitive name substring filter.
    pub search: Option<String>,
    /// Restrict to one class.
    pub class_id: Option<Uuid>,
}
