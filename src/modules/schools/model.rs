use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A school is both a business entity and the tenant boundary: every other
/// record in the system carries this row's id as its `school_id`.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct School {
    pub id: Uuid,
    pub school_name: String,
    pub owner_name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Gallery listing entry. Contact and owner details stay private.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct SchoolPublic {
    pub school_name: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterSchoolDto {
    #[validate(length(min = 1, message = "school_name is required"))]
    pub school_name: String,
    #[validate(length(min = 1, message = "owner_name is required"))]
    pub owner_name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub image_url: Option<String>,
}

/// Allow-list of updatable fields. Email and password changes are not part
/// of the profile update flow.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSchoolDto {
    #[validate(length(min = 1, message = "school_name cannot be empty"))]
    pub school_name: Option<String>,
    #[validate(length(min = 1, message = "owner_name cannot be empty"))]
    pub owner_name: Option<String>,
    pub image_url: Option<String>,
}
