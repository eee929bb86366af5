use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Absent => "Absent",
        }
    }
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub school_id: Uuid,
    pub student_id: Uuid,
    pub class_id: Uuid,
    pub date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MarkAttendanceDto {
    pub class_id: Uuid,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "at least one entry is required"))]
    pub entries: Vec<AttendanceEntry>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceEntry {
    pub student_id: Uuid,
    pub status: AttendanceStatus,
}

#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceSummary {
    pub total: i64,
    pub present: i64,
    pub percentage: f64,
}
