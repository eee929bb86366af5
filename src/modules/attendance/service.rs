use sqlx::{PgPool, QueryBuilder};
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{AttendanceRecord, AttendanceSummary, MarkAttendanceDto};

const RECORD_COLUMNS: &str =
    "id, school_id, student_id, class_id, date, status, created_at";

pub struct AttendanceService;

impl AttendanceService {
    /// Records attendance for a whole class on one date in a single
    /// multi-row INSERT. Taking attendance twice for the same class and
    /// date is rejected.
    #[instrument(skip(db, dto))]
    pub async fn mark(
        db: &PgPool,
        dto: MarkAttendanceDto,
        school_id: Uuid,
    ) -> Result<u64, AppError> {
        let class = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM classes WHERE id = $1 AND school_id = $2",
        )
        .bind(dto.class_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?;

        if class.is_none() {
            return Err(AppError::not_found("Class not found"));
        }

        let already_taken = Self::is_taken(db, dto.class_id, school_id, dto.date).await?;
        if already_taken {
            return Err(AppError::conflict(
                "Attendance has already been taken for this class today",
            ));
        }

        let mut builder = QueryBuilder::new(
            "INSERT INTO attendance_records (school_id, student_id, class_id, date, status) ",
        );
        builder.push_values(dto.entries.iter(), |mut row, entry| {
            row.push_bind(school_id)
                .push_bind(entry.student_id)
                .push_bind(dto.class_id)
                .push_bind(dto.date)
                .push_bind(entry.status.as_str());
        });

        let result = builder.build().execute(db).await?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(db))]
    pub async fn get_for_student(
        db: &PgPool,
        student_id: Uuid,
        school_id: Uuid,
    ) -> Result<Vec<AttendanceRecord>, AppError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM attendance_records
             WHERE student_id = $1 AND school_id = $2
             ORDER BY date DESC"
        ))
        .bind(student_id)
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(records)
    }

    /// Whether attendance has been taken for the class on the given date.
    #[instrument(skip(db))]
    pub async fn is_taken(
        db: &PgPool,
        class_id: Uuid,
        school_id: Uuid,
        date: chrono::NaiveDate,
    ) -> Result<bool, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM attendance_records
             WHERE class_id = $1 AND school_id = $2 AND date = $3",
        )
        .bind(class_id)
        .bind(school_id)
        .bind(date)
        .fetch_one(db)
        .await?;

        Ok(count > 0)
    }

    #[instrument(skip(db))]
    pub async fn summary(
        db: &PgPool,
        student_id: Uuid,
        school_id: Uuid,
    ) -> Result<AttendanceSummary, AppError> {
        let (total, present) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'Present')
             FROM attendance_records
             WHERE student_id = $1 AND school_id = $2",
        )
        .bind(student_id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        Ok(AttendanceSummary {
            total,
            present,
            percentage: attendance_percentage(present, total),
        })
    }
}

fn attendance_percentage(present: i64, total: i64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (present as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_handles_empty_history() {
        assert_eq!(attendance_percentage(0, 0), 0.0);
        assert_eq!(attendance_percentage(3, 4), 75.0);
        assert_eq!(attendance_percentage(5, 5), 100.0);
    }
}
