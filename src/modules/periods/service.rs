use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreatePeriodDto, Period, UpdatePeriodDto};

const PERIOD_COLUMNS: &str =
    "id, school_id, class_id, subject_id, teacher_id, start_time, end_time, created_at";

pub struct PeriodService;

impl PeriodService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreatePeriodDto,
        school_id: Uuid,
    ) -> Result<Period, AppError> {
        validate_window(dto.start_time, dto.end_time)?;
        Self::check_ref(db, "classes", dto.class_id, school_id, "Class not found").await?;
        Self::check_ref(db, "subjects", dto.subject_id, school_id, "Subject not found").await?;
        Self::check_ref(db, "teachers", dto.teacher_id, school_id, "Teacher not found").await?;

        // The teacher cannot be booked twice for overlapping windows.
        let clash = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM periods
             WHERE teacher_id = $1 AND school_id = $2
               AND start_time < $4 AND end_time > $3",
        )
        .bind(dto.teacher_id)
        .bind(school_id)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .fetch_optional(db)
        .await?;

        if clash.is_some() {
            return Err(AppError::conflict(
                "Teacher already has a period in this time window",
            ));
        }

        let period = sqlx::query_as::<_, Period>(&format!(
            "INSERT INTO periods
                 (school_id, class_id, subject_id, teacher_id, start_time, end_time)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {PERIOD_COLUMNS}"
        ))
        .bind(school_id)
        .bind(dto.class_id)
        .bind(dto.subject_id)
        .bind(dto.teacher_id)
        .bind(dto.start_time)
        .bind(dto.end_time)
        .fetch_one(db)
        .await?;

        Ok(period)
    }

    #[instrument(skip(db))]
    pub async fn get_all(db: &PgPool, school_id: Uuid) -> Result<Vec<Period>, AppError> {
        let periods = sqlx::query_as::<_, Period>(&format!(
            "SELECT {PERIOD_COLUMNS} FROM periods
             WHERE school_id = $1
             ORDER BY start_time"
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(periods)
    }

    #[instrument(skip(db))]
    pub async fn get_by_teacher(
        db: &PgPool,
        teacher_id: Uuid,
        school_id: Uuid,
    ) -> Result<Vec<Period>, AppError> {
        let periods = sqlx::query_as::<_, Period>(&format!(
            "SELECT {PERIOD_COLUMNS} FROM periods
             WHERE teacher_id = $1 AND school_id = $2
             ORDER BY start_time"
        ))
        .bind(teacher_id)
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(periods)
    }

    #[instrument(skip(db))]
    pub async fn get_by_class(
        db: &PgPool,
        class_id: Uuid,
        school_id: Uuid,
    ) -> Result<Vec<Period>, AppError> {
        let periods = sqlx::query_as::<_, Period>(&format!(
            "SELECT {PERIOD_COLUMNS} FROM periods
             WHERE class_id = $1 AND school_id = $2
             ORDER BY start_time"
        ))
        .bind(class_id)
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(periods)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<Period, AppError> {
        sqlx::query_as::<_, Period>(&format!(
            "SELECT {PERIOD_COLUMNS} FROM periods WHERE id = $1 AND school_id = $2"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Period not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        school_id: Uuid,
        dto: UpdatePeriodDto,
    ) -> Result<Period, AppError> {
        let existing = Self::get_by_id(db, id, school_id).await?;

        if let Some(subject_id) = dto.subject_id {
            Self::check_ref(db, "subjects", subject_id, school_id, "Subject not found").await?;
        }
        if let Some(teacher_id) = dto.teacher_id {
            Self::check_ref(db, "teachers", teacher_id, school_id, "Teacher not found").await?;
        }

        let subject_id = dto.subject_id.unwrap_or(existing.subject_id);
        let teacher_id = dto.teacher_id.unwrap_or(existing.teacher_id);
        let start_time = dto.start_time.unwrap_or(existing.start_time);
        let end_time = dto.end_time.unwrap_or(existing.end_time);

        validate_window(start_time, end_time)?;

        let period = sqlx::query_as::<_, Period>(&format!(
            "UPDATE periods
             SET subject_id = $1, teacher_id = $2, start_time = $3, end_time = $4
             WHERE id = $5 AND school_id = $6
             RETURNING {PERIOD_COLUMNS}"
        ))
        .bind(subject_id)
        .bind(teacher_id)
        .bind(start_time)
        .bind(end_time)
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Period not found"))?;

        Ok(period)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM periods WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Period not found"));
        }

        Ok(())
    }

    async fn check_ref(
        db: &PgPool,
        table: &str,
        id: Uuid,
        school_id: Uuid,
        missing: &str,
    ) -> Result<(), AppError> {
        let found = sqlx::query_scalar::<_, Uuid>(&format!(
            "SELECT id FROM {table} WHERE id = $1 AND school_id = $2"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?;

        if found.is_none() {
            return Err(AppError::not_found(missing));
        }

        Ok(())
    }
}

fn validate_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::unprocessable("end_time must be after start_time"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn window_rejects_reversed_and_zero_length() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();

        assert!(validate_window(start, end).is_ok());
        assert!(validate_window(end, start).is_err());
        assert!(validate_window(start, start).is_err());
    }
}
