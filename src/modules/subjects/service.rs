use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateSubjectDto, Subject, UpdateSubjectDto};

const SUBJECT_COLUMNS: &str = "id, school_id, subject_name, subject_codename, created_at";

pub struct SubjectService;

impl SubjectService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreateSubjectDto,
        school_id: Uuid,
    ) -> Result<Subject, AppError> {
        let subject = sqlx::query_as::<_, Subject>(&format!(
            "INSERT INTO subjects (school_id, subject_name, subject_codename)
             VALUES ($1, $2, $3)
             RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(school_id)
        .bind(&dto.subject_name)
        .bind(&dto.subject_codename)
        .fetch_one(db)
        .await?;

        Ok(subject)
    }

    #[instrument(skip(db))]
    pub async fn get_all(db: &PgPool, school_id: Uuid) -> Result<Vec<Subject>, AppError> {
        let subjects = sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects
             WHERE school_id = $1
             ORDER BY subject_name"
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(subjects)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<Subject, AppError> {
        sqlx::query_as::<_, Subject>(&format!(
            "SELECT {SUBJECT_COLUMNS} FROM subjects WHERE id = $1 AND school_id = $2"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Subject not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        school_id: Uuid,
        dto: UpdateSubjectDto,
    ) -> Result<Subject, AppError> {
        let existing = Self::get_by_id(db, id, school_id).await?;

        let subject_name = dto.subject_name.unwrap_or(existing.subject_name);
        let subject_codename = dto.subject_codename.unwrap_or(existing.subject_codename);

        let subject = sqlx::query_as::<_, Subject>(&format!(
            "UPDATE subjects
             SET subject_name = $1, subject_codename = $2
             WHERE id = $3 AND school_id = $4
             RETURNING {SUBJECT_COLUMNS}"
        ))
        .bind(&subject_name)
        .bind(&subject_codename)
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Subject not found"))?;

        Ok(subject)
    }

    /// Refuses to delete a subject still referenced by examinations,
    /// periods, or class assignments.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<(), AppError> {
        let dependents = sqlx::query_scalar::<_, i64>(
            "SELECT (SELECT COUNT(*) FROM examinations WHERE subject_id = $1 AND school_id = $2)
                  + (SELECT COUNT(*) FROM periods WHERE subject_id = $1 AND school_id = $2)
                  + (SELECT COUNT(*) FROM class_assignments WHERE subject_id = $1 AND school_id = $2)",
        )
        .bind(id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if dependents > 0 {
            return Err(AppError::conflict(
                "Cannot delete subject. Examinations, periods or class assignments still reference it",
            ));
        }

        let result = sqlx::query("DELETE FROM subjects WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Subject not found"));
        }

        Ok(())
    }
}
