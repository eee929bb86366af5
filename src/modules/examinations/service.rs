use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateExaminationDto, Examination, UpdateExaminationDto};

const EXAM_COLUMNS: &str =
    "id, school_id, class_id, subject_id, exam_date, exam_type, created_at";

pub struct ExaminationService;

impl ExaminationService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreateExaminationDto,
        school_id: Uuid,
    ) -> Result<Examination, AppError> {
        Self::check_ref(db, "classes", dto.class_id, school_id, "Class not found").await?;
        Self::check_ref(db, "subjects", dto.subject_id, school_id, "Subject not found").await?;

        let exam = sqlx::query_as::<_, Examination>(&format!(
            "INSERT INTO examinations (school_id, class_id, subject_id, exam_date, exam_type)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {EXAM_COLUMNS}"
        ))
        .bind(school_id)
        .bind(dto.class_id)
        .bind(dto.subject_id)
        .bind(dto.exam_date)
        .bind(&dto.exam_type)
        .fetch_one(db)
        .await?;

        Ok(exam)
    }

    #[instrument(skip(db))]
    pub async fn get_all(db: &PgPool, school_id: Uuid) -> Result<Vec<Examination>, AppError> {
        let exams = sqlx::query_as::<_, Examination>(&format!(
            "SELECT {EXAM_COLUMNS} FROM examinations
             WHERE school_id = $1
             ORDER BY exam_date"
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(exams)
    }

    #[instrument(skip(db))]
    pub async fn get_by_class(
        db: &PgPool,
        class_id: Uuid,
        school_id: Uuid,
    ) -> Result<Vec<Examination>, AppError> {
        let exams = sqlx::query_as::<_, Examination>(&format!(
            "SELECT {EXAM_COLUMNS} FROM examinations
             WHERE class_id = $1 AND school_id = $2
             ORDER BY exam_date"
        ))
        .bind(class_id)
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(exams)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(
        db: &PgPool,
        id: Uuid,
        school_id: Uuid,
    ) -> Result<Examination, AppError> {
        sqlx::query_as::<_, Examination>(&format!(
            "SELECT {EXAM_COLUMNS} FROM examinations WHERE id = $1 AND school_id = $2"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Examination not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        school_id: Uuid,
        dto: UpdateExaminationDto,
    ) -> Result<Examination, AppError> {
        let existing = Self::get_by_id(db, id, school_id).await?;

        if let Some(subject_id) = dto.subject_id {
            Self::check_ref(db, "subjects", subject_id, school_id, "Subject not found").await?;
        }

        let subject_id = dto.subject_id.unwrap_or(existing.subject_id);
        let exam_date = dto.exam_date.unwrap_or(existing.exam_date);
        let exam_type = dto.exam_type.unwrap_or(existing.exam_type);

        let exam = sqlx::query_as::<_, Examination>(&format!(
            "UPDATE examinations
             SET subject_id = $1, exam_date = $2, exam_type = $3
             WHERE id = $4 AND school_id = $5
             RETURNING {EXAM_COLUMNS}"
        ))
        .bind(subject_id)
        .bind(exam_date)
        .bind(&exam_type)
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Examination not found"))?;

        Ok(exam)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM examinations WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Examination not found"));
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
