use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{
    AssignmentDto, Class, ClassAssignment, ClassWithAssignments, CreateClassDto, UpdateClassDto,
};

const CLASS_COLUMNS: &str = "id, school_id, class_text, class_num, attendee, created_at";
const ASSIGNMENT_COLUMNS: &str = "id, school_id, class_id, subject_id, teacher_id, created_at";

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreateClassDto,
        school_id: Uuid,
    ) -> Result<Class, AppError> {
        let class = sqlx::query_as::<_, Class>(&format!(
            "INSERT INTO classes (school_id, class_text, class_num)
             VALUES ($1, $2, $3)
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(school_id)
        .bind(&dto.class_text)
        .bind(dto.class_num)
        .fetch_one(db)
        .await?;

        Ok(class)
    }

    #[instrument(skip(db))]
    pub async fn get_all(db: &PgPool, school_id: Uuid) -> Result<Vec<Class>, AppError> {
        let classes = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes
             WHERE school_id = $1
             ORDER BY class_num NULLS LAST, class_text"
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(classes)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(
        db: &PgPool,
        id: Uuid,
        school_id: Uuid,
    ) -> Result<ClassWithAssignments, AppError> {
        let class = Self::fetch_class_row(db, id, school_id).await?;

        let sub_teach = sqlx::query_as::<_, ClassAssignment>(&format!(
            "SELECT {ASSIGNMENT_COLUMNS} FROM class_assignments
             WHERE class_id = $1 AND school_id = $2
             ORDER BY created_at"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(ClassWithAssignments { class, sub_teach })
    }

    /// Classes whose attendance the given teacher is responsible for.
    #[instrument(skip(db))]
    pub async fn get_attendee_classes(
        db: &PgPool,
        teacher_id: Uuid,
        school_id: Uuid,
    ) -> Result<Vec<Class>, AppError> {
        let classes = sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes
             WHERE attendee = $1 AND school_id = $2
             ORDER BY class_num NULLS LAST, class_text"
        ))
        .bind(teacher_id)
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(classes)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        school_id: Uuid,
        dto: UpdateClassDto,
    ) -> Result<Class, AppError> {
        let existing = Self::fetch_class_row(db, id, school_id).await?;

        // A new attendee must be a teacher of the same school.
        if let Some(teacher_id) = dto.attendee {
            let known = sqlx::query_scalar::<_, Uuid>(
                "SELECT id FROM teachers WHERE id = $1 AND school_id = $2",
            )
            .bind(teacher_id)
            .bind(school_id)
            .fetch_optional(db)
            .await?;

            if known.is_none() {
                return Err(AppError::not_found("Teacher not found"));
            }
        }

        let class_text = dto.class_text.unwrap_or(existing.class_text);
        let class_num = dto.class_num.or(existing.class_num);
        let attendee = dto.attendee.or(existing.attendee);

        let class = sqlx::query_as::<_, Class>(&format!(
            "UPDATE classes
             SET class_text = $1, class_num = $2, attendee = $3
             WHERE id = $4 AND school_id = $5
             RETURNING {CLASS_COLUMNS}"
        ))
        .bind(&class_text)
        .bind(class_num)
        .bind(attendee)
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Class not found"))?;

        Ok(class)
    }

    /// Refuses to delete a class with enrolled students, scheduled
    /// examinations, or timetable periods.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<(), AppError> {
        let dependents = sqlx::query_scalar::<_, i64>(
            "SELECT (SELECT COUNT(*) FROM students WHERE class_id = $1 AND school_id = $2)
                  + (SELECT COUNT(*) FROM examinations WHERE class_id = $1 AND school_id = $2)
                  + (SELECT COUNT(*) FROM periods WHERE class_id = $1 AND school_id = $2)",
        )
        .bind(id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if dependents > 0 {
            return Err(AppError::conflict(
                "Cannot delete class. Students, examinations or periods still reference it",
            ));
        }

        sqlx::query("DELETE FROM class_assignments WHERE class_id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        let result = sqlx::query("DELETE FROM classes WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Class not found"));
        }

        Ok(())
    }

    #[instrument(skip(db, dto))]
    pub async fn add_assignment(
        db: &PgPool,
        class_id: Uuid,
        school_id: Uuid,
        dto: AssignmentDto,
    ) -> Result<ClassAssignment, AppError> {
        Self::fetch_class_row(db, class_id, school_id).await?;
        Self::check_assignment_refs(db, school_id, &dto).await?;

        let duplicate = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM class_assignments
             WHERE class_id = $1 AND subject_id = $2 AND teacher_id = $3 AND school_id = $4",
        )
        .bind(class_id)
        .bind(dto.subject_id)
        .bind(dto.teacher_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?;

        if duplicate.is_some() {
            return Err(AppError::conflict(
                "This subject and teacher are already assigned to the class",
            ));
        }

        let assignment = sqlx::query_as::<_, ClassAssignment>(&format!(
            "INSERT INTO class_assignments (school_id, class_id, subject_id, teacher_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {ASSIGNMENT_COLUMNS}"
        ))
        .bind(school_id)
        .bind(class_id)
        .bind(dto.subject_id)
        .bind(dto.teacher_id)
        .fetch_one(db)
        .await?;

        Ok(assignment)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_assignment(
        db: &PgPool,
        class_id: Uuid,
        assignment_id: Uuid,
        school_id: Uuid,
        dto: AssignmentDto,
    ) -> Result<ClassAssignment, AppError> {
        Self::check_assignment_refs(db, school_id, &dto).await?;

        let assignment = sqlx::query_as::<_, ClassAssignment>(&format!(
            "UPDATE class_assignments
             SET subject_id = $1, teacher_id = $2
             WHERE id = $3 AND class_id = $4 AND school_id = $5
             RETURNING {ASSIGNMENT_COLUMNS}"
        ))
        .bind(dto.subject_id)
        .bind(dto.teacher_id)
        .bind(assignment_id)
        .bind(class_id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Assignment not found"))?;

        Ok(assignment)
    }

    #[instrument(skip(db))]
    pub async fn delete_assignment(
        db: &PgPool,
        class_id: Uuid,
        assignment_id: Uuid,
        school_id: Uuid,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM class_assignments
             WHERE id = $1 AND class_id = $2 AND school_id = $3",
        )
        .bind(assignment_id)
        .bind(class_id)
        .bind(school_id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Assignment not found"));
        }

        Ok(())
    }

    async fn fetch_class_row(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<Class, AppError> {
        sqlx::query_as::<_, Class>(&format!(
            "SELECT {CLASS_COLUMNS} FROM classes WHERE id = $1 AND school_id = $2"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Class not found"))
    }

    async fn check_assignment_refs(
        db: &PgPool,
        school_id: Uuid,
        dto: &AssignmentDto,
    ) -> Result<(), AppError> {
        let subject =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM subjects WHERE id = $1 AND school_id = $2")
                .bind(dto.subject_id)
                .bind(school_id)
                .fetch_optional(db)
                .await?;

        if subject.is_none() {
            return Err(AppError::not_found("Subject not found"));
        }

        let teacher =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM teachers WHERE id = $1 AND school_id = $2")
                .bind(dto.teacher_id)
                .bind(school_id)
                .fetch_optional(db)
                .await?;

        if teacher.is_none() {
            return Err(AppError::not_found("Teacher not found"));
        }

        Ok(())
    }
}
