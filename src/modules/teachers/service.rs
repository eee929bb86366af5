use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::middleware::role::UserRole;
use crate::modules::session::model::{LoginRequest, LoginUser};
use crate::utils::errors::AppError;
use crate::utils::jwt::{TokenSubject, create_access_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{RegisterTeacherDto, Teacher, TeacherQueryParams, UpdateTeacherDto};

const TEACHER_COLUMNS: &str =
    "id, school_id, name, email, qualification, age, gender, image_url, created_at";

pub struct TeacherService;

impl TeacherService {
    #[instrument(skip(db, dto))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterTeacherDto,
        school_id: Uuid,
    ) -> Result<Teacher, AppError> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM teachers WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::conflict("Email already exists"));
        }

        let hashed_password = hash_password(&dto.password)?;

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "INSERT INTO teachers
                 (school_id, name, email, password, qualification, age, gender, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(school_id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.qualification)
        .bind(dto.age)
        .bind(&dto.gender)
        .bind(&dto.image_url)
        .fetch_one(db)
        .await?;

        Ok(teacher)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<(String, LoginUser), AppError> {
        #[derive(sqlx::FromRow)]
        struct TeacherWithPassword {
            id: Uuid,
            school_id: Uuid,
            name: String,
            image_url: Option<String>,
            password: String,
        }

        let teacher = sqlx::query_as::<_, TeacherWithPassword>(
            "SELECT id, school_id, name, image_url, password FROM teachers WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &teacher.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let token = create_access_token(
            TokenSubject {
                id: teacher.id,
                school_id: teacher.school_id,
                role: UserRole::Teacher,
                name: &teacher.name,
                email: Some(&dto.email),
                image_url: teacher.image_url.as_deref(),
            },
            jwt_config,
        )?;

        let user = LoginUser {
            id: teacher.id,
            name: teacher.name,
            role: UserRole::Teacher,
            email: Some(dto.email),
            image_url: teacher.image_url,
        };

        Ok((token, user))
    }

    #[instrument(skip(db))]
    pub async fn get_with_query(
        db: &PgPool,
        school_id: Uuid,
        params: &TeacherQueryParams,
    ) -> Result<Vec<Teacher>, AppError> {
        let search = params
            .search
            .as_deref()
            .map(|s| format!("%{}%", s.replace('%', "\\%").replace('_', "\\_")));

        let teachers = sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers
             WHERE school_id = $1
               AND ($2::text IS NULL OR name ILIKE $2)
             ORDER BY name"
        ))
        .bind(school_id)
        .bind(search)
        .fetch_all(db)
        .await?;

        Ok(teachers)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<Teacher, AppError> {
        sqlx::query_as::<_, Teacher>(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1 AND school_id = $2"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        school_id: Uuid,
        dto: UpdateTeacherDto,
    ) -> Result<Teacher, AppError> {
        let existing = Self::get_by_id(db, id, school_id).await?;

        // An email change must not collide with another teacher's address.
        if let Some(email) = &dto.email {
            let taken = sqlx::query_scalar::<_, Uuid>(
                "SELECT id FROM teachers WHERE email = $1 AND id <> $2",
            )
            .bind(email)
            .bind(id)
            .fetch_optional(db)
            .await?;

            if taken.is_some() {
                return Err(AppError::conflict("This email is already in use"));
            }
        }

        let name = dto.name.unwrap_or(existing.name);
        let email = dto.email.unwrap_or(existing.email);
        let qualification = dto.qualification.or(existing.qualification);
        let age = dto.age.or(existing.age);
        let gender = dto.gender.or(existing.gender);
        let image_url = dto.image_url.or(existing.image_url);

        let password_hash = match dto.password {
            Some(password) => Some(hash_password(&password)?),
            None => None,
        };

        let teacher = sqlx::query_as::<_, Teacher>(&format!(
            "UPDATE teachers
             SET name = $1, email = $2, qualification = $3, age = $4, gender = $5,
                 image_url = $6, password = COALESCE($7, password)
             WHERE id = $8 AND school_id = $9
             RETURNING {TEACHER_COLUMNS}"
        ))
        .bind(&name)
        .bind(&email)
        .bind(&qualification)
        .bind(age)
        .bind(&gender)
        .bind(&image_url)
        .bind(&password_hash)
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Teacher not found"))?;

        Ok(teacher)
    }

    /// Refuses to delete a teacher still assigned to a class or a period.
    /// Both dependency counts are tenant-scoped.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<(), AppError> {
        let assignment_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM class_assignments WHERE teacher_id = $1 AND school_id = $2",
        )
        .bind(id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        let period_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM periods WHERE teacher_id = $1 AND school_id = $2",
        )
        .bind(id)
        .bind(school_id)
        .fetch_one(db)
        .await?;

        if assignment_count > 0 || period_count > 0 {
            return Err(AppError::conflict(
                "Cannot delete teacher. They are currently assigned to classes or periods",
            ));
        }

        let result = sqlx::query("DELETE FROM teachers WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Teacher not found"));
        }

        Ok(())
    }
}
