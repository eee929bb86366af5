use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::middleware::role::UserRole;
use crate::modules::session::model::{LoginRequest, LoginUser};
use crate::utils::errors::AppError;
use crate::utils::jwt::{TokenSubject, create_access_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{RegisterStudentDto, Student, StudentQueryParams, UpdateStudentDto};

const STUDENT_COLUMNS: &str = "id, school_id, class_id, name, email, guardian, guardian_phone, \
                               age, gender, image_url, created_at";

pub struct StudentService;

impl StudentService {
    /// Registers a student into the caller's school. The tenant key comes
    /// from the authenticated principal, never from the request body.
    #[instrument(skip(db, dto))]
    pub async fn register(
        db: &PgPool,
        dto: RegisterStudentDto,
        school_id: Uuid,
    ) -> Result<Student, AppError> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM students WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::conflict("Email already exists"));
        }

        let hashed_password = hash_password(&dto.password)?;

        let student = sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students
                 (school_id, class_id, name, email, password, guardian, guardian_phone,
                  age, gender, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(school_id)
        .bind(dto.class_id)
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.guardian)
        .bind(&dto.guardian_phone)
        .bind(dto.age)
        .bind(&dto.gender)
        .bind(&dto.image_url)
        .fetch_one(db)
        .await?;

        Ok(student)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<(String, LoginUser), AppError> {
        #[derive(sqlx::FromRow)]
        struct StudentWithPassword {
            id: Uuid,
            school_id: Uuid,
            name: String,
            image_url: Option<String>,
            password: String,
        }

        let student = sqlx::query_as::<_, StudentWithPassword>(
            "SELECT id, school_id, name, image_url, password FROM students WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &student.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        let token = create_access_token(
            TokenSubject {
                id: student.id,
                school_id: student.school_id,
                role: UserRole::Student,
                name: &student.name,
                email: Some(&dto.email),
                image_url: student.image_url.as_deref(),
            },
            jwt_config,
        )?;

        let user = LoginUser {
            id: student.id,
            name: student.name,
            role: UserRole::Student,
            email: Some(dto.email),
            image_url: student.image_url,
        };

        Ok((token, user))
    }

    #[instrument(skip(db))]
    pub async fn get_with_query(
        db: &PgPool,
        school_id: Uuid,
        params: &StudentQueryParams,
    ) -> Result<Vec<Student>, AppError> {
        let search = params
            .search
            .as_deref()
            .map(|s| format!("%{}%", s.replace('%', "\\%").replace('_', "\\_")));

        let students = sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students
             WHERE school_id = $1
               AND ($2::text IS NULL OR name ILIKE $2)
               AND ($3::uuid IS NULL OR class_id = $3)
             ORDER BY name"
        ))
        .bind(school_id)
        .bind(search)
        .bind(params.class_id)
        .fetch_all(db)
        .await?;

        Ok(students)
    }

    #[instrument(skip(db))]
    pub async fn get_by_id(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1 AND school_id = $2"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        school_id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let existing = Self::get_by_id(db, id, school_id).await?;

        let name = dto.name.unwrap_or(existing.name);
        let email = dto.email.unwrap_or(existing.email);
        let class_id = dto.class_id.or(existing.class_id);
        let guardian = dto.guardian.or(existing.guardian);
        let guardian_phone = dto.guardian_phone.or(existing.guardian_phone);
        let age = dto.age.or(existing.age);
        let gender = dto.gender.or(existing.gender);
        let image_url = dto.image_url.or(existing.image_url);

        let password_hash = match dto.password {
            Some(password) => Some(hash_password(&password)?),
            None => None,
        };

        let student = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET name = $1, email = $2, class_id = $3, guardian = $4, guardian_phone = $5,
                 age = $6, gender = $7, image_url = $8,
                 password = COALESCE($9, password)
             WHERE id = $10 AND school_id = $11
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&name)
        .bind(&email)
        .bind(class_id)
        .bind(&guardian)
        .bind(&guardian_phone)
        .bind(age)
        .bind(&gender)
        .bind(&image_url)
        .bind(&password_hash)
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Student not found"))?;

        Ok(student)
    }

    /// Removes a student and their attendance history in one pass. Both
    /// deletes are tenant-scoped.
    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM attendance_records WHERE student_id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        let result = sqlx::query("DELETE FROM students WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Student not found"));
        }

        Ok(())
    }
}
