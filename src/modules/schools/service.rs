use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::middleware::role::UserRole;
use crate::modules::session::model::{LoginRequest, LoginUser};
use crate::utils::errors::AppError;
use crate::utils::jwt::{TokenSubject, create_access_token};
use crate::utils::password::{hash_password, verify_password};

use super::model::{RegisterSchoolDto, School, SchoolPublic, UpdateSchoolDto};

pub struct SchoolService;

impl SchoolService {
    #[instrument(skip(db, dto))]
    pub async fn register(db: &PgPool, dto: RegisterSchoolDto) -> Result<School, AppError> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM schools WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::conflict("Email already exists"));
        }

        let hashed_password = hash_password(&dto.password)?;

        let school = sqlx::query_as::<_, School>(
            "INSERT INTO schools (school_name, owner_name, email, password, image_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, school_name, owner_name, email, image_url, created_at",
        )
        .bind(&dto.school_name)
        .bind(&dto.owner_name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .bind(&dto.image_url)
        .fetch_one(db)
        .await?;

        Ok(school)
    }

    #[instrument(skip(db, dto, jwt_config))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<(String, LoginUser), AppError> {
        #[derive(sqlx::FromRow)]
        struct SchoolWithPassword {
            id: Uuid,
            school_name: String,
            image_url: Option<String>,
            password: String,
        }

        let school = sqlx::query_as::<_, SchoolWithPassword>(
            "SELECT id, school_name, image_url, password FROM schools WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

        if !verify_password(&dto.password, &school.password)? {
            return Err(AppError::unauthorized("Invalid email or password"));
        }

        // A school owner's tenant id is their own id.
        let token = create_access_token(
            TokenSubject {
                id: school.id,
                school_id: school.id,
                role: UserRole::School,
                name: &school.school_name,
                email: Some(&dto.email),
                image_url: school.image_url.as_deref(),
            },
            jwt_config,
        )?;

        let user = LoginUser {
            id: school.id,
            name: school.school_name,
            role: UserRole::School,
            email: Some(dto.email),
            image_url: school.image_url,
        };

        Ok((token, user))
    }

    #[instrument(skip(db))]
    pub async fn get_own(db: &PgPool, school_id: Uuid) -> Result<School, AppError> {
        sqlx::query_as::<_, School>(
            "SELECT id, school_name, owner_name, email, image_url, created_at
             FROM schools WHERE id = $1",
        )
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("School not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        school_id: Uuid,
        dto: UpdateSchoolDto,
    ) -> Result<School, AppError> {
        let existing = Self::get_own(db, school_id).await?;

        let school_name = dto.school_name.unwrap_or(existing.school_name);
        let owner_name = dto.owner_name.unwrap_or(existing.owner_name);
        let image_url = dto.image_url.or(existing.image_url);

        let school = sqlx::query_as::<_, School>(
            "UPDATE schools SET school_name = $1, owner_name = $2, image_url = $3
             WHERE id = $4
             RETURNING id, school_name, owner_name, email, image_url, created_at",
        )
        .bind(&school_name)
        .bind(&owner_name)
        .bind(&image_url)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("School not found"))?;

        Ok(school)
    }

    /// Public listing for the landing-page gallery; exposes nothing private.
    #[instrument(skip(db))]
    pub async fn gallery(db: &PgPool) -> Result<Vec<SchoolPublic>, AppError> {
        let schools = sqlx::query_as::<_, SchoolPublic>(
            "SELECT school_name, image_url FROM schools ORDER BY school_name",
        )
        .fetch_all(db)
        .await?;

        Ok(schools)
    }
}
