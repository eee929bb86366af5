use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;

use super::model::{CreateNoticeDto, Notice, UpdateNoticeDto};

const NOTICE_COLUMNS: &str = "id, school_id, title, message, audience, created_at";

pub struct NoticeService;

impl NoticeService {
    #[instrument(skip(db, dto))]
    pub async fn create(
        db: &PgPool,
        dto: CreateNoticeDto,
        school_id: Uuid,
    ) -> Result<Notice, AppError> {
        let audience = expand_audience(&dto.audience)?;

        let notice = sqlx::query_as::<_, Notice>(&format!(
            "INSERT INTO notices (school_id, title, message, audience)
             VALUES ($1, $2, $3, $4)
             RETURNING {NOTICE_COLUMNS}"
        ))
        .bind(school_id)
        .bind(&dto.title)
        .bind(&dto.message)
        .bind(&audience)
        .fetch_one(db)
        .await?;

        Ok(notice)
    }

    #[instrument(skip(db))]
    pub async fn get_all(db: &PgPool, school_id: Uuid) -> Result<Vec<Notice>, AppError> {
        let notices = sqlx::query_as::<_, Notice>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices
             WHERE school_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(school_id)
        .fetch_all(db)
        .await?;

        Ok(notices)
    }

    /// Notices addressed to the given audience role.
    #[instrument(skip(db))]
    pub async fn get_for_audience(
        db: &PgPool,
        audience: &str,
        school_id: Uuid,
    ) -> Result<Vec<Notice>, AppError> {
        let audience = audience.to_lowercase();
        if audience != "student" && audience != "teacher" {
            return Err(AppError::bad_request("Unknown audience"));
        }

        let notices = sqlx::query_as::<_, Notice>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices
             WHERE school_id = $1 AND $2 = ANY(audience)
             ORDER BY created_at DESC"
        ))
        .bind(school_id)
        .bind(&audience)
        .fetch_all(db)
        .await?;

        Ok(notices)
    }

    #[instrument(skip(db, dto))]
    pub async fn update(
        db: &PgPool,
        id: Uuid,
        school_id: Uuid,
        dto: UpdateNoticeDto,
    ) -> Result<Notice, AppError> {
        let existing = sqlx::query_as::<_, Notice>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices WHERE id = $1 AND school_id = $2"
        ))
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Notice not found"))?;

        let title = dto.title.unwrap_or(existing.title);
        let message = dto.message.unwrap_or(existing.message);
        let audience = match dto.audience {
            Some(a) => expand_audience(&a)?,
            None => existing.audience,
        };

        let notice = sqlx::query_as::<_, Notice>(&format!(
            "UPDATE notices
             SET title = $1, message = $2, audience = $3
             WHERE id = $4 AND school_id = $5
             RETURNING {NOTICE_COLUMNS}"
        ))
        .bind(&title)
        .bind(&message)
        .bind(&audience)
        .bind(id)
        .bind(school_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Notice not found"))?;

        Ok(notice)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: Uuid, school_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1 AND school_id = $2")
            .bind(id)
            .bind(school_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Notice not found"));
        }

        Ok(())
    }
}

/// "all" fans out to both concrete audiences.
fn expand_audience(audience: &str) -> Result<Vec<String>, AppError> {
    match audience.to_lowercase().as_str() {
        "all" => Ok(vec!["student".to_string(), "teacher".to_string()]),
        "student" => Ok(vec!["student".to_string()]),
        "teacher" => Ok(vec!["teacher".to_string()]),
        _ => Err(AppError::bad_request("Unknown audience")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fans_out_to_both_roles() {
        assert_eq!(expand_audience("all").unwrap(), vec!["student", "teacher"]);
        assert_eq!(expand_audience("Teacher").unwrap(), vec!["teacher"]);
        assert_eq!(expand_audience("student").unwrap(), vec!["student"]);
        assert!(expand_audience("parents").is_err());
    }
}
