use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::middleware::role::UserRole;
use crate::utils::errors::AppError;

/// Session claim issued at login. Opaque to the client; carries the principal
/// id, the owning school id, the role, and non-sensitive display fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Principal id.
    pub sub: String,
    /// Owning school. Equal to `sub` for school owners.
    pub school_id: Uuid,
    pub role: UserRole,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub iat: usize,
    pub exp: usize,
}

/// Identity fields baked into a token at login.
#[derive(Debug, Clone)]
pub struct TokenSubject<'a> {
    pub id: Uuid,
    pub school_id: Uuid,
    pub role: UserRole,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

/// Signs a session token for a freshly authenticated principal.
///
/// Tokens expire after `jwt_config.token_expiry` seconds (24 hours unless
/// `JWT_EXPIRY` overrides it).
pub fn create_access_token(
    subject: TokenSubject<'_>,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.token_expiry as usize;

    let claims = Claims {
        sub: subject.id.to_string(),
        school_id: subject.school_id,
        role: subject.role,
        name: subject.name.to_string(),
        email: subject.email.map(str::to_string),
        image_url: subject.image_url.map(str::to_string),
        iat: now,
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Decodes and verifies a session token. All failure modes collapse into one
/// generic `Unauthorized` so the error cannot be used as a verification
/// oracle.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Token is not valid"))
}
