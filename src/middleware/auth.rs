use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{Claims, verify_token};

/// Extractor that validates the session token and exposes the authenticated
/// principal's claims for the remainder of the request.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn role(&self) -> crate::middleware::role::UserRole {
        self.0.role
    }

    /// The school this principal belongs to. For school owners this is their
    /// own id.
    pub fn school_id(&self) -> Uuid {
        self.0.school_id
    }

    pub fn principal_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub)
            .map_err(|_| AppError::unauthorized("Token is not valid"))
    }
}

/// Normalizes an `Authorization` header value into a candidate token.
///
/// Accepts both `Bearer <token>` and a bare token. The SPA occasionally sends
/// the literal string "undefined" when its stored token is missing; that is
/// rejected here rather than passed to the verifier.
fn token_from_header_value(value: &str) -> Option<&str> {
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() || token == "undefined" {
        None
    } else {
        Some(token)
    }
}

/// Pulls a `token` value out of a raw query string. Compatibility concession
/// for legacy clients; the `Authorization` header is the supported transport.
fn token_from_query(query: &str) -> Option<&str> {
    query
        .split('&')
        .filter_map(|pair| pair.strip_prefix("token="))
        .find(|candidate| !candidate.is_empty() && *candidate != "undefined")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(token_from_header_value);

        let token = match header_token {
            Some(token) => token.to_string(),
            None => parts
                .uri
                .query()
                .and_then(token_from_query)
                .map(str::to_string)
                .ok_or_else(|| AppError::unauthorized("No token, authorization denied"))?,
        };

        let claims = verify_token(&token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(token_from_header_value("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn bare_token_is_accepted() {
        assert_eq!(token_from_header_value("abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn undefined_literal_is_rejected() {
        assert_eq!(token_from_header_value("undefined"), None);
        assert_eq!(token_from_header_value("Bearer undefined"), None);
    }

    #[test]
    fn empty_values_are_rejected() {
        assert_eq!(token_from_header_value(""), None);
        assert_eq!(token_from_header_value("Bearer "), None);
        assert_eq!(token_from_header_value("   "), None);
    }

    #[test]
    fn query_token_is_found() {
        assert_eq!(token_from_query("token=abc"), Some("abc"));
        assert_eq!(token_from_query("page=2&token=abc&limit=5"), Some("abc"));
    }

    #[test]
    fn query_without_token_yields_none() {
        assert_eq!(token_from_query("page=2"), None);
        assert_eq!(token_from_query("token="), None);
        assert_eq!(token_from_query("token=undefined"), None);
    }
}
