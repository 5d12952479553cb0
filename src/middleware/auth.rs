use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use classbook_auth::{Claims, verify_token};
use classbook_core::{AppError, DomainError};
use classbook_models::ids::UserId;

use crate::state::AppState;

/// Extractor that validates the bearer JWT and yields the caller's claims.
///
/// The token's `sub` is the identity provider's user id.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The caller's user id.
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .sub
            .parse()
            .map_err(|_| DomainError::identity("Invalid user ID in token").into())
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| DomainError::identity("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| DomainError::identity("Invalid authorization header format"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use uuid::Uuid;

    fn claims(sub: String) -> Claims {
        Claims {
            sub,
            email: "test@example.com".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_user_id() {
        let id = Uuid::new_v4();
        let auth_user = AuthUser(claims(id.to_string()));

        assert_eq!(auth_user.user_id().unwrap(), UserId::from_uuid(id));
    }

    #[test]
    fn test_user_id_rejects_malformed_subject() {
        let auth_user = AuthUser(claims("not-a-uuid".to_string()));
        let err = auth_user.user_id().unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.error.to_string(), "Invalid user ID in token");
    }
}
