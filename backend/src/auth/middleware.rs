//! Request principal extractors
//!
//! [`TokenSubject`] only verifies the bearer token. [`CurrentUser`] also
//! requires a registered, active account.

use super::VerifiedToken;
use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use recipedash_shared::{Role, Status};
use tracing::debug;

const MISSING_TOKEN: &str = "Authorization token is missing or invalid";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn verify_request(parts: &Parts, state: &AppState) -> Result<VerifiedToken, ApiError> {
    let token = bearer_token(&parts.headers)
        .ok_or_else(|| ApiError::Unauthorized(MISSING_TOKEN.to_string()))?;

    state.verifier().verify(token).await.map_err(|e| {
        debug!("Token rejected: {}", e);
        ApiError::Unauthorized(INVALID_TOKEN.to_string())
    })
}

/// Verified identity without a user row, for sign-up
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub uid: String,
    pub email: Option<String>,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for TokenSubject
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let verified = verify_request(parts, &app_state).await?;

        Ok(TokenSubject {
            uid: verified.uid,
            email: verified.email,
        })
    }
}

/// Registered, non-blocked caller
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub uid: String,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Admin access required".to_string()))
        }
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let verified = verify_request(parts, &app_state).await?;

        let user = UserRepository::find_by_uid(app_state.db(), &verified.uid)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        if user.status == Status::Blocked {
            return Err(ApiError::Forbidden("User is blocked".to_string()));
        }

        Ok(CurrentUser {
            uid: user.uid,
            email: user.email,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use rstest::rstest;

    #[rstest]
    #[case(Some("Bearer abc.def.ghi"), Some("abc.def.ghi"))]
    #[case(Some("Bearer "), None)]
    #[case(Some("Basic dXNlcjpwYXNz"), None)]
    #[case(Some("bearer abc"), None)]
    #[case(None, None)]
    fn test_bearer_token(#[case] header: Option<&str>, #[case] expected: Option<&str>) {
        let mut headers = HeaderMap::new();
        if let Some(value) = header {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        }
        assert_eq!(bearer_token(&headers), expected);
    }

    #[test]
    fn test_require_admin() {
        let user = CurrentUser {
            uid: "u1".to_string(),
            email: "u1@example.com".to_string(),
            role: Role::User,
        };
        assert!(user.require_admin().is_err());

        let admin = CurrentUser {
            role: Role::Admin,
            ..user
        };
        assert!(admin.require_admin().is_ok());
    }
}
