//! Authentication module
//!
//! Bearer tokens are issued by an external identity provider. The backend
//! only verifies them through a [`TokenVerifier`] and resolves the caller
//! against the `users` table.

mod firebase;
mod middleware;
mod shared_secret;

pub use firebase::FirebaseTokenVerifier;
pub use middleware::{bearer_token, CurrentUser, TokenSubject};
pub use shared_secret::SharedSecretVerifier;

use async_trait::async_trait;
use thiserror::Error;

/// Identity asserted by a successfully verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub uid: String,
    pub email: Option<String>,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token has no subject")]
    MissingSubject,

    #[error("no signing key with id {0:?}")]
    UnknownKey(Option<String>),

    #[error("could not fetch signing keys: {0}")]
    KeyFetch(String),
}

/// Verifies a raw bearer token
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError>;
}
