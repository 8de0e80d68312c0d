//! HS256 tokens signed with a configured secret
//!
//! Stands in for the identity provider on developer machines and in tests.

use super::{AuthError, TokenVerifier, VerifiedToken};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    exp: i64,
    iat: i64,
}

/// Keys are derived once and shared behind `Arc`
#[derive(Clone)]
pub struct SharedSecretVerifier {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl SharedSecretVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    /// Sign a token for `uid` that expires after `ttl_secs`
    pub fn issue(&self, uid: &str, email: Option<&str>, ttl_secs: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: uid.to_string(),
            email: email.map(str::to_string),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
    }
}

#[async_trait]
impl TokenVerifier for SharedSecretVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        if data.claims.sub.trim().is_empty() {
            return Err(AuthError::MissingSubject);
        }
        Ok(VerifiedToken {
            uid: data.claims.sub,
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verifier() -> SharedSecretVerifier {
        SharedSecretVerifier::new("test-secret")
    }

    #[tokio::test]
    async fn test_issue_and_verify() {
        let verifier = verifier();
        let token = verifier.issue("uid-1", Some("cook@example.com"), 3600).unwrap();
        let verified = verifier.verify(&token).await.unwrap();

        assert_eq!(verified.uid, "uid-1");
        assert_eq!(verified.email.as_deref(), Some("cook@example.com"));
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let verifier = verifier();
        let token = verifier.issue("uid-1", None, -3600).unwrap();
        assert!(verifier.verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_other_secret_rejected() {
        let token = SharedSecretVerifier::new("other").issue("uid-1", None, 3600).unwrap();
        assert!(verifier().verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_empty_subject_rejected() {
        let verifier = verifier();
        let token = verifier.issue("  ", None, 3600).unwrap();
        assert!(matches!(
            verifier.verify(&token).await,
            Err(AuthError::MissingSubject)
        ));
    }

    #[test]
    fn test_garbage_rejected() {
        tokio_test::assert_err!(tokio_test::block_on(
            verifier().verify("invalid.token.here")
        ));
    }
}
