//! Firebase ID token verification
//!
//! Tokens are RS256 JWTs signed by one of Google's rotating keys. The key set
//! is cached and refetched when it expires or when a token names a key id
//! that is not in the cached set.

use super::{AuthError, TokenVerifier, VerifiedToken};
use crate::external::record_call;
use anyhow::Result;
use async_trait::async_trait;
use jsonwebtoken::{
    decode, decode_header, errors::ErrorKind, jwk::JwkSet, Algorithm, DecodingKey, Validation,
};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

const ISSUER_PREFIX: &str = "https://securetoken.google.com/";

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    #[serde(default)]
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

struct CachedKeys {
    set: JwkSet,
    fetched_at: Instant,
}

pub struct FirebaseTokenVerifier {
    project_id: String,
    jwks_url: String,
    ttl: Duration,
    http: reqwest::Client,
    cache: RwLock<Option<CachedKeys>>,
}

impl FirebaseTokenVerifier {
    pub fn new(project_id: &str, jwks_url: &str, ttl: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            project_id: project_id.to_string(),
            jwks_url: jwks_url.to_string(),
            ttl,
            http,
            cache: RwLock::new(None),
        })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!("{}{}", ISSUER_PREFIX, self.project_id)]);
        validation.set_required_spec_claims(&["exp", "sub", "aud", "iss"]);
        validation
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(key) = self.cached_key(cache.as_ref(), kid)? {
                return Ok(key);
            }
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock
        if let Some(key) = self.cached_key(cache.as_ref(), kid)? {
            return Ok(key);
        }

        let set = self.fetch_keys().await?;
        let key = set.find(kid).map(DecodingKey::from_jwk).transpose()?;
        *cache = Some(CachedKeys {
            set,
            fetched_at: Instant::now(),
        });

        key.ok_or_else(|| AuthError::UnknownKey(Some(kid.to_string())))
    }

    fn cached_key(
        &self,
        cached: Option<&CachedKeys>,
        kid: &str,
    ) -> Result<Option<DecodingKey>, AuthError> {
        match cached {
            Some(cached) if cached.fetched_at.elapsed() < self.ttl => Ok(cached
                .set
                .find(kid)
                .map(DecodingKey::from_jwk)
                .transpose()?),
            _ => Ok(None),
        }
    }

    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        debug!(url = %self.jwks_url, "Fetching token signing keys");
        let started = Instant::now();
        let result = self.download_keys().await;
        record_call("firebase", "jwks", started, &result);

        let set = result.map_err(|e| AuthError::KeyFetch(e.to_string()))?;
        info!(keys = set.keys.len(), "Token signing keys refreshed");
        Ok(set)
    }

    async fn download_keys(&self) -> reqwest::Result<JwkSet> {
        self.http
            .get(&self.jwks_url)
            .send()
            .await?
            .error_for_status()?
            .json::<JwkSet>()
            .await
    }
}

#[async_trait]
impl TokenVerifier for FirebaseTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        let header = decode_header(token)?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken(ErrorKind::InvalidAlgorithm.into()));
        }
        let kid = header.kid.ok_or(AuthError::UnknownKey(None))?;
        let key = self.decoding_key(&kid).await?;

        let data = decode::<FirebaseClaims>(token, &key, &self.validation())?;
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
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PROJECT: &str = "recipedash-test";
    const KID: &str = "test-key";
    const TEST_KEY_PEM: &[u8] = include_bytes!("../../tests/fixtures/test_rsa_key.pem");
    const TEST_KEY_MODULUS: &str = "09f3YLQ9i-rJ8adHBjp3D1a3biGGZ7od13120T9sOLPHNRqVlT_7u0B_0kTmbF-pV_DdxcJW7lz_x_8fDCT8D3GIyuxbcGEXWNWK1Lv6uOKF1HKB63wbs5d1dJVkocnknzBOKD-eymtFgtgNu8FHW3gau871ukmmRhGIrJi-4HTNXWlTZ2Btkw4lXa5Q8luRtjVc2C-E2hpue_TLvFa5TJzs_VLqYcsI6NkNn_mpgMFBchnjs3gVDF2Dbi7_TkJ-9mgGOWH2PXXpP4r3-ST2EO-pnc2fN7c9gPwmpwhOtdvq-fEyRQej87rFuCPNHySF3s7O69v1m9A1_FvbIoEnBQ";

    fn jwks() -> serde_json::Value {
        json!({
            "keys": [{
                "kty": "RSA",
                "use": "sig",
                "alg": "RS256",
                "kid": KID,
                "n": TEST_KEY_MODULUS,
                "e": "AQAB"
            }]
        })
    }

    fn sign(kid: &str, aud: &str, sub: &str) -> String {
        let now = Utc::now().timestamp();
        let claims = json!({
            "iss": format!("{}{}", ISSUER_PREFIX, PROJECT),
            "aud": aud,
            "sub": sub,
            "email": "cook@example.com",
            "iat": now,
            "exp": now + 3600,
        });
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        let key = EncodingKey::from_rsa_pem(TEST_KEY_PEM).unwrap();
        encode(&header, &claims, &key).unwrap()
    }

    async fn setup(expected_fetches: u64) -> (MockServer, FirebaseTokenVerifier) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jwks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks()))
            .expect(expected_fetches)
            .mount(&server)
            .await;

        let verifier = FirebaseTokenVerifier::new(
            PROJECT,
            &format!("{}/jwks", server.uri()),
            Duration::from_secs(3600),
        )
        .unwrap();
        (server, verifier)
    }

    #[tokio::test]
    async fn test_valid_token_verified_and_keys_cached() {
        let (_server, verifier) = setup(1).await;
        let token = sign(KID, PROJECT, "firebase-uid");

        let first = verifier.verify(&token).await.unwrap();
        let second = verifier.verify(&token).await.unwrap();

        assert_eq!(first.uid, "firebase-uid");
        assert_eq!(first.email.as_deref(), Some("cook@example.com"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_wrong_audience_rejected() {
        let (_server, verifier) = setup(1).await;
        let token = sign(KID, "some-other-project", "firebase-uid");
        assert!(matches!(
            verifier.verify(&token).await,
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_kid_triggers_refetch() {
        let (_server, verifier) = setup(2).await;
        verifier.verify(&sign(KID, PROJECT, "uid")).await.unwrap();

        let result = verifier.verify(&sign("rotated-key", PROJECT, "uid")).await;
        assert!(matches!(result, Err(AuthError::UnknownKey(Some(_)))));
    }

    #[tokio::test]
    async fn test_hs256_token_rejected_without_fetching_keys() {
        let (_server, verifier) = setup(0).await;
        let token = crate::auth::SharedSecretVerifier::new("secret")
            .issue("uid", None, 3600)
            .unwrap();
        assert!(verifier.verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_key_endpoint_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let verifier =
            FirebaseTokenVerifier::new(PROJECT, &server.uri(), Duration::from_secs(60)).unwrap();

        let result = verifier.verify(&sign(KID, PROJECT, "uid")).await;
        assert!(matches!(result, Err(AuthError::KeyFetch(_))));
    }
}
