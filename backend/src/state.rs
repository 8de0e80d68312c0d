//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::auth::{FirebaseTokenVerifier, SharedSecretVerifier, TokenVerifier};
use crate::config::{AppConfig, AuthProvider};
use crate::external::{MealDbClient, TastyClient};
use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
///
/// Every field is cheap to clone: the pool and HTTP clients are internally
/// reference counted, the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Bearer token verification
    pub verifier: Arc<dyn TokenVerifier>,
    pub mealdb: MealDbClient,
    pub tasty: TastyClient,
    /// Renders `/metrics`, absent when no recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build the state, choosing the token verifier from `auth.provider`
    pub fn new(db: PgPool, config: AppConfig) -> Result<Self> {
        let verifier: Arc<dyn TokenVerifier> = match config.auth.provider {
            AuthProvider::Firebase => {
                let project_id = config
                    .auth
                    .firebase_project_id
                    .as_deref()
                    .context("auth.firebase_project_id is required for the firebase provider")?;
                Arc::new(FirebaseTokenVerifier::new(
                    project_id,
                    &config.auth.jwks_url,
                    Duration::from_secs(config.auth.keys_ttl_secs),
                )?)
            }
            AuthProvider::SharedSecret => {
                Arc::new(SharedSecretVerifier::new(&config.auth.shared_secret))
            }
        };

        Self::with_verifier(db, config, verifier)
    }

    /// Build the state around an explicit verifier
    pub fn with_verifier(
        db: PgPool,
        config: AppConfig,
        verifier: Arc<dyn TokenVerifier>,
    ) -> Result<Self> {
        Ok(Self {
            mealdb: MealDbClient::new(&config.mealdb)?,
            tasty: TastyClient::new(&config.tasty)?,
            db,
            config: Arc::new(config),
            verifier,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn verifier(&self) -> &dyn TokenVerifier {
        self.verifier.as_ref()
    }
}
