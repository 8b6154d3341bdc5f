//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ApiConfig;
use crate::db::PgProfileStore;
use crate::services::ProfileService;
use crate::services::viacep::{LookupError, ViaCepClient};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to build ViaCEP client: {0}")]
    Resolver(#[from] LookupError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    pool: PgPool,
    profiles: ProfileService,
}

impl AppState {
    /// Create a new application state wired to ViaCEP and `PostgreSQL`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ViaCEP HTTP client cannot be built.
    pub fn new(config: ApiConfig, pool: PgPool) -> Result<Self, StateError> {
        let resolver = ViaCepClient::new(&config.viacep)?;
        let store = PgProfileStore::new(pool.clone());
        let profiles = ProfileService::new(Arc::new(resolver), Arc::new(store));

        Ok(Self::with_profiles(config, pool, profiles))
    }

    /// Create a state around an already-built profile service.
    #[must_use]
    pub fn with_profiles(config: ApiConfig, pool: PgPool, profiles: ProfileService) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                profiles,
            }),
        }
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the profile service.
    #[must_use]
    pub fn profiles(&self) -> &ProfileService {
        &self.inner.profiles
    }
}
