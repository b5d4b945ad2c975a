//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::broadcast::Broadcaster;
use crate::config::ServerConfig;
use crate::services::TokenService;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources. Handlers receive it explicitly through axum's `State`
/// extractor; nothing in the crate reaches for process-wide globals.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    tokens: TokenService,
    broadcaster: Broadcaster,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The token service is built from the configured signing secret, and a
    /// fresh broadcast channel is opened for order events.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let tokens = TokenService::new(&config.token_secret, config.token_ttl_secs);
        let broadcaster = Broadcaster::default();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                tokens,
                broadcaster,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }

    /// Get a reference to the order event broadcaster.
    #[must_use]
    pub fn broadcaster(&self) -> &Broadcaster {
        &self.inner.broadcaster
    }
}
