//! Application state shared across all handlers.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::config::Config;
use crate::db;
use crate::guard::{Access, GuardPaths, RouteGuard};
use crate::identity::{
    HostedIdentityProvider, IdentityProvider, MemoryProfileStore, PgProfileStore, ProfileStore,
    TokenVerifier,
};
use crate::menu::NavRegistry;
use crate::theme::ThemeEngine;

/// Shared application state.
///
/// Wrapped in Arc internally so Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// PostgreSQL pool, when a database is configured.
    db: Option<PgPool>,

    /// Identity and profile source for route guards.
    identity: Arc<dyn IdentityProvider>,

    /// Navigation registry, fixed for the life of the process.
    navigation: Arc<NavRegistry>,

    /// Theme engine for template rendering.
    theme: Arc<ThemeEngine>,

    /// Guard for the authenticated subtree.
    authenticated_guard: RouteGuard,

    /// Guard for the admin subtree.
    admin_guard: RouteGuard,

    /// Cookie carrying the access token; cleared on logout.
    auth_cookie_name: String,
}

impl AppState {
    /// Create application state from configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        let (db, profiles): (Option<PgPool>, Arc<dyn ProfileStore>) = match &config.database_url {
            Some(url) => {
                let pool = db::create_pool(url, config.database_max_connections)
                    .await
                    .context("failed to create database pool")?;
                info!("profiles served from PostgreSQL");
                (Some(pool.clone()), Arc::new(PgProfileStore::new(pool)))
            }
            None => {
                warn!("DATABASE_URL not set; profiles served from an empty in-memory store");
                (None, Arc::new(MemoryProfileStore::new()))
            }
        };

        let verifier = TokenVerifier::new(config.jwt_secret.as_bytes(), &config.jwt_audience);
        let identity = Arc::new(HostedIdentityProvider::new(
            verifier,
            &config.auth_cookie_name,
            profiles,
        ));

        let navigation = match &config.navigation_file {
            Some(path) => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?;
                NavRegistry::from_json(&json)
                    .with_context(|| format!("failed to load navigation from {}", path.display()))?
            }
            None => NavRegistry::builtin(),
        };

        info!(
            sections = navigation.sections().len(),
            items = navigation.item_count(),
            "navigation registry loaded"
        );

        Self::build(
            db,
            identity,
            navigation,
            config.guard_paths(),
            &config.auth_cookie_name,
        )
    }

    /// Create state around an existing identity provider, without a database.
    pub fn with_provider(
        identity: Arc<dyn IdentityProvider>,
        navigation: NavRegistry,
        guard_paths: GuardPaths,
        auth_cookie_name: &str,
    ) -> Result<Self> {
        Self::build(None, identity, navigation, guard_paths, auth_cookie_name)
    }

    fn build(
        db: Option<PgPool>,
        identity: Arc<dyn IdentityProvider>,
        navigation: NavRegistry,
        guard_paths: GuardPaths,
        auth_cookie_name: &str,
    ) -> Result<Self> {
        let theme = ThemeEngine::new().context("failed to initialize theme engine")?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                db,
                identity,
                navigation: Arc::new(navigation),
                theme: Arc::new(theme),
                authenticated_guard: RouteGuard::new(Access::Authenticated, guard_paths.clone()),
                admin_guard: RouteGuard::new(Access::Admin, guard_paths),
                auth_cookie_name: auth_cookie_name.to_string(),
            }),
        })
    }

    /// Get the identity provider.
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.inner.identity.as_ref()
    }

    /// Get the navigation registry.
    pub fn navigation(&self) -> &NavRegistry {
        &self.inner.navigation
    }

    /// Get the theme engine.
    pub fn theme(&self) -> &ThemeEngine {
        &self.inner.theme
    }

    /// Get the guard for an access level.
    pub fn guard(&self, access: Access) -> &RouteGuard {
        match access {
            Access::Authenticated => &self.inner.authenticated_guard,
            Access::Admin => &self.inner.admin_guard,
        }
    }

    /// Login entry point.
    pub fn login_path(&self) -> &str {
        &self.inner.authenticated_guard.paths().login
    }

    /// Default authenticated landing page.
    pub fn landing_path(&self) -> &str {
        &self.inner.authenticated_guard.paths().landing
    }

    pub fn auth_cookie_name(&self) -> &str {
        &self.inner.auth_cookie_name
    }

    /// Check if PostgreSQL is healthy. `None` when no database is configured.
    pub async fn postgres_healthy(&self) -> Option<bool> {
        match &self.inner.db {
            Some(pool) => Some(db::check_health(pool).await),
            None => None,
        }
    }
}
