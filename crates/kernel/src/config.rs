//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use crate::guard::GuardPaths;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// PostgreSQL connection URL. When unset, profiles are served from an
    /// in-memory store.
    pub database_url: Option<String>,

    /// Maximum database connections in pool (default: 10).
    pub database_max_connections: u32,

    /// Shared secret the hosted backend signs access tokens with.
    pub jwt_secret: String,

    /// Expected `aud` claim (default: "authenticated").
    pub jwt_audience: String,

    /// Cookie carrying the access token (default: "flowdesk-access-token").
    pub auth_cookie_name: String,

    /// Redirect target for unauthenticated requests (default: /login).
    pub login_path: String,

    /// Redirect target for authenticated requests lacking the role a
    /// subtree requires (default: /dashboard).
    pub landing_path: String,

    /// Optional JSON file replacing the built-in navigation.
    pub navigation_file: Option<PathBuf>,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DATABASE_MAX_CONNECTIONS must be a valid u32")?;

        let jwt_secret =
            env::var("AUTH_JWT_SECRET").context("AUTH_JWT_SECRET environment variable is required")?;
        if jwt_secret.len() < 16 {
            bail!("AUTH_JWT_SECRET must be at least 16 bytes");
        }

        let jwt_audience =
            env::var("AUTH_JWT_AUDIENCE").unwrap_or_else(|_| "authenticated".to_string());

        let auth_cookie_name =
            env::var("AUTH_COOKIE_NAME").unwrap_or_else(|_| "flowdesk-access-token".to_string());

        let login_path = absolute_path("LOGIN_PATH", "/login")?;
        let landing_path = absolute_path("LANDING_PATH", "/dashboard")?;
        if login_path == "/" || login_path == landing_path {
            bail!("LOGIN_PATH must not be / or equal to LANDING_PATH");
        }

        let navigation_file = env::var("NAVIGATION_FILE").ok().map(PathBuf::from);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            jwt_secret,
            jwt_audience,
            auth_cookie_name,
            login_path,
            landing_path,
            navigation_file,
            cors_allowed_origins,
        })
    }

    /// Redirect targets for route guards.
    pub fn guard_paths(&self) -> GuardPaths {
        GuardPaths {
            login: self.login_path.clone(),
            landing: self.landing_path.clone(),
        }
    }
}

fn absolute_path(var: &str, default: &str) -> Result<String> {
    let value = env::var(var).unwrap_or_else(|_| default.to_string());
    if !value.starts_with('/') {
        bail!("{var} must be an absolute path, got {value:?}");
    }
    Ok(value)
}
