//! Identity resolution against the hosted backend.
//!
//! The kernel never authenticates anyone itself. It asks an
//! [`IdentityProvider`] two questions per protected request: is there an
//! authenticated identity, and what profile belongs to it.

mod store;
mod token;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::http::request::Parts;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::Profile;

pub use store::{MemoryProfileStore, PgProfileStore, ProfileStore};
pub use token::{AccessClaims, TokenVerifier, extract_token};

/// Proof that the current request belongs to an authenticated party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

/// Token problems, kept distinct for logging.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("token has no subject")]
    MissingSubject,

    #[error("token subject is not a user id: {0}")]
    InvalidSubject(String),

    #[error("invalid token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// Source of the current identity and its profile.
///
/// Both lookups may suspend while the backend answers.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve the identity for the request, `None` when unauthenticated.
    async fn current_identity(&self, parts: &Parts) -> Result<Option<Identity>>;

    /// Resolve the profile for an identity, `None` when no record exists.
    async fn current_profile(&self, identity: &Identity) -> Result<Option<Profile>>;
}

/// Provider backed by the hosted backend's signed access tokens and a
/// profile store.
pub struct HostedIdentityProvider {
    verifier: TokenVerifier,
    cookie_name: String,
    profiles: Arc<dyn ProfileStore>,
}

impl HostedIdentityProvider {
    pub fn new(verifier: TokenVerifier, cookie_name: &str, profiles: Arc<dyn ProfileStore>) -> Self {
        Self {
            verifier,
            cookie_name: cookie_name.to_string(),
            profiles,
        }
    }
}

#[async_trait]
impl IdentityProvider for HostedIdentityProvider {
    async fn current_identity(&self, parts: &Parts) -> Result<Option<Identity>> {
        let Some(token) = extract_token(parts, &self.cookie_name) else {
            debug!(path = %parts.uri.path(), "no access token on request");
            return Ok(None);
        };

        let user_id = self.verifier.verify(&token)?;
        Ok(Some(Identity { user_id }))
    }

    async fn current_profile(&self, identity: &Identity) -> Result<Option<Profile>> {
        self.profiles.find(identity.user_id).await
    }
}
