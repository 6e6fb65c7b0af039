//! Profile lookups.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Profile;

/// Source of profile records keyed by user id.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the profile for a user, if one exists.
    async fn find(&self, user_id: Uuid) -> Result<Option<Profile>>;
}

/// Postgres-backed profile store reading the `profiles` table.
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn find(&self, user_id: Uuid) -> Result<Option<Profile>> {
        Profile::find_by_id(&self.pool, user_id).await
    }
}

/// In-memory profile store for local demos and tests.
#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: DashMap<Uuid, Profile>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile.
    pub fn insert(&self, profile: Profile) {
        self.profiles.insert(profile.id, profile);
    }

    /// Remove a profile, returning it if present.
    pub fn remove(&self, user_id: Uuid) -> Option<Profile> {
        self.profiles.remove(&user_id).map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find(&self, user_id: Uuid) -> Result<Option<Profile>> {
        Ok(self.profiles.get(&user_id).map(|p| p.clone()))
    }
}
