//! Profile model.
//!
//! A profile is the application-level record attached to an authenticated
//! identity. Profiles are written by the hosted backend; the kernel only
//! reads them.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::role::Role;

/// Profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Same id as the identity's user id.
    pub id: Uuid,
    pub role: Role,
    /// Sandbox account; the shell shows a demo banner.
    pub is_demo: bool,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub created: DateTime<Utc>,
}

/// Raw `profiles` row. The role column is free text and goes through
/// [`Role::from_marker`] on the way out.
#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    role: String,
    is_demo: bool,
    full_name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
    created: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            role: Role::from_marker(&row.role),
            is_demo: row.is_demo,
            full_name: row.full_name,
            email: row.email,
            avatar_url: row.avatar_url,
            created: row.created,
        }
    }
}

impl Profile {
    /// Create an in-memory profile with no optional fields set.
    pub fn new(id: Uuid, role: Role) -> Self {
        Self {
            id,
            role,
            is_demo: false,
            full_name: None,
            email: None,
            avatar_url: None,
            created: Utc::now(),
        }
    }

    /// Mark the profile as a demo/sandbox account.
    pub fn demo(mut self) -> Self {
        self.is_demo = true;
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.full_name = Some(name.to_string());
        self
    }

    /// Name shown in the shell header, falling back to the email and then
    /// to a generic label.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("Account")
    }

    /// Find a profile by the identity's user id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT id, role, is_demo, full_name, email, avatar_url, created
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch profile by id")?;

        Ok(row.map(Profile::from))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn row(role: &str) -> ProfileRow {
        ProfileRow {
            id: Uuid::nil(),
            role: role.to_string(),
            is_demo: false,
            full_name: None,
            email: Some("ops@example.com".to_string()),
            avatar_url: None,
            created: Utc::now(),
        }
    }

    #[test]
    fn row_role_is_resolved_exactly() {
        assert_eq!(Profile::from(row("admin")).role, Role::Admin);
        assert_eq!(Profile::from(row("Admin")).role, Role::User);
        assert_eq!(Profile::from(row("billing")).role, Role::User);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let profile = Profile::from(row("user"));
        assert_eq!(profile.display_name(), "ops@example.com");

        let named = profile.with_name("Ada");
        assert_eq!(named.display_name(), "Ada");

        let anonymous = Profile::new(Uuid::nil(), Role::User);
        assert_eq!(anonymous.display_name(), "Account");
    }
}
