//! Flowdesk test utilities.
//!
//! Helpers for integration testing: user fixtures with signed access
//! tokens and sample navigation registries.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use uuid::Uuid;

/// Secret used to sign tokens in tests.
pub const TEST_JWT_SECRET: &str = "flowdesk-test-secret-0123456789";

/// Audience the hosted backend puts on user tokens.
pub const TEST_AUDIENCE: &str = "authenticated";

/// Cookie name used by the test application.
pub const TEST_COOKIE_NAME: &str = "flowdesk-access-token";

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    aud: &'a str,
    exp: i64,
}

/// Sign an HS256 access token for `sub`, valid for `ttl_secs` seconds
/// (negative for an already expired token).
///
/// Panics if signing fails, so a broken fixture cannot pass as an
/// unauthenticated request.
#[allow(clippy::expect_used)]
pub fn sign_token(secret: &str, sub: &str, audience: &str, ttl_secs: i64) -> String {
    let claims = Claims {
        sub,
        aud: audience,
        exp: chrono::Utc::now().timestamp() + ttl_secs,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to sign test token")
}

/// Create a regular test user.
pub fn test_user() -> TestUser {
    TestUser {
        id: Uuid::now_v7(),
        role: "user".to_string(),
        is_demo: false,
        full_name: None,
    }
}

/// Create an admin test user.
pub fn admin_user() -> TestUser {
    test_user().with_role("admin")
}

/// Create a demo/sandbox test user.
pub fn demo_user() -> TestUser {
    test_user().demo()
}

/// A test user builder.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    /// Stored role value, exactly as the backend would hold it.
    pub role: String,
    pub is_demo: bool,
    pub full_name: Option<String>,
}

impl TestUser {
    /// Set the stored role value.
    pub fn with_role(mut self, role: &str) -> Self {
        self.role = role.to_string();
        self
    }

    /// Mark as a demo account.
    pub fn demo(mut self) -> Self {
        self.is_demo = true;
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.full_name = Some(name.to_string());
        self
    }

    /// A valid access token for this user.
    pub fn token(&self) -> String {
        sign_token(TEST_JWT_SECRET, &self.id.to_string(), TEST_AUDIENCE, 3600)
    }

    /// An expired access token for this user.
    pub fn expired_token(&self) -> String {
        sign_token(TEST_JWT_SECRET, &self.id.to_string(), TEST_AUDIENCE, -3600)
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token())
    }

    /// `Cookie` header value carrying the token.
    pub fn cookie(&self) -> String {
        format!("{TEST_COOKIE_NAME}={}", self.token())
    }
}

/// Navigation registry with one restricted item, as JSON.
pub fn main_nav_json() -> String {
    serde_json::json!([
        {
            "title": "Main",
            "items": [
                {"label": "Dashboard", "href": "/dashboard"},
                {"label": "Admin Panel", "href": "/admin/users", "restricted": true}
            ]
        }
    ])
    .to_string()
}
