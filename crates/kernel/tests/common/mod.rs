#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common test utilities for integration tests.
//!
//! [`TestApp`] wraps the REAL kernel router and state. Profiles are held in
//! an in-memory store and identities come from tokens signed with the test
//! secret, so the full guard path (token → identity → profile → role) runs
//! unmodified.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use flowdesk_kernel::AppState;
use flowdesk_kernel::guard::GuardPaths;
use flowdesk_kernel::identity::{HostedIdentityProvider, MemoryProfileStore, TokenVerifier};
use flowdesk_kernel::menu::NavRegistry;
use flowdesk_kernel::models::{Profile, Role};
use flowdesk_kernel::routes;
use flowdesk_test_utils::{TEST_AUDIENCE, TEST_COOKIE_NAME, TEST_JWT_SECRET, TestUser};

/// Test application wrapper using the REAL kernel routes and state.
pub struct TestApp {
    router: Router,
    pub profiles: Arc<MemoryProfileStore>,
    pub state: AppState,
}

impl TestApp {
    /// Create a test application with the built-in navigation.
    pub fn new() -> Self {
        Self::with_navigation(NavRegistry::builtin())
    }

    /// Create a test application with a custom navigation registry.
    pub fn with_navigation(navigation: NavRegistry) -> Self {
        let profiles = Arc::new(MemoryProfileStore::new());
        let provider = HostedIdentityProvider::new(
            TokenVerifier::new(TEST_JWT_SECRET.as_bytes(), TEST_AUDIENCE),
            TEST_COOKIE_NAME,
            profiles.clone(),
        );

        let state = AppState::with_provider(
            Arc::new(provider),
            navigation,
            GuardPaths::default(),
            TEST_COOKIE_NAME,
        )
        .expect("Failed to initialize AppState");

        let router = routes::app_router(state.clone());

        Self {
            router,
            profiles,
            state,
        }
    }

    /// Store a profile for the test user, as the hosted backend would.
    pub fn register(&self, user: &TestUser) {
        let mut profile = Profile::new(user.id, Role::from_marker(&user.role));
        profile.is_demo = user.is_demo;
        profile.full_name = user.full_name.clone();
        self.profiles.insert(profile);
    }

    /// Send a request to the test application.
    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }

    /// GET `path` anonymously.
    pub async fn get(&self, path: &str) -> Response<Body> {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// GET `path` with the user's bearer token.
    pub async fn get_as(&self, user: &TestUser, path: &str) -> Response<Body> {
        self.request(
            Request::get(path)
                .header(header::AUTHORIZATION, user.bearer())
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }
}

/// Location header of a redirect response.
pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Read the full response body as a string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
