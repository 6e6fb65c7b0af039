//! HTTP route handlers.

pub mod admin;
pub mod auth;
pub mod health;
pub mod helpers;
pub mod pages;

use axum::Router;
use axum::extract::State;
use axum::response::Redirect;
use axum::routing::get;

use crate::middleware::{attach_overlay, require_admin, require_authenticated};
use crate::state::AppState;

/// GET /
async fn front(State(state): State<AppState>) -> Redirect {
    Redirect::to(state.landing_path())
}

/// Build the application router.
///
/// Public routes are merged as-is. The page and admin subtrees each get
/// their guard as a route layer, so it only runs for routes that matched.
/// Every request gets its own breadcrumb overlay.
pub fn app_router(state: AppState) -> Router {
    let authenticated = pages::router().route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        require_authenticated,
    ));

    let admin = admin::router().route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        require_admin,
    ));

    Router::new()
        .route("/", get(front))
        .merge(auth::router(state.login_path()))
        .merge(health::router())
        .merge(authenticated)
        .merge(admin)
        .layer(axum::middleware::from_fn(attach_overlay))
        .with_state(state)
}
