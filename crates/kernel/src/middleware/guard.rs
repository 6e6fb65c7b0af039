//! Route guard middleware.
//!
//! Protected sub-routers attach one of these with `route_layer` so the guard
//! runs before any handler in the subtree. A proceeding request carries its
//! [`ShellContext`] in the request extensions.
//!
//! [`ShellContext`]: crate::guard::ShellContext

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::guard::{Access, GuardOutcome};
use crate::state::AppState;

/// Require an authenticated identity with a profile.
pub async fn require_authenticated(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    enforce(&state, Access::Authenticated, request, next).await
}

/// Require the admin role.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    enforce(&state, Access::Admin, request, next).await
}

async fn enforce(state: &AppState, access: Access, request: Request<Body>, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    match state.guard(access).evaluate(state.identity(), &parts).await {
        GuardOutcome::Proceed(ctx) => {
            let mut request = Request::from_parts(parts, body);
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        GuardOutcome::Redirect { location, .. } => Redirect::to(&location).into_response(),
    }
}
