//! Public authentication routes.
//!
//! Sign-in itself happens against the hosted backend from the login page;
//! the kernel only serves the page and clears the token cookie on logout.

use axum::extract::State;
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /login (or the configured login path)
async fn login_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    let mut context = tera::Context::new();
    context.insert("cookie_name", state.auth_cookie_name());

    Ok(Html(state.theme().render("login.html", &context)?))
}

/// Expire the access token cookie and return to the login page.
///
/// POST /logout
async fn logout(State(state): State<AppState>) -> Response {
    let cookie = expired_cookie(state.auth_cookie_name());
    tracing::debug!("cleared access token cookie");
    ([(header::SET_COOKIE, cookie)], Redirect::to(state.login_path())).into_response()
}

fn expired_cookie(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0; HttpOnly; Secure; SameSite=Lax")
}

/// Create the auth router.
pub fn router(login_path: &str) -> Router<AppState> {
    Router::new()
        .route(login_path, get(login_page))
        .route("/logout", post(logout))
}
