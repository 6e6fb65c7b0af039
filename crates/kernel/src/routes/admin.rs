//! Administration pages. Every route here sits behind the admin guard.

use axum::extract::State;
use axum::http::Uri;
use axum::response::{Html, Redirect};
use axum::routing::get;
use axum::{Extension, Router};

use crate::breadcrumb::BreadcrumbOverlay;
use crate::error::AppResult;
use crate::guard::ShellContext;
use crate::state::AppState;

use super::helpers::{PlaceholderPage, render_page};

/// GET /admin
async fn index() -> Redirect {
    Redirect::to("/admin/users")
}

/// GET /admin/users
async fn users(
    State(state): State<AppState>,
    Extension(ctx): Extension<ShellContext>,
    Extension(overlay): Extension<BreadcrumbOverlay>,
    uri: Uri,
) -> AppResult<Html<String>> {
    tracing::info!(admin = %ctx.profile.id, "admin viewed user list");
    let page = PlaceholderPage::new("Members of this workspace and their roles.", "No members to show.");
    render_page(&state, &ctx, &overlay, uri.path(), "Users", &page)
}

/// GET /admin/settings
async fn system_settings(
    State(state): State<AppState>,
    Extension(ctx): Extension<ShellContext>,
    Extension(overlay): Extension<BreadcrumbOverlay>,
    uri: Uri,
) -> AppResult<Html<String>> {
    let page = PlaceholderPage::new("Workspace-wide configuration.", "No settings available yet.");
    render_page(&state, &ctx, &overlay, uri.path(), "System Settings", &page)
}

/// Create the admin router. The caller attaches the admin guard.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(index))
        .route("/admin/users", get(users))
        .route("/admin/settings", get(system_settings))
}
