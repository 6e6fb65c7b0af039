//! Authenticated product pages: dashboard, agents, workflows, templates and
//! account settings.
//!
//! Every route here sits behind the authenticated guard.

use axum::extract::{Path, State};
use axum::http::Uri;
use axum::response::Html;
use axum::routing::get;
use axum::{Extension, Router};
use uuid::Uuid;

use crate::breadcrumb::BreadcrumbOverlay;
use crate::error::AppResult;
use crate::guard::ShellContext;
use crate::state::AppState;

use super::helpers::{PlaceholderPage, path_prefix, render_page, short_id};

/// Dashboard.
///
/// GET /dashboard
async fn dashboard(
    State(state): State<AppState>,
    Extension(ctx): Extension<ShellContext>,
    Extension(overlay): Extension<BreadcrumbOverlay>,
    uri: Uri,
) -> AppResult<Html<String>> {
    let page = PlaceholderPage::new(
        "Activity across your agents and workflows.",
        "Nothing has run yet. Create an agent to get started.",
    );
    render_page(&state, &ctx, &overlay, uri.path(), "Dashboard", &page)
}

/// GET /agents
async fn agents(
    State(state): State<AppState>,
    Extension(ctx): Extension<ShellContext>,
    Extension(overlay): Extension<BreadcrumbOverlay>,
    uri: Uri,
) -> AppResult<Html<String>> {
    let page = PlaceholderPage::new("Agents in this workspace.", "No agents yet.");
    render_page(&state, &ctx, &overlay, uri.path(), "Agents", &page)
}

/// Agent detail. Labels the id segment in the breadcrumb trail.
///
/// The label is keyed by the path as requested, since `Uuid` also parses
/// uppercase and unhyphenated forms.
///
/// GET /agents/{id}
async fn agent_detail(
    State(state): State<AppState>,
    Extension(ctx): Extension<ShellContext>,
    Extension(overlay): Extension<BreadcrumbOverlay>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> AppResult<Html<String>> {
    let title = format!("Agent {}", short_id(&id));
    let _labels = overlay.set_custom_labels([(path_prefix(uri.path(), 2), title.clone())]);

    let page = PlaceholderPage::new("Agent configuration.", "This agent has no tools configured.");
    render_page(&state, &ctx, &overlay, uri.path(), &title, &page)
}

/// GET /workflows
async fn workflows(
    State(state): State<AppState>,
    Extension(ctx): Extension<ShellContext>,
    Extension(overlay): Extension<BreadcrumbOverlay>,
    uri: Uri,
) -> AppResult<Html<String>> {
    let page = PlaceholderPage::new("Workflows in this workspace.", "No workflows yet.");
    render_page(&state, &ctx, &overlay, uri.path(), "Workflows", &page)
}

/// GET /workflows/{id}
async fn workflow_detail(
    State(state): State<AppState>,
    Extension(ctx): Extension<ShellContext>,
    Extension(overlay): Extension<BreadcrumbOverlay>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> AppResult<Html<String>> {
    let title = workflow_label(&id);
    let _labels = overlay.set_custom_labels([(path_prefix(uri.path(), 2), title.clone())]);

    let page = PlaceholderPage::new("Workflow steps.", "This workflow has no steps.");
    render_page(&state, &ctx, &overlay, uri.path(), &title, &page)
}

/// Run history for one workflow. The workflow's own segment is an ancestor
/// here, so its label comes from the override.
///
/// GET /workflows/{id}/runs
async fn workflow_runs(
    State(state): State<AppState>,
    Extension(ctx): Extension<ShellContext>,
    Extension(overlay): Extension<BreadcrumbOverlay>,
    Path(id): Path<Uuid>,
    uri: Uri,
) -> AppResult<Html<String>> {
    let _labels = overlay.set_custom_labels([(path_prefix(uri.path(), 2), workflow_label(&id))]);

    let page = PlaceholderPage::new("Past runs of this workflow.", "This workflow has not run yet.");
    render_page(&state, &ctx, &overlay, uri.path(), "Runs", &page)
}

fn workflow_label(id: &Uuid) -> String {
    format!("Workflow {}", short_id(id))
}

/// GET /templates
async fn templates(
    State(state): State<AppState>,
    Extension(ctx): Extension<ShellContext>,
    Extension(overlay): Extension<BreadcrumbOverlay>,
    uri: Uri,
) -> AppResult<Html<String>> {
    let page = PlaceholderPage::new(
        "Starting points for new agents and workflows.",
        "Templates are on their way.",
    );
    render_page(&state, &ctx, &overlay, uri.path(), "Templates", &page)
}

/// GET /settings
async fn settings(
    State(state): State<AppState>,
    Extension(ctx): Extension<ShellContext>,
    Extension(overlay): Extension<BreadcrumbOverlay>,
    uri: Uri,
) -> AppResult<Html<String>> {
    let page = PlaceholderPage::new("Your profile and preferences.", "No preferences to change yet.");
    render_page(&state, &ctx, &overlay, uri.path(), "Settings", &page)
}

/// Create the authenticated page router. The caller attaches the guard.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/agents", get(agents))
        .route("/agents/{id}", get(agent_detail))
        .route("/workflows", get(workflows))
        .route("/workflows/{id}", get(workflow_detail))
        .route("/workflows/{id}/runs", get(workflow_runs))
        .route("/templates", get(templates))
        .route("/settings", get(settings))
}
