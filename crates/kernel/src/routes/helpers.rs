//! Shared route helpers for page rendering.

use axum::response::Html;
use serde::Serialize;
use uuid::Uuid;

use crate::breadcrumb::BreadcrumbOverlay;
use crate::error::AppResult;
use crate::guard::ShellContext;
use crate::state::AppState;
use crate::theme::ShellView;

/// Body of a placeholder product page.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceholderPage {
    pub description: String,
    pub empty_message: String,
}

impl PlaceholderPage {
    pub fn new(description: &str, empty_message: &str) -> Self {
        Self {
            description: description.to_string(),
            empty_message: empty_message.to_string(),
        }
    }
}

/// Render a page inside the application shell.
///
/// Navigation is filtered for the caller's role and the breadcrumb trail is
/// resolved through the request's overlay, so any labels the handler
/// declared beforehand are applied.
pub fn render_page(
    state: &AppState,
    ctx: &ShellContext,
    overlay: &BreadcrumbOverlay,
    path: &str,
    title: &str,
    page: &PlaceholderPage,
) -> AppResult<Html<String>> {
    let navigation = state.navigation().filter(ctx.role);
    let shell = ShellView::new(title, ctx, &navigation, path, overlay.trail(path));

    let html = state.theme().render_shell("page.html", &shell, page)?;
    Ok(Html(html))
}

/// The first `segments` segments of a request path, spelled as requested.
///
/// `/workflows/ABC/runs` with two segments is `/workflows/ABC`.
pub fn path_prefix(path: &str, segments: usize) -> String {
    path.split('/')
        .filter(|s| !s.is_empty())
        .take(segments)
        .fold(String::new(), |mut prefix, segment| {
            prefix.push('/');
            prefix.push_str(segment);
            prefix
        })
}

/// First eight hex digits of an id, for compact labels.
pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_is_eight_hex_digits() {
        let id = Uuid::parse_str("7f3a1b2c-0000-4000-8000-000000000000").unwrap_or_default();
        assert_eq!(short_id(&id), "7f3a1b2c");
    }

    #[test]
    fn path_prefix_keeps_requested_spelling() {
        assert_eq!(
            path_prefix("/workflows/7F3A1B2C00004000800000000000000A/runs", 2),
            "/workflows/7F3A1B2C00004000800000000000000A"
        );
        assert_eq!(path_prefix("/agents/", 2), "/agents");
        assert_eq!(path_prefix("/", 2), "");
    }
}
