//! Per-request breadcrumb overlay.

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::breadcrumb::BreadcrumbOverlay;

/// Give every request a fresh, empty [`BreadcrumbOverlay`].
///
/// The overlay is dropped with the request, so labels declared while
/// rendering one page can never reach another.
pub async fn attach_overlay(mut request: Request<Body>, next: Next) -> Response {
    request.extensions_mut().insert(BreadcrumbOverlay::new());
    next.run(request).await
}
