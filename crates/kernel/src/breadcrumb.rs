//! Breadcrumb label overlay.
//!
//! Detail views replace raw path segments (ids, slugs) in the breadcrumb
//! trail with readable names. Overrides live in a per-request store: a view
//! declares them with [`BreadcrumbOverlay::set_custom_labels`] and holds the
//! returned [`LabelScope`] for as long as it renders. Dropping the scope
//! clears the overrides.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::trace;

/// One entry in the rendered breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    pub href: String,
    pub label: String,
    /// Last entry of the trail.
    pub current: bool,
}

#[derive(Debug, Default)]
struct OverlayState {
    labels: HashMap<String, String>,
    /// Bumped on every replace or clear so stale scopes can tell they no
    /// longer own the map.
    generation: u64,
}

/// Handle to one request's breadcrumb overrides.
///
/// Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct BreadcrumbOverlay {
    inner: Arc<RwLock<OverlayState>>,
}

impl BreadcrumbOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all overrides with `labels`. Last call wins; nothing is
    /// merged.
    ///
    /// The overrides stay active until the returned scope is dropped or
    /// another view replaces them.
    pub fn set_custom_labels<I, K, V>(&self, labels: I) -> LabelScope
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let labels: HashMap<String, String> = labels
            .into_iter()
            .map(|(path, label)| (normalize(path.as_ref()), label.into()))
            .collect();

        let mut state = self.inner.write();
        state.generation += 1;
        trace!(
            count = labels.len(),
            generation = state.generation,
            "breadcrumb labels replaced"
        );
        state.labels = labels;

        LabelScope {
            overlay: self.clone(),
            generation: state.generation,
        }
    }

    /// Drop every override.
    pub fn clear(&self) {
        let mut state = self.inner.write();
        state.generation += 1;
        state.labels.clear();
    }

    /// Label for `path`: the override if one is declared, otherwise the
    /// default derived from the last path segment.
    pub fn resolve_label(&self, path: &str) -> String {
        let path = normalize(path);
        if let Some(label) = self.inner.read().labels.get(&path) {
            return label.clone();
        }
        default_label(&path)
    }

    /// Trail for `path`, one crumb per ancestor prefix.
    ///
    /// `/agents/42/edit` yields `/agents`, `/agents/42`, `/agents/42/edit`.
    /// The root path yields a single "Home" crumb.
    pub fn trail(&self, path: &str) -> Vec<Crumb> {
        let path = normalize(path);
        if path == "/" {
            return vec![Crumb {
                href: path,
                label: default_label("/"),
                current: true,
            }];
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut href = String::new();
        let mut crumbs = Vec::with_capacity(segments.len());

        for (idx, segment) in segments.iter().enumerate() {
            href.push('/');
            href.push_str(segment);
            crumbs.push(Crumb {
                href: href.clone(),
                label: self.resolve_label(&href),
                current: idx + 1 == segments.len(),
            });
        }

        crumbs
    }

    /// Number of active overrides.
    pub fn len(&self) -> usize {
        self.inner.read().labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().labels.is_empty()
    }
}

/// Teardown hook for a view's overrides.
#[must_use = "dropping the scope immediately clears the labels"]
#[derive(Debug)]
pub struct LabelScope {
    overlay: BreadcrumbOverlay,
    generation: u64,
}

impl Drop for LabelScope {
    fn drop(&mut self) {
        let mut state = self.overlay.inner.write();
        // A later view replaced the labels; they are not ours to clear.
        if state.generation != self.generation {
            return;
        }
        state.generation += 1;
        state.labels.clear();
    }
}

/// Readable label for the last segment of `path`.
///
/// `-` and `_` become spaces and each word is capitalized;
/// `/` is "Home".
pub fn default_label(path: &str) -> String {
    let Some(segment) = path.rsplit('/').find(|s| !s.is_empty()) else {
        return "Home".to_string();
    };

    segment
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip query, fragment and trailing slashes; ensure a leading slash.
fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn default_labels() {
        assert_eq!(default_label("/"), "Home");
        assert_eq!(default_label(""), "Home");
        assert_eq!(default_label("/agents"), "Agents");
        assert_eq!(default_label("/admin/system-settings"), "System Settings");
        assert_eq!(default_label("/workflows/run_history"), "Run History");
        assert_eq!(default_label("/agents/42"), "42");
    }

    #[test]
    fn override_wins_over_default() {
        let overlay = BreadcrumbOverlay::new();
        let _scope = overlay.set_custom_labels([("/agents/42", "Support Bot")]);
        assert_eq!(overlay.resolve_label("/agents/42"), "Support Bot");
        assert_eq!(overlay.resolve_label("/agents/42/"), "Support Bot");
        assert_eq!(overlay.resolve_label("/agents"), "Agents");
    }

    #[test]
    fn set_replaces_instead_of_merging() {
        let overlay = BreadcrumbOverlay::new();
        let _first = overlay.set_custom_labels([("/a", "First"), ("/b", "Bee")]);
        let _second = overlay.set_custom_labels([("/a", "Second")]);
        assert_eq!(overlay.resolve_label("/a"), "Second");
        assert_eq!(overlay.resolve_label("/b"), "B");
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn labels_reset_after_view_teardown() {
        let overlay = BreadcrumbOverlay::new();
        {
            let _scope = overlay.set_custom_labels([("/x", "Foo")]);
            assert_eq!(overlay.resolve_label("/x"), "Foo");
        }
        assert!(overlay.is_empty());
        assert_eq!(overlay.resolve_label("/x"), "X");
    }

    #[test]
    fn stale_scope_does_not_clear_newer_labels() {
        let overlay = BreadcrumbOverlay::new();
        let outgoing = overlay.set_custom_labels([("/x", "Old")]);
        let _incoming = overlay.set_custom_labels([("/y", "New")]);
        drop(outgoing);
        assert_eq!(overlay.resolve_label("/y"), "New");
        assert_eq!(overlay.resolve_label("/x"), "X");
    }

    #[test]
    fn explicit_clear() {
        let overlay = BreadcrumbOverlay::new();
        let scope = overlay.set_custom_labels([("/x", "Foo")]);
        overlay.clear();
        assert_eq!(overlay.resolve_label("/x"), "X");
        drop(scope);
        assert!(overlay.is_empty());
    }

    #[test]
    fn trail_uses_overrides_for_ancestors() {
        let overlay = BreadcrumbOverlay::new();
        let _scope = overlay.set_custom_labels([("/workflows/7f3a", "Nightly Sync")]);

        let trail = overlay.trail("/workflows/7f3a/run-history");
        let labels: Vec<_> = trail.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Workflows", "Nightly Sync", "Run History"]);

        let hrefs: Vec<_> = trail.iter().map(|c| c.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/workflows", "/workflows/7f3a", "/workflows/7f3a/run-history"]);

        assert!(trail.last().unwrap().current);
        assert!(trail[..2].iter().all(|c| !c.current));
    }

    #[test]
    fn trail_for_root() {
        let overlay = BreadcrumbOverlay::new();
        let trail = overlay.trail("/");
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].label, "Home");
        assert!(trail[0].current);
    }

    #[test]
    fn trail_ignores_query_string() {
        let overlay = BreadcrumbOverlay::new();
        let trail = overlay.trail("/agents?page=2");
        assert_eq!(trail.len(), 1);
        assert_eq!(trail[0].href, "/agents");
    }

    #[test]
    fn clones_share_state() {
        let overlay = BreadcrumbOverlay::new();
        let handle = overlay.clone();
        let _scope = handle.set_custom_labels([("/x", "Shared")]);
        assert_eq!(overlay.resolve_label("/x"), "Shared");
    }
}
