//! Navigation registry and role filter.
//!
//! The registry is a fixed, ordered table of sections. Each request derives
//! its own [`FilteredNavigation`] from it; nothing is cached between calls.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::Role;

/// Small marker shown next to a navigation label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Badge {
    Count(u32),
    Text(String),
}

/// A single navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Human-readable label.
    pub label: String,
    /// Target path.
    pub href: String,
    /// Only visible to the elevated role.
    #[serde(default)]
    pub restricted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl NavItem {
    /// Whether `role` may see this item.
    pub fn visible_to(&self, role: Role) -> bool {
        match role {
            Role::Admin => true,
            Role::User => !self.restricted,
        }
    }

    /// Whether this item should be highlighted for `path`.
    ///
    /// Matches the exact path or any descendant of it; `/` only matches
    /// itself.
    pub fn is_active(&self, path: &str) -> bool {
        let href = self.href.trim_end_matches('/');
        if href.is_empty() {
            return path == "/";
        }
        path == href
            || path
                .strip_prefix(href)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// A titled group of navigation items, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    pub title: String,
    pub items: Vec<NavItem>,
}

struct ItemDef {
    label: &'static str,
    href: &'static str,
    restricted: bool,
    badge: Option<&'static str>,
}

struct SectionDef {
    title: &'static str,
    items: &'static [ItemDef],
}

const fn item(label: &'static str, href: &'static str) -> ItemDef {
    ItemDef {
        label,
        href,
        restricted: false,
        badge: None,
    }
}

const fn restricted(label: &'static str, href: &'static str) -> ItemDef {
    ItemDef {
        label,
        href,
        restricted: true,
        badge: None,
    }
}

const BUILTIN: &[SectionDef] = &[
    SectionDef {
        title: "Overview",
        items: &[item("Dashboard", "/dashboard")],
    },
    SectionDef {
        title: "Build",
        items: &[
            item("Agents", "/agents"),
            item("Workflows", "/workflows"),
            ItemDef {
                badge: Some("New"),
                ..item("Templates", "/templates")
            },
        ],
    },
    SectionDef {
        title: "Administration",
        items: &[
            restricted("Users", "/admin/users"),
            restricted("System Settings", "/admin/settings"),
        ],
    },
    SectionDef {
        title: "Account",
        items: &[item("Settings", "/settings")],
    },
];

/// Ordered table of navigation sections, fixed after startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NavRegistry {
    sections: Vec<NavSection>,
}

impl NavRegistry {
    /// Create a registry from sections.
    pub fn new(sections: Vec<NavSection>) -> Self {
        Self { sections }
    }

    /// The built-in Flowdesk navigation.
    pub fn builtin() -> Self {
        let sections = BUILTIN
            .iter()
            .map(|section| NavSection {
                title: section.title.to_string(),
                items: section
                    .items
                    .iter()
                    .map(|def| NavItem {
                        label: def.label.to_string(),
                        href: def.href.to_string(),
                        restricted: def.restricted,
                        badge: def.badge.map(|b| Badge::Text(b.to_string())),
                    })
                    .collect(),
            })
            .collect();

        Self { sections }
    }

    /// Load a registry from a JSON array of sections.
    pub fn from_json(json: &str) -> Result<Self> {
        let sections: Vec<NavSection> = serde_json::from_str(json)
            .inspect_err(|e| warn!(error = %e, "failed to parse navigation registry"))
            .context("invalid navigation registry JSON")?;

        for section in &sections {
            for item in &section.items {
                if !item.href.starts_with('/') {
                    bail!(
                        "navigation item {:?} in section {:?} has non-absolute href {:?}",
                        item.label,
                        section.title,
                        item.href
                    );
                }
            }
        }

        debug!(sections = sections.len(), "loaded navigation registry");
        Ok(Self { sections })
    }

    /// Derive the navigation visible to `role`.
    ///
    /// Restricted items are dropped for non-elevated roles and sections left
    /// without items are dropped entirely. Section and item order are kept.
    pub fn filter(&self, role: Role) -> FilteredNavigation {
        let sections = self
            .sections
            .iter()
            .filter_map(|section| {
                let items: Vec<NavItem> = section
                    .items
                    .iter()
                    .filter(|item| item.visible_to(role))
                    .cloned()
                    .collect();

                (!items.is_empty()).then(|| NavSection {
                    title: section.title.clone(),
                    items,
                })
            })
            .collect();

        FilteredNavigation { sections }
    }

    pub fn sections(&self) -> &[NavSection] {
        &self.sections
    }

    /// Total number of items across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Reuse a filtered result as a registry. Every item becomes unrestricted,
/// since it was already visible to the role it was filtered for.
impl From<FilteredNavigation> for NavRegistry {
    fn from(filtered: FilteredNavigation) -> Self {
        let sections = filtered
            .sections
            .into_iter()
            .map(|mut section| {
                for item in &mut section.items {
                    item.restricted = false;
                }
                section
            })
            .collect();
        Self { sections }
    }
}

/// Navigation derived for one role. Owns its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilteredNavigation {
    sections: Vec<NavSection>,
}

impl FilteredNavigation {
    pub fn sections(&self) -> &[NavSection] {
        &self.sections
    }

    /// All items in display order.
    pub fn items(&self) -> impl Iterator<Item = &NavItem> {
        self.sections.iter().flat_map(|s| s.items.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Build the template view model, flagging items active for `path`.
    pub fn mark_active(&self, path: &str) -> Vec<NavGroup> {
        self.sections
            .iter()
            .map(|section| NavGroup {
                title: section.title.clone(),
                links: section
                    .items
                    .iter()
                    .map(|item| NavLink {
                        label: item.label.clone(),
                        href: item.href.clone(),
                        badge: item.badge.clone(),
                        active: item.is_active(path),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// Section as handed to the shell template.
#[derive(Debug, Clone, Serialize)]
pub struct NavGroup {
    pub title: String,
    pub links: Vec<NavLink>,
}

/// Item as handed to the shell template.
#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
    pub badge: Option<Badge>,
    pub active: bool,
}
