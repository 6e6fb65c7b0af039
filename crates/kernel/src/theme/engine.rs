//! Theme engine with Tera templates.

use anyhow::{Context, Result};
use serde::Serialize;
use tera::{Context as TeraContext, Tera};
use tracing::debug;

use crate::breadcrumb::Crumb;
use crate::guard::ShellContext;
use crate::menu::{FilteredNavigation, NavGroup};
use crate::models::Role;

/// Templates compiled into the binary.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../../templates/base.html")),
    ("page.html", include_str!("../../templates/page.html")),
    ("login.html", include_str!("../../templates/login.html")),
];

/// Everything the application shell needs to render around a page.
#[derive(Debug, Clone, Serialize)]
pub struct ShellView {
    pub title: String,
    pub user_name: String,
    pub role: Role,
    pub role_label: &'static str,
    pub is_demo: bool,
    pub navigation: Vec<NavGroup>,
    pub breadcrumbs: Vec<Crumb>,
}

impl ShellView {
    /// Assemble the shell for a guarded request.
    pub fn new(
        title: &str,
        ctx: &ShellContext,
        navigation: &FilteredNavigation,
        path: &str,
        breadcrumbs: Vec<Crumb>,
    ) -> Self {
        Self {
            title: title.to_string(),
            user_name: ctx.profile.display_name().to_string(),
            role: ctx.role,
            role_label: ctx.role.label(),
            is_demo: ctx.is_demo,
            navigation: navigation.mark_active(path),
            breadcrumbs,
        }
    }
}

/// Theme engine for rendering templates.
pub struct ThemeEngine {
    tera: Tera,
}

impl ThemeEngine {
    /// Create a theme engine with the built-in templates.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())
            .context("failed to compile built-in templates")?;

        let template_names: Vec<_> = tera.get_template_names().collect();
        debug!(count = template_names.len(), "loaded templates");

        Ok(Self { tera })
    }

    /// Render a template.
    pub fn render(&self, template: &str, context: &TeraContext) -> tera::Result<String> {
        self.tera.render(template, context)
    }

    /// Render a page template inside the shell.
    ///
    /// `page` is exposed to the template as `page`, the shell as `shell`.
    pub fn render_shell<P: Serialize>(
        &self,
        template: &str,
        shell: &ShellView,
        page: &P,
    ) -> tera::Result<String> {
        let mut context = TeraContext::new();
        context.insert("shell", shell);
        context.insert("page", page);
        self.render(template, &context)
    }

    pub fn tera(&self) -> &Tera {
        &self.tera
    }
}
