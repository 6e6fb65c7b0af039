//! Navigation for the application shell.
//!
//! The registry is declared once at startup and provides:
//! - Sections and items in display order
//! - Per-item restriction to the elevated role
//! - Role filtering into the per-request navigation the shell renders

mod registry;

pub use registry::{
    Badge, FilteredNavigation, NavGroup, NavItem, NavLink, NavRegistry, NavSection,
};
