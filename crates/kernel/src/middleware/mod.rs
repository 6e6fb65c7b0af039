//! HTTP middleware components.
//!
//! Provides route guards for protected subtrees and the per-request
//! breadcrumb overlay.

pub mod breadcrumb;
pub mod guard;

pub use breadcrumb::attach_overlay;
pub use guard::{require_admin, require_authenticated};
