//! Database models.

pub mod profile;
pub mod role;

pub use profile::Profile;
pub use role::Role;
