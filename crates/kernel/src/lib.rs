//! Flowdesk Kernel Library
//!
//! Route guards, role resolution, navigation and breadcrumbs for the
//! Flowdesk console. The main entry point for running the server is the
//! `flowdesk` binary.

pub mod breadcrumb;
pub mod config;
pub mod db;
pub mod error;
pub mod guard;
pub mod identity;
pub mod menu;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod theme;

pub use config::Config;
pub use state::AppState;
