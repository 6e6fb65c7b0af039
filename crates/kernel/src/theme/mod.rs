//! Theme system for the application shell.

mod engine;

pub use engine::{ShellView, ThemeEngine};
