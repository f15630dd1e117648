//! CLI library for testing purposes

pub mod summary;
pub mod translation;

pub use summary::{print_summary, render_summary};
pub use translation::deepl_config;
