//! File formats handled by i18n-table.
//!
//! [`Table`] is the semicolon-separated CSV with one column per language,
//! [`Document`] one language's nested JSON file.

pub mod csv;
pub mod json;

pub use self::csv::Table;
pub use self::json::Document;
