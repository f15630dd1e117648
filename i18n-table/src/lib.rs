#![forbid(unsafe_code)]
//! Convert i18n translation keys between a CSV table and nested JSON files.
//!
//! One JSON file per language (`locale-de.json`, `locale-en.json`, …) is
//! flattened into dotted keys and written as a semicolon-separated table with
//! one column per language. The reverse direction nests the keys of the
//! table back into one JSON file per language column.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use i18n_table::{ConvertOptions, csv_to_json, json_to_csv};
//!
//! let options = ConvertOptions::new("locales").with_prefix("locale-");
//!
//! // locales/locale-*.json -> locales/i18n.csv
//! let report = json_to_csv(&options, None)?;
//! println!("{} keys in {} languages", report.records, report.languages.len());
//!
//! // locales/i18n.csv -> locales/locale-*.json
//! csv_to_json(&options)?;
//! # Ok::<(), i18n_table::Error>(())
//! ```
//!
//! # Working in memory
//!
//! ```rust
//! use i18n_table::{flatten_documents, nest_records};
//! use serde_json::json;
//!
//! let de = json!({ "menu": { "open": "Öffnen" } });
//! let en = json!({ "menu": { "open": "Open", "close": "Close" } });
//! let records = flatten_documents([("de", &de), ("en", &en)])?;
//!
//! let languages = vec!["de".to_string(), "en".to_string()];
//! let documents = nest_records(&languages, &records)?;
//! assert_eq!(documents[0].1, json!({ "menu": { "open": "Öffnen", "close": "" } }));
//! # Ok::<(), i18n_table::Error>(())
//! ```

pub mod convert;
pub mod discovery;
pub mod error;
pub mod fill;
pub mod flatten;
pub mod formats;
pub mod nest;
pub mod traits;
pub mod translate;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    convert::{ConversionReport, ConvertOptions, FileFailure, csv_to_json, json_to_csv},
    discovery::{LanguageFile, discover_language_files, language_from_path},
    error::Error,
    fill::{FillOptions, FillReport, TranslationFiller},
    flatten::{flatten_documents, flatten_into},
    formats::{Document, Table},
    nest::{nest_language, nest_records},
    translate::{DeeplConfig, DeeplTranslator, Translator},
    types::{Record, RecordCollection},
};
