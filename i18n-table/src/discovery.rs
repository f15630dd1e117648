//! Locating per-language JSON files and naming them.
//!
//! A language file is named `<prefix><language>.json`, e.g. `locale-de.json`
//! with the default prefix.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;

/// Prefix used when none is configured.
pub const DEFAULT_PREFIX: &str = "locale-";

const JSON_EXTENSION: &str = "json";

/// A discovered JSON file and the language code derived from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageFile {
    pub language: String,
    pub path: PathBuf,
}

/// Derives the language code from a file name by stripping `prefix` and the
/// `.json` extension.
///
/// # Example
///
/// ```rust
/// use i18n_table::discovery::language_from_path;
///
/// assert_eq!(language_from_path("/tmp/locale-de.json", "locale-")?, "de");
/// assert_eq!(language_from_path("en.json", "")?, "en");
/// # Ok::<(), i18n_table::Error>(())
/// ```
pub fn language_from_path<P: AsRef<Path>>(path: P, prefix: &str) -> Result<String, Error> {
    let path = path.as_ref();
    let invalid = || {
        Error::InvalidLanguage(format!(
            "cannot derive a language from `{}` with prefix `{}`",
            path.display(),
            prefix
        ))
    };

    if path.extension().and_then(|e| e.to_str()) != Some(JSON_EXTENSION) {
        return Err(invalid());
    }
    let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(invalid)?;
    let language = stem.strip_prefix(prefix).ok_or_else(invalid)?;
    if language.is_empty() {
        return Err(invalid());
    }
    Ok(language.to_string())
}

/// File name for a language's JSON document.
pub fn language_file_name(prefix: &str, language: &str) -> String {
    format!("{}{}.{}", prefix, language, JSON_EXTENSION)
}

/// Lists all `<prefix>*.json` files directly inside `dir`, sorted by file
/// name so the language order is stable between runs.
///
/// Files with another extension or without the prefix are skipped.
pub fn discover_language_files<P: AsRef<Path>>(
    dir: P,
    prefix: &str,
) -> Result<Vec<LanguageFile>, Error> {
    let dir = dir.as_ref();
    let entries = std::fs::read_dir(dir).map_err(|e| Error::file_io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::file_io(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(JSON_EXTENSION) {
            continue;
        }
        match language_from_path(&path, prefix) {
            Ok(language) => {
                debug!(path = %path.display(), language = %language, "found language file");
                files.push(LanguageFile { language, path });
            }
            Err(_) => debug!(path = %path.display(), prefix, "skipping JSON file without prefix"),
        }
    }

    files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(files)
}
