//! The two conversion directions, from files on disk to files on disk.
//!
//! Unreadable JSON files do not abort a run: they are reported in the
//! [`ConversionReport`] and the remaining files are converted. Errors that
//! leave nothing sensible to write (unreadable CSV, conflicting keys, a
//! failed CSV write) are returned as `Err`.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    discovery::{DEFAULT_PREFIX, LanguageFile, discover_language_files, language_file_name},
    error::Error,
    fill::{FillOptions, FillReport, TranslationFiller},
    flatten::flatten_into,
    formats::{Document, Table},
    nest::nest_records,
    traits::Parser,
    translate::Translator,
    types::RecordCollection,
};

/// CSV file name used when none is configured.
pub const DEFAULT_CSV_FILE: &str = "i18n.csv";

/// Where to read and write, and how to name files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Directory holding the JSON files; relative CSV paths are resolved against it.
    pub working_dir: PathBuf,
    /// File name prefix of the JSON files, e.g. `locale-`.
    pub prefix: String,
    /// CSV file to write (JSON → CSV) or read (CSV → JSON).
    pub csv_file: PathBuf,
    /// Used when a translator is passed to [`json_to_csv`].
    pub fill: FillOptions,
}

impl ConvertOptions {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            csv_file: PathBuf::from(DEFAULT_CSV_FILE),
            fill: FillOptions::default(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_csv_file(mut self, csv_file: impl Into<PathBuf>) -> Self {
        self.csv_file = csv_file.into();
        self
    }

    pub fn with_fill(mut self, fill: FillOptions) -> Self {
        self.fill = fill;
        self
    }

    /// The CSV path, resolved against the working directory.
    pub fn csv_path(&self) -> PathBuf {
        self.working_dir.join(&self.csv_file)
    }

    /// Output path of a language's JSON document.
    pub fn json_path(&self, language: &str) -> PathBuf {
        self.working_dir.join(language_file_name(&self.prefix, language))
    }
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Summary of one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Language columns, in output order.
    pub languages: Vec<String>,
    /// Number of keys converted.
    pub records: usize,
    /// Files successfully written.
    pub written: Vec<PathBuf>,
    /// Files skipped because of an error.
    pub failures: Vec<FileFailure>,
    /// Present when missing values were auto-translated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillReport>,
}

impl ConversionReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, path: &Path, error: &Error) {
        warn!(path = %path.display(), error = %error, "skipping file");
        self.failures.push(FileFailure {
            path: path.to_path_buf(),
            message: error.to_string(),
        });
    }
}

/// Reads and flattens the given language files.
///
/// Each file is flattened on its own first, so a file failing halfway
/// contributes nothing. Returns the languages that loaded, in input order,
/// and the merged records.
pub fn load_language_files(
    files: &[LanguageFile],
    report: &mut ConversionReport,
) -> (Vec<String>, RecordCollection) {
    let mut languages = Vec::new();
    let mut records = RecordCollection::new();

    for file in files {
        let loaded = Document::read_from(&file.path).and_then(|doc| {
            let mut own = RecordCollection::new();
            flatten_into(&mut own, &file.language, &doc.root)?;
            Ok(own)
        });

        match loaded {
            Ok(own) => {
                info!(path = %file.path.display(), keys = own.len(), "read language file");
                for record in own.into_records() {
                    records.insert(record);
                }
                languages.push(file.language.clone());
            }
            Err(e) => report.fail(&file.path, &e),
        }
    }

    (languages, records)
}

/// Converts all `<prefix>*.json` files of the working directory into one CSV.
///
/// With a translator, missing values are filled from the reference language
/// (see [`FillOptions`]) before the table is written. Rows are sorted by key,
/// columns follow the file-name order of the JSON files.
pub fn json_to_csv(
    options: &ConvertOptions,
    translator: Option<&dyn Translator>,
) -> Result<ConversionReport, Error> {
    let files = discover_language_files(&options.working_dir, &options.prefix)?;
    if files.is_empty() {
        return Err(Error::DataMismatch(format!(
            "no `{}*.json` files found in {}",
            options.prefix,
            options.working_dir.display()
        )));
    }

    let mut report = ConversionReport::default();
    let (languages, mut records) = load_language_files(&files, &mut report);
    if languages.is_empty() {
        warn!("no language file could be read, CSV not written");
        return Ok(report);
    }

    if let Some(translator) = translator {
        let filler = TranslationFiller::new(translator, options.fill.clone());
        report.fill = Some(filler.fill(&mut records, &languages)?);
    }

    records.sort_by_key();
    report.languages = languages.clone();
    report.records = records.len();

    let csv_path = options.csv_path();
    Table::new(languages, records).write_to(&csv_path)?;
    info!(path = %csv_path.display(), records = report.records, "wrote CSV");
    report.written.push(csv_path);

    Ok(report)
}

/// Converts the CSV into one `<prefix><language>.json` per language column.
///
/// Keys are sorted before nesting so repeated runs produce identical files.
/// A language file that cannot be written is reported; the others are still
/// written.
pub fn csv_to_json(options: &ConvertOptions) -> Result<ConversionReport, Error> {
    let csv_path = options.csv_path();
    let Table {
        languages,
        mut records,
    } = Table::read_from(&csv_path)?;
    info!(path = %csv_path.display(), records = records.len(), "read CSV");

    records.sort_by_key();
    let documents = nest_records(&languages, &records)?;

    let mut report = ConversionReport {
        languages,
        records: records.len(),
        ..ConversionReport::default()
    };

    for (language, root) in documents {
        let path = options.json_path(&language);
        if !is_safe_file_component(&language) {
            report.fail(
                &path,
                &Error::InvalidLanguage(format!("`{}` is not usable in a file name", language)),
            );
            continue;
        }

        match Document::new(root).write_to(&path) {
            Ok(()) => {
                info!(path = %path.display(), language = %language, "wrote JSON");
                report.written.push(path);
            }
            Err(e) => report.fail(&path, &e),
        }
    }

    Ok(report)
}

fn is_safe_file_component(language: &str) -> bool {
    !language.contains(['/', '\\']) && language != "." && language != ".."
}
