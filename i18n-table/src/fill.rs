//! Filling missing translations from a reference language.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{error::Error, translate::Translator, types::RecordCollection};

/// Reference language used when none is configured.
pub const DEFAULT_REFERENCE_LANGUAGE: &str = "de";

/// Settings for [`TranslationFiller`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillOptions {
    /// Language whose values are sent for translation.
    pub reference_language: String,
    /// Abort on the first failed translation instead of skipping it.
    pub fail_fast: bool,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            reference_language: DEFAULT_REFERENCE_LANGUAGE.to_string(),
            fail_fast: false,
        }
    }
}

impl FillOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_language(mut self, language: impl Into<String>) -> Self {
        self.reference_language = language.into();
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

/// Outcome counters of one fill run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillReport {
    /// Values set from a translation.
    pub translated: usize,
    /// Calls that failed or returned no candidate; the value stays empty.
    pub failed: usize,
    /// Records skipped because the reference language has no value.
    pub skipped_no_reference: usize,
}

/// Populates missing values by translating the reference language's value.
pub struct TranslationFiller<'a> {
    translator: &'a dyn Translator,
    options: FillOptions,
}

impl<'a> TranslationFiller<'a> {
    pub fn new(translator: &'a dyn Translator, options: FillOptions) -> Self {
        Self {
            translator,
            options,
        }
    }

    /// Fills every record in place.
    ///
    /// For each record, each language of `languages` other than the
    /// reference that has no value gets one translation attempt. Records
    /// without a reference value are left alone.
    ///
    /// # Errors
    ///
    /// Only with `fail_fast`; otherwise failures are logged and counted.
    pub fn fill(
        &self,
        records: &mut RecordCollection,
        languages: &[String],
    ) -> Result<FillReport, Error> {
        let reference = self.options.reference_language.as_str();
        let mut report = FillReport::default();
        info!(
            provider = self.translator.provider_name(),
            reference, "starting auto translation"
        );

        for record in records.iter_mut() {
            let Some(source_text) = record.value(reference).map(str::to_string) else {
                if languages.iter().any(|l| l != reference && !record.has_value(l)) {
                    report.skipped_no_reference += 1;
                }
                continue;
            };

            for language in languages {
                if language == reference || record.has_value(language) {
                    continue;
                }

                debug!(key = %record.key, language = %language, "translating");
                match self.translator.translate(&source_text, reference, language) {
                    Ok(candidates) => match candidates.into_iter().next() {
                        Some(text) => {
                            record.set_value(language.clone(), text);
                            report.translated += 1;
                        }
                        None => {
                            warn!(key = %record.key, language = %language, "no translation returned");
                            report.failed += 1;
                        }
                    },
                    Err(e) if self.options.fail_fast => return Err(e),
                    Err(e) => {
                        warn!(key = %record.key, language = %language, error = %e, "translation failed");
                        report.failed += 1;
                    }
                }
            }
        }

        info!(
            translated = report.translated,
            failed = report.failed,
            "auto translation finished"
        );
        Ok(report)
    }
}
