//! Machine translation providers used to fill in missing values.
//!
//! The [`Translator`] trait keeps the filler independent of any concrete
//! service; [`DeeplTranslator`] talks to the DeepL REST API.

pub mod deepl;

pub use deepl::{DeeplConfig, DeeplTranslator};

use crate::error::Error;

/// A machine translation backend.
///
/// Calls are blocking; implementations are expected to bound them with a
/// timeout.
pub trait Translator {
    /// Translates `text` from `source` to `target` (both plain language codes
    /// as used in file names, e.g. `de`, `en-gb`).
    ///
    /// Returns every candidate the provider offers, best first. An empty
    /// vector means the provider had no translation.
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<Vec<String>, Error>;

    /// Name used in log output.
    fn provider_name(&self) -> &str;
}
