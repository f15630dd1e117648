//! DeepL provider for machine translation.
//!
//! # Authentication
//!
//! The key is sent as `Authorization: DeepL-Auth-Key <key>`. It is read from
//! the `DEEPL_API_KEY` environment variable by [`DeeplConfig::from_env`];
//! `DEEPL_API_URL` overrides the endpoint (the free API is the default, paid
//! accounts use `https://api.deepl.com`).
//!
//! # Example
//!
//! ```rust,no_run
//! use i18n_table::translate::{DeeplConfig, DeeplTranslator, Translator};
//!
//! let translator = DeeplTranslator::new(DeeplConfig::from_env()?)?;
//! let candidates = translator.translate("Hallo", "de", "en")?;
//! println!("{:?}", candidates);
//! # Ok::<(), i18n_table::Error>(())
//! ```

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use unic_langid::LanguageIdentifier;

use crate::{error::Error, translate::Translator};

/// Endpoint of the free DeepL API.
pub const DEFAULT_BASE_URL: &str = "https://api-free.deepl.com";
/// Upper bound for a single translation request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const API_KEY_VAR: &str = "DEEPL_API_KEY";
const API_URL_VAR: &str = "DEEPL_API_URL";

/// Connection settings for [`DeeplTranslator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeeplConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl DeeplConfig {
    /// Creates a config for the free endpoint with the default timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads `DEEPL_API_KEY` and, if set, `DEEPL_API_URL`.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            Error::Translation(format!("{} environment variable not set", API_KEY_VAR))
        })?;
        let config = Self::new(api_key);
        Ok(match std::env::var(API_URL_VAR) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url),
            _ => config,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v2/translate", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct DeeplResponse {
    #[serde(default)]
    translations: Vec<DeeplTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeeplTranslation {
    text: String,
}

/// Blocking DeepL client, one request per call.
#[derive(Debug, Clone)]
pub struct DeeplTranslator {
    config: DeeplConfig,
    client: Client,
}

impl DeeplTranslator {
    pub fn new(config: DeeplConfig) -> Result<Self, Error> {
        if config.api_key.trim().is_empty() {
            return Err(Error::Translation("API key cannot be empty".to_string()));
        }

        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DeeplConfig {
        &self.config
    }
}

impl Translator for DeeplTranslator {
    fn translate(&self, text: &str, source: &str, target: &str) -> Result<Vec<String>, Error> {
        let source_lang = deepl_source_code(source)?;
        let target_lang = deepl_target_code(target)?;

        let response = self
            .client
            .get(self.config.endpoint())
            .header(
                reqwest::header::AUTHORIZATION,
                format!("DeepL-Auth-Key {}", self.config.api_key),
            )
            .query(&[
                ("source_lang", source_lang.as_str()),
                ("target_lang", target_lang.as_str()),
                ("text", text),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::Translation(format!(
                "DeepL returned {}: {}",
                status,
                body.trim()
            )));
        }

        let body: DeeplResponse = response
            .json()
            .map_err(|e| Error::Translation(format!("malformed DeepL response: {}", e)))?;

        Ok(body.translations.into_iter().map(|t| t.text).collect())
    }

    fn provider_name(&self) -> &str {
        "DeepL"
    }
}

fn parse_language(code: &str) -> Result<LanguageIdentifier, Error> {
    let id: LanguageIdentifier = code
        .replace('_', "-")
        .parse()
        .map_err(|_| Error::InvalidLanguage(code.to_string()))?;
    if id.language.as_str() == "und" {
        return Err(Error::InvalidLanguage(code.to_string()));
    }
    Ok(id)
}

/// DeepL source languages are plain language subtags: `de-AT` → `DE`.
pub fn deepl_source_code(code: &str) -> Result<String, Error> {
    Ok(parse_language(code)?.language.as_str().to_ascii_uppercase())
}

/// DeepL target languages keep script or region: `en-gb` → `EN-GB`,
/// `zh-Hans` → `ZH-HANS`, `fr` → `FR`.
pub fn deepl_target_code(code: &str) -> Result<String, Error> {
    let id = parse_language(code)?;
    let mut out = id.language.as_str().to_ascii_uppercase();
    if let Some(script) = id.script {
        out.push('-');
        out.push_str(&script.as_str().to_ascii_uppercase());
    } else if let Some(region) = id.region {
        out.push('-');
        out.push_str(region.as_str());
    }
    Ok(out)
}
