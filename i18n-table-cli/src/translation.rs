use std::time::Duration;

use i18n_table::{DeeplConfig, Error};

/// Builds the DeepL settings from the environment, then applies the
/// command-line overrides on top.
pub fn deepl_config(
    base_url: Option<String>,
    timeout_secs: Option<u64>,
) -> Result<DeeplConfig, Error> {
    Ok(apply_overrides(DeeplConfig::from_env()?, base_url, timeout_secs))
}

fn apply_overrides(
    mut config: DeeplConfig,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
) -> DeeplConfig {
    if let Some(url) = base_url {
        config = config.with_base_url(url);
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    config
}
