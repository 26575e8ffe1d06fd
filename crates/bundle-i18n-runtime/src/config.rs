use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RuntimeResult;

/// What the catalog does with a bundle file whose locale code does not parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLocalePolicy {
    #[default]
    Skip,
    Fail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalizerConfig {
    pub bundle_dir: String,
    pub family: String,
    pub default_locale: String,
    pub diagnostic_locale: String,
    pub malformed_locales: MalformedLocalePolicy,
}

impl Default for LocalizerConfig {
    fn default() -> Self {
        Self {
            bundle_dir: "bundles".to_string(),
            family: "bundle".to_string(),
            default_locale: "en".to_string(),
            diagnostic_locale: "router".to_string(),
            malformed_locales: MalformedLocalePolicy::Skip,
        }
    }
}

pub fn load_config(path: &Path) -> RuntimeResult<LocalizerConfig> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

pub fn load_config_or_default(path: &Path) -> RuntimeResult<LocalizerConfig> {
    if path.exists() {
        load_config(path)
    } else {
        Ok(LocalizerConfig::default())
    }
}
