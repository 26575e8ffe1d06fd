use bundle_i18n_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("bundle resources unavailable: {0}")]
    ResourceUnavailable(String),
    #[error("default locale {0} is not among the supported locales")]
    MissingDefaultLocale(String),
    #[error("malformed locale code {code:?}: {reason}")]
    MalformedLocaleCode { code: String, reason: CoreError },
    #[error("properties error at line {line}: {message}")]
    Properties { line: usize, message: String },
    #[error("no bundle for locale {0}")]
    UnknownLocale(String),
    #[error("failed to load bundle for locale {locale}: {message}")]
    BundleLoad { locale: String, message: String },
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
